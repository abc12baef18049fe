//! HTTP API handlers for sos-analyzer

pub mod analysis;
pub mod health;
pub mod statistics;

pub use analysis::analysis_routes;
pub use health::health_routes;
pub use statistics::statistics_routes;

use std::path::{Component, Path, PathBuf};

use crate::error::ApiError;

/// Resolve a client-supplied clip path against the root folder
///
/// Only plain relative paths are accepted; absolute paths and `..`
/// components are rejected so requests cannot escape the root folder.
pub fn resolve_clip_path(root_folder: &Path, file_path: &str) -> Result<PathBuf, ApiError> {
    let relative = Path::new(file_path);
    if file_path.trim().is_empty() {
        return Err(ApiError::InvalidPath("file_path must not be empty".to_string()));
    }

    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ApiError::InvalidPath(format!(
            "file_path must be relative to the root folder: {}",
            file_path
        )));
    }

    Ok(root_folder.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_joined() {
        let resolved = resolve_clip_path(Path::new("/data"), "user1/clip.wav").unwrap();
        assert_eq!(resolved, PathBuf::from("/data/user1/clip.wav"));

        let resolved = resolve_clip_path(Path::new("/data"), "./clip.wav").unwrap();
        assert_eq!(resolved, PathBuf::from("/data/./clip.wav"));
    }

    #[test]
    fn test_escaping_paths_rejected() {
        assert!(resolve_clip_path(Path::new("/data"), "../etc/passwd").is_err());
        assert!(resolve_clip_path(Path::new("/data"), "a/../../b.wav").is_err());
        assert!(resolve_clip_path(Path::new("/data"), "/etc/passwd").is_err());
        assert!(resolve_clip_path(Path::new("/data"), "  ").is_err());
    }
}
