//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from, in priority order:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default
//!
//! A missing TOML file is not an error: the caller gets defaults and a
//! warning is logged.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Application directory name under the platform config/data dirs
pub const APP_DIR_NAME: &str = "sos";

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "SOS_ROOT_FOLDER";

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Root folder resolver
///
/// Holds the candidate values from each tier; [`RootFolderResolver::resolve`]
/// picks the highest-priority one that is set.
#[derive(Debug, Clone, Default)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_value: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value given on the command line
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Value found in the TOML config
    pub fn with_toml_value(mut self, path: Option<PathBuf>) -> Self {
        self.toml_value = path;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_value {
            return path.clone();
        }

        default_root_folder()
    }
}

/// Default config file path for the platform (`<config_dir>/sos/<module>.toml`)
pub fn default_config_path(module_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(format!("{}.toml", module_name)))
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/sos (or /var/lib/sos for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/var/lib/sos"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/sos"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\sos"))
    } else {
        PathBuf::from("./sos_data")
    }
}

/// Load a TOML config file into `T`
///
/// A missing file yields `T::default()`. An unreadable or malformed file is
/// an error so that typos are not silently ignored.
pub fn load_toml_config<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        warn!(
            path = %path.display(),
            "Config file not found, using built-in defaults"
        );
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;

    info!(path = %path.display(), "Loaded config file");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[derive(Debug, Default, Deserialize)]
    struct SampleConfig {
        #[serde(default)]
        port: Option<u16>,
        #[serde(default)]
        logging: LoggingConfig,
    }

    #[test]
    #[serial]
    fn test_cli_arg_wins() {
        env::set_var(ROOT_FOLDER_ENV, "/tmp/from-env");
        let resolved = RootFolderResolver::new()
            .with_cli_arg(Some(PathBuf::from("/tmp/from-cli")))
            .with_toml_value(Some(PathBuf::from("/tmp/from-toml")))
            .resolve();
        env::remove_var(ROOT_FOLDER_ENV);

        assert_eq!(resolved, PathBuf::from("/tmp/from-cli"));
    }

    #[test]
    #[serial]
    fn test_env_beats_toml() {
        env::set_var(ROOT_FOLDER_ENV, "/tmp/from-env");
        let resolved = RootFolderResolver::new()
            .with_toml_value(Some(PathBuf::from("/tmp/from-toml")))
            .resolve();
        env::remove_var(ROOT_FOLDER_ENV);

        assert_eq!(resolved, PathBuf::from("/tmp/from-env"));
    }

    #[test]
    #[serial]
    fn test_falls_back_to_default() {
        env::remove_var(ROOT_FOLDER_ENV);
        let resolved = RootFolderResolver::new().resolve();
        assert_eq!(resolved, default_root_folder());
        assert!(!resolved.as_os_str().is_empty());
    }

    #[test]
    fn test_missing_toml_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config: SampleConfig = load_toml_config(&temp_dir.path().join("absent.toml")).unwrap();
        assert!(config.port.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "port = [not valid").unwrap();

        let result: Result<SampleConfig> = load_toml_config(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_toml_values_parsed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("good.toml");
        std::fs::write(&path, "port = 6100\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config: SampleConfig = load_toml_config(&path).unwrap();
        assert_eq!(config.port, Some(6100));
        assert_eq!(config.logging.level, "debug");
    }
}
