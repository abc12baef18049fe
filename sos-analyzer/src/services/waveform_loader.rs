//! Waveform loading
//!
//! **Purpose:** Decode an audio asset to mono f32 PCM on the 16-bit-equivalent
//! scale, plus its sample rate.
//!
//! Uses symphonia for format-agnostic decoding (WAV, FLAC, MP3, OGG, etc.)

use std::path::{Path, PathBuf};
use std::time::Duration;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

use crate::models::{Waveform, FULL_SCALE_16BIT};

/// Waveform loading errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    /// Path does not resolve to an existing readable file
    #[error("Audio file not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    /// Container or codec could not be parsed
    #[error("Failed to decode {}: {reason}", path.display())]
    DecodeError { path: PathBuf, reason: String },

    /// Decoding did not finish within the allotted time
    #[error("Decoding {} timed out after {}ms", path.display(), timeout.as_millis())]
    TimedOut { path: PathBuf, timeout: Duration },
}

impl LoadError {
    fn decode(path: &Path, reason: impl std::fmt::Display) -> Self {
        LoadError::DecodeError {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Decode an audio file to a mono waveform
///
/// **Algorithm:**
/// 1. Open file and probe format using symphonia
/// 2. Find default audio track
/// 3. Create decoder for track codec
/// 4. Decode all packets, averaging channels to mono
/// 5. Scale to the 16-bit-equivalent range
///
/// # Errors
/// * `AssetNotFound` - missing, unreadable or not a regular file
/// * `DecodeError` - corrupt, truncated, empty or unsupported audio
pub fn load_waveform(file_path: &Path) -> Result<Waveform, LoadError> {
    tracing::debug!(path = %file_path.display(), "Decoding audio file");

    if !file_path.is_file() {
        return Err(LoadError::AssetNotFound(file_path.to_path_buf()));
    }
    let file = std::fs::File::open(file_path)
        .map_err(|_| LoadError::AssetNotFound(file_path.to_path_buf()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // Create format hint from file extension
    let mut hint = Hint::new();
    if let Some(extension) = file_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| LoadError::decode(file_path, format!("probe failed: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| LoadError::decode(file_path, "no audio track found"))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .filter(|&rate| rate > 0)
        .ok_or_else(|| LoadError::decode(file_path, "sample rate unknown"))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| LoadError::decode(file_path, format!("unsupported codec: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                // End of stream
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                return Err(LoadError::decode(file_path, format!("error reading packet: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| LoadError::decode(file_path, format!("corrupt packet: {}", e)))?;

        let spec = *decoded.spec();
        let channel_count = spec.channels.count().max(1);

        // Reallocate only when a packet is larger than any seen so far
        let needs_alloc = sample_buf
            .as_ref()
            .map_or(true, |buf| buf.capacity() < decoded.capacity() * channel_count);
        if needs_alloc {
            sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
        }

        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend(
                buf.samples()
                    .chunks(channel_count)
                    .map(|frame| frame.iter().sum::<f32>() / channel_count as f32 * FULL_SCALE_16BIT),
            );
        }
    }

    let waveform = Waveform::new(samples, sample_rate)
        .ok_or_else(|| LoadError::decode(file_path, "sample rate unknown"))?;

    tracing::debug!(
        path = %file_path.display(),
        sample_rate = sample_rate,
        total_samples = waveform.len(),
        duration_seconds = format!("{:.3}", waveform.duration_seconds()),
        "Audio decoding complete"
    );

    Ok(waveform)
}
