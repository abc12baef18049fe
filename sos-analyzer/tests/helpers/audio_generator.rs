//! Audio Test Fixture Generator
//!
//! Writes 16-bit WAV clips holding sharp clicks over a silent, constant or
//! noisy background

use std::path::{Path, PathBuf};

/// Configuration for a generated clip
#[derive(Debug, Clone)]
pub struct ClipConfig {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    /// Sample positions of clicks
    pub click_positions: Vec<usize>,
    /// Click peak amplitude (16-bit scale)
    pub click_amplitude: i16,
    /// Decay time constant of the click tail, in samples
    pub click_decay: f32,
    /// Constant background level (16-bit scale)
    pub background: i16,
    /// Peak level of uniform pseudo-random noise added to the background
    pub noise_amplitude: i16,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 1.0,
            sample_rate: 44100,
            channels: 1,
            click_positions: Vec::new(),
            click_amplitude: 28000,
            click_decay: 30.0,
            background: 0,
            noise_amplitude: 0,
        }
    }
}

/// Fixed-seed LCG so fixtures are identical on every run
struct Noise {
    state: u32,
    amplitude: i32,
}

impl Noise {
    fn new(amplitude: i16) -> Self {
        Self {
            state: 0x2545_f491,
            amplitude: amplitude.max(0) as i32,
        }
    }

    fn next(&mut self) -> i32 {
        if self.amplitude == 0 {
            return 0;
        }
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        ((self.state >> 8) % (2 * self.amplitude as u32 + 1)) as i32 - self.amplitude
    }
}

/// Generate a WAV clip
///
/// Each click is a single full-amplitude sample followed by an alternating
/// exponentially decaying tail of `8 * click_decay` samples. Clicks replace
/// the background rather than adding to it, so the rectified click is
/// monotonically decreasing and gives the detector exactly one maximum.
pub fn generate_click_wav(path: &Path, config: &ClipConfig) -> anyhow::Result<PathBuf> {
    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let total_samples = (config.duration_seconds * config.sample_rate as f64) as usize;
    let mut noise = Noise::new(config.noise_amplitude);
    let mut samples: Vec<i16> = (0..total_samples)
        .map(|_| (config.background as i32 + noise.next()).clamp(i16::MIN as i32, i16::MAX as i32) as i16)
        .collect();

    let tail_len = (config.click_decay * 8.0).ceil() as usize;
    for &position in &config.click_positions {
        for offset in 0..tail_len {
            let index = position + offset;
            if index >= total_samples {
                break;
            }
            let decay = (-(offset as f32) / config.click_decay).exp();
            let sign = if offset % 2 == 0 { 1.0 } else { -1.0 };
            let value = config.click_amplitude as f32 * decay * sign;
            samples[index] = value as i16;
        }
    }

    let mut writer = hound::WavWriter::create(path, spec)?;
    for sample in samples {
        for _ in 0..config.channels {
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()?;

    Ok(path.to_path_buf())
}
