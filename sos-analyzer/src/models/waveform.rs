//! Waveform and impulse data structures

/// Scale factor from decoded full-scale samples (`[-1.0, 1.0]`) to the
/// 16-bit-equivalent amplitude scale used throughout analysis
pub const FULL_SCALE_16BIT: f32 = 32768.0;

/// Mono PCM samples plus sample rate
///
/// Samples are on the 16-bit-equivalent scale. An empty sample sequence is
/// valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    /// Create a waveform; returns `None` when `sample_rate` is zero
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Option<Self> {
        if sample_rate == 0 {
            return None;
        }
        Some(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Samples per second (always > 0)
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// One detected impulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impulse {
    /// Sample index in the waveform
    pub index: usize,
    /// Rectified amplitude at `index`
    pub amplitude: f32,
}

/// Impulses in ascending index order
///
/// The detector guarantees strictly increasing indices separated by at
/// least the configured minimum gap. Sets built by hand carry no such
/// guarantee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpulseSet {
    impulses: Vec<Impulse>,
}

impl ImpulseSet {
    pub fn new(impulses: Vec<Impulse>) -> Self {
        Self { impulses }
    }

    /// Build from bare sample indices (amplitude unknown, recorded as 0)
    pub fn from_indices(indices: &[usize]) -> Self {
        Self::new(
            indices
                .iter()
                .map(|&index| Impulse {
                    index,
                    amplitude: 0.0,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.impulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impulses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Impulse> {
        self.impulses.iter()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.impulses.iter().map(|i| i.index).collect()
    }

    /// First two impulses, the only pair used for timing
    pub fn first_pair(&self) -> Option<(Impulse, Impulse)> {
        match self.impulses.as_slice() {
            [first, second, ..] => Some((*first, *second)),
            _ => None,
        }
    }
}

/// Impulse detector output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Accepted impulses
    pub impulses: ImpulseSet,
    /// Amplitude samples at or above the loudness floor, in waveform order
    pub loud_samples: Vec<f32>,
    /// Adaptive threshold that peaks had to reach
    pub threshold: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample_rate_rejected() {
        assert!(Waveform::new(vec![0.0; 10], 0).is_none());
        assert!(Waveform::new(Vec::new(), 44100).is_some());
    }

    #[test]
    fn test_duration() {
        let waveform = Waveform::new(vec![0.0; 22050], 44100).unwrap();
        assert!((waveform.duration_seconds() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_first_pair() {
        assert!(ImpulseSet::default().first_pair().is_none());
        assert!(ImpulseSet::from_indices(&[10]).first_pair().is_none());

        let set = ImpulseSet::from_indices(&[10, 20, 30]);
        let (first, second) = set.first_pair().unwrap();
        assert_eq!(first.index, 10);
        assert_eq!(second.index, 20);
        assert_eq!(set.indices(), vec![10, 20, 30]);
    }
}
