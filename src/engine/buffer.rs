//! Audio Buffer Management
//!
//! Provides the core multichannel waveform type used by the loader and the
//! inspection helpers, plus dB conversion utilities.

use ndarray::Array2;

use crate::error::{AeiouError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default target sample rate for loading (48kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Peak level that normalization rescales to, just below clipping
pub const NORMALIZE_PEAK: f32 = 0.99;

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert linear amplitude to decibels
///
/// Zero maps to `-inf` and negative input to NaN, as `log10` does.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    20.0 * linear.log10()
}

/// `f32::max` that lets NaN win instead of discarding it
#[inline]
pub(crate) fn max_or_nan(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        f32::NAN
    } else {
        a.max(b)
    }
}

/// Largest absolute value, 0.0 when empty and NaN if any sample is NaN
#[inline]
pub(crate) fn peak_abs<'a>(samples: impl IntoIterator<Item = &'a f32>) -> f32 {
    samples.into_iter().map(|s| s.abs()).fold(0.0_f32, max_or_nan)
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Multichannel waveform of shape (channels, samples)
///
/// Stores audio as non-interleaved 32-bit floating point samples.
/// Each channel is a separate `Vec<f32>` and all channels share one length.
///
/// # Example
/// ```
/// use aeiou::engine::buffer::{AudioBuffer, DEFAULT_SAMPLE_RATE};
///
/// // Create a 1-second stereo buffer
/// let buffer = AudioBuffer::new(2, DEFAULT_SAMPLE_RATE as usize, DEFAULT_SAMPLE_RATE);
/// assert_eq!(buffer.channels(), 2);
/// assert_eq!(buffer.len(), 48000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample data: outer Vec is channels, inner Vec is samples
    pub samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a zeroed buffer with the given channel count and length
    pub fn new(num_channels: usize, num_samples: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![vec![0.0_f32; num_samples]; num_channels],
            sample_rate,
        }
    }

    /// Create a buffer from per-channel sample vectors
    ///
    /// # Errors
    /// `InvalidAudio` if the channels have different lengths.
    pub fn from_channels(samples: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if let Some(first) = samples.first() {
            let expected = first.len();
            if let Some((ch, bad)) = samples
                .iter()
                .enumerate()
                .find(|(_, ch)| ch.len() != expected)
            {
                return Err(AeiouError::InvalidAudio {
                    reason: format!(
                        "channel {} has {} samples, expected {}",
                        ch,
                        bad.len(),
                        expected
                    ),
                    source: None,
                });
            }
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create an audio buffer from interleaved sample data
    ///
    /// # Errors
    /// `InvalidParameter` for zero channels, `InvalidAudio` if the data length
    /// is not a multiple of the channel count.
    pub fn from_interleaved(
        interleaved: &[f32],
        num_channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if num_channels == 0 {
            return Err(AeiouError::InvalidParameter {
                name: "num_channels",
                reason: "must be at least 1".to_string(),
            });
        }

        if interleaved.len() % num_channels != 0 {
            return Err(AeiouError::InvalidAudio {
                reason: format!(
                    "Interleaved data length {} is not divisible by channel count {}",
                    interleaved.len(),
                    num_channels
                ),
                source: None,
            });
        }

        let num_samples = interleaved.len() / num_channels;
        let mut samples = vec![Vec::with_capacity(num_samples); num_channels];

        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Convert the buffer to interleaved format (L, R, L, R, ... for stereo)
    pub fn to_interleaved(&self) -> Vec<f32> {
        let num_channels = self.channels();
        let num_samples = self.len();
        let mut interleaved = Vec::with_capacity(num_channels * num_samples);

        for sample_idx in 0..num_samples {
            for channel in &self.samples {
                interleaved.push(channel[sample_idx]);
            }
        }

        interleaved
    }

    /// Copy the samples into an array of shape (channels, samples)
    pub fn to_array(&self) -> Array2<f32> {
        let (channels, len) = (self.channels(), self.len());
        Array2::from_shape_fn((channels, len), |(c, i)| self.samples[c][i])
    }

    /// Build a buffer from an array of shape (channels, samples)
    pub fn from_array(array: &Array2<f32>, sample_rate: u32) -> Self {
        Self {
            samples: array.outer_iter().map(|row| row.to_vec()).collect(),
            sample_rate,
        }
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of samples per channel
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer is empty (no samples)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Get immutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// Get mutable access to a channel's samples
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.samples[index]
    }

    /// Peak absolute amplitude across every channel (NaN if any sample is NaN)
    pub fn peak(&self) -> f32 {
        peak_abs(self.samples.iter().flatten())
    }
}

impl Default for AudioBuffer {
    fn default() -> Self {
        Self::new(0, 0, DEFAULT_SAMPLE_RATE)
    }
}

// ============================================================================
// Tests
// ============================================================================
