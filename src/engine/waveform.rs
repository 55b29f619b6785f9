//! Waveform abstraction shared by normalization, level and windowing helpers
//!
//! [`Waveform`] is implemented once per backend: the crate's own
//! [`AudioBuffer`], and `ndarray` arrays of one (a single series) or two
//! (channels x samples) dimensions.

use ndarray::{Array1, Array2, Axis};

use crate::engine::buffer::{peak_abs, AudioBuffer};

/// A numeric buffer that can be inspected and rescaled channel by channel
pub trait Waveform: Clone {
    /// Number of array dimensions: 1 for a bare series, 2 for multichannel
    fn ndim(&self) -> usize;

    /// Number of channels (1 for a bare series)
    fn num_channels(&self) -> usize;

    /// Largest absolute sample value, 0.0 when empty and NaN if any sample is NaN
    fn max_abs(&self) -> f32;

    /// Largest absolute sample value within one channel
    fn channel_max_abs(&self, channel: usize) -> f32;

    /// Multiply every sample by `factor`
    fn scale(&mut self, factor: f32);

    /// Multiply every sample of one channel by `factor`
    fn scale_channel(&mut self, channel: usize, factor: f32);

    /// Copy into a (channels, samples) array; 1-D input becomes one channel
    fn to_channels(&self) -> Array2<f32>;
}

impl Waveform for AudioBuffer {
    fn ndim(&self) -> usize {
        2
    }

    fn num_channels(&self) -> usize {
        self.channels()
    }

    fn max_abs(&self) -> f32 {
        self.peak()
    }

    fn channel_max_abs(&self, channel: usize) -> f32 {
        peak_abs(self.channel(channel))
    }

    fn scale(&mut self, factor: f32) {
        for channel in &mut self.samples {
            for sample in channel.iter_mut() {
                *sample *= factor;
            }
        }
    }

    fn scale_channel(&mut self, channel: usize, factor: f32) {
        for sample in self.channel_mut(channel) {
            *sample *= factor;
        }
    }

    fn to_channels(&self) -> Array2<f32> {
        self.to_array()
    }
}

impl Waveform for Array1<f32> {
    fn ndim(&self) -> usize {
        1
    }

    fn num_channels(&self) -> usize {
        1
    }

    fn max_abs(&self) -> f32 {
        peak_abs(self.iter())
    }

    fn channel_max_abs(&self, _channel: usize) -> f32 {
        self.max_abs()
    }

    fn scale(&mut self, factor: f32) {
        self.mapv_inplace(|s| s * factor);
    }

    fn scale_channel(&mut self, _channel: usize, factor: f32) {
        self.scale(factor);
    }

    fn to_channels(&self) -> Array2<f32> {
        self.clone().insert_axis(Axis(0))
    }
}

impl Waveform for Array2<f32> {
    fn ndim(&self) -> usize {
        2
    }

    fn num_channels(&self) -> usize {
        self.nrows()
    }

    fn max_abs(&self) -> f32 {
        peak_abs(self.iter())
    }

    fn channel_max_abs(&self, channel: usize) -> f32 {
        peak_abs(self.row(channel).iter())
    }

    fn scale(&mut self, factor: f32) {
        self.mapv_inplace(|s| s * factor);
    }

    fn scale_channel(&mut self, channel: usize, factor: f32) {
        self.row_mut(channel).mapv_inplace(|s| s * factor);
    }

    fn to_channels(&self) -> Array2<f32> {
        self.clone()
    }
}
