//! Peak normalization
//!
//! Rescales a waveform so that its peak sits just below clipping, either with
//! one factor for the whole buffer or one factor per channel.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::buffer::NORMALIZE_PEAK;
use crate::engine::waveform::Waveform;

/// How [`normalize_audio`] picks its scale factor(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormMode {
    /// One factor from the max-abs of the whole clip
    Global,
    /// Each channel normalized individually
    Channel,
    /// Leave the audio as it is
    #[default]
    None,
}

impl FromStr for NormMode {
    type Err = Infallible;

    /// Unknown strings (including the empty string) parse as [`NormMode::None`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "global" => NormMode::Global,
            "channel" => NormMode::Channel,
            _ => NormMode::None,
        })
    }
}

impl fmt::Display for NormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NormMode::Global => "global",
            NormMode::Channel => "channel",
            NormMode::None => "none",
        };
        f.write_str(name)
    }
}

/// Normalize audio based on the max of the absolute value
///
/// Returns a new buffer; `audio` is left untouched. A 1-D series is always
/// normalized globally, whatever `mode` says. All-zero buffers and all-zero
/// channels are returned unchanged.
pub fn normalize_audio<W: Waveform>(audio: &W, mode: NormMode) -> W {
    let mut out = audio.clone();

    if mode == NormMode::Global || audio.ndim() < 2 {
        let absmax = audio.max_abs();
        if absmax != 0.0 {
            out.scale(NORMALIZE_PEAK / absmax);
        }
    } else if mode == NormMode::Channel {
        for c in 0..audio.num_channels() {
            let absmax = audio.channel_max_abs(c);
            if absmax != 0.0 {
                out.scale_channel(c, NORMALIZE_PEAK / absmax);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::buffer::AudioBuffer;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, Array2};
    use test_case::test_case;

    #[test_case("global", NormMode::Global ; "global")]
    #[test_case("channel", NormMode::Channel ; "channel")]
    #[test_case("", NormMode::None ; "empty string")]
    #[test_case("peak", NormMode::None ; "unknown mode")]
    fn test_parse_mode(input: &str, expected: NormMode) {
        assert_eq!(input.parse::<NormMode>().unwrap(), expected);
    }

    #[test]
    fn test_global_peak_is_099() {
        let audio = array![[0.1_f32, -0.5], [0.25, 0.2]];
        let out = normalize_audio(&audio, NormMode::Global);
        assert_abs_diff_eq!(out.max_abs(), 0.99, epsilon = 1e-6);
        // Ratios between samples are preserved
        assert_abs_diff_eq!(out[[0, 0]] / out[[0, 1]], 0.1 / -0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_channel_mode_scales_independently() {
        let audio = array![[0.5_f32, -0.25], [0.0, 0.1]];
        let out = normalize_audio(&audio, NormMode::Channel);
        assert_abs_diff_eq!(out.channel_max_abs(0), 0.99, epsilon = 1e-6);
        assert_abs_diff_eq!(out.channel_max_abs(1), 0.99, epsilon = 1e-6);
        assert_abs_diff_eq!(out[[0, 1]], -0.495, epsilon = 1e-6);
    }

    #[test]
    fn test_silent_channel_left_unchanged() {
        let audio = AudioBuffer::from_channels(vec![vec![0.0, 0.0], vec![0.5, -0.1]], 48000).unwrap();
        let out = normalize_audio(&audio, NormMode::Channel);
        assert_eq!(out.channel(0), &[0.0, 0.0]);
        assert_abs_diff_eq!(out.channel(1)[0], 0.99, epsilon = 1e-6);
    }

    #[test]
    fn test_all_zero_buffer_unchanged() {
        let audio = Array2::<f32>::zeros((2, 16));
        assert_eq!(normalize_audio(&audio, NormMode::Global), audio);
        assert_eq!(normalize_audio(&audio, NormMode::Channel), audio);
    }

    #[test]
    fn test_none_mode_passes_through() {
        let audio = array![[0.1_f32, 0.2], [0.3, 0.4]];
        assert_eq!(normalize_audio(&audio, NormMode::None), audio);
    }

    #[test]
    fn test_one_dimensional_forces_global() {
        let audio: Array1<f32> = array![0.2, -0.4];
        let out = normalize_audio(&audio, NormMode::None);
        assert_abs_diff_eq!(out[1], -0.99, epsilon = 1e-6);
        assert_abs_diff_eq!(out[0], 0.495, epsilon = 1e-6);
    }

    #[test]
    fn test_input_not_mutated() {
        let audio = array![[0.5_f32, -0.25]];
        let before = audio.clone();
        let _ = normalize_audio(&audio, NormMode::Global);
        assert_eq!(audio, before);
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&NormMode::Channel).unwrap(), "\"channel\"");
        assert_eq!(NormMode::Global.to_string(), "global");
    }
}
