//! Peak level, silence detection and PCM conversion

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::engine::buffer::linear_to_db;
use crate::engine::waveform::Waveform;

/// Threshold below which a clip counts as silence (-60 dB)
pub const DEFAULT_SILENCE_THRESHOLD_DB: f32 = -60.0;

/// Scale between nominal [-1, 1] floats and 16-bit PCM
const PCM16_SCALE: f32 = 32768.0;

/// Find the loudest value in the entire clip and express it in dB
///
/// An all-zero (or empty) clip gives `-inf`; a clip containing NaN gives NaN.
pub fn get_dbmax<W: Waveform>(audio: &W) -> f32 {
    linear_to_db(audio.max_abs())
}

/// Check whether the entire clip stays below `thresh` dB
///
/// Use [`DEFAULT_SILENCE_THRESHOLD_DB`] for the usual -60 dB cut-off.
pub fn is_silence<W: Waveform>(audio: &W, thresh: f32) -> bool {
    get_dbmax(audio) < thresh
}

/// Convert one float sample to 16-bit PCM
///
/// The clip range is [-32768, 32768]; a sample clipped to 32768 does not fit
/// in an `i16` and wraps to -32768 on the narrowing cast.
#[inline]
pub fn float_to_pcm16(sample: f32) -> i16 {
    let clipped = (sample * PCM16_SCALE).clamp(-PCM16_SCALE, PCM16_SCALE);
    clipped as i32 as i16
}

/// Convert a float waveform of any shape to 16-bit PCM (e.g. for playback)
pub fn audio_float_to_int<S, D>(waveform: &ArrayBase<S, D>) -> Array<i16, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    waveform.mapv(float_to_pcm16)
}
