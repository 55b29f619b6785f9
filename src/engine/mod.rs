//! Audio Engine Module
//!
//! Waveform loading and numeric post-processing:
//! - Audio buffer type and the `Waveform` backend abstraction
//! - File loading with resampling and normalization
//! - Peak level, silence and PCM helpers
//! - Windowing into fixed-length batches

pub mod buffer;
pub mod io;
pub mod level;
pub mod normalize;
pub mod waveform;
pub mod window;

pub use buffer::{db_to_linear, linear_to_db, AudioBuffer, DEFAULT_SAMPLE_RATE};
pub use io::{decode_audio, export_wav, load_audio, ExportFormat, LoadOptions};
pub use level::{
    audio_float_to_int, float_to_pcm16, get_dbmax, is_silence, DEFAULT_SILENCE_THRESHOLD_DB,
};
pub use normalize::{normalize_audio, NormMode};
pub use waveform::Waveform;
pub use window::batch_it_crazy;
