//! Filesystem utilities
//!
//! Best-effort helpers: failures are reported in return values rather than
//! propagated, so a partially readable tree still yields results.

pub mod dirs;
pub mod scan;

pub use dirs::{is_tool, makedir, MakeDir};
pub use scan::{
    fast_scandir, get_audio_filenames, get_audio_filenames_in, ScanResult, AUDIO_EXTENSIONS,
};
