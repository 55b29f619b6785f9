//! aeiou - audio utilities for ML pipelines
//!
//! A thin convenience layer for loading, normalizing and batching audio
//! waveforms, plus filesystem scanning helpers for building datasets.
//!
//! # Modules
//!
//! - `engine`: waveform buffers, file loading, normalization, peak level,
//!   PCM conversion and windowing
//! - `files`: recursive extension-filtered scans, directory creation, PATH lookup
//! - `nested`: unwrapping values buried in single-element sequences

pub mod cli;
pub mod engine;
pub mod error;
pub mod files;
pub mod nested;

pub use error::{AeiouError, Result};
