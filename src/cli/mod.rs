//! CLI Module
//!
//! Command-line front end over the aeiou helpers.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::{DEFAULT_SAMPLE_RATE, DEFAULT_SILENCE_THRESHOLD_DB};

/// aeiou - audio loading, normalization and dataset scanning helpers
#[derive(Parser, Debug)]
#[command(name = "aeiou")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List audio files under one or more directories
    #[command(name = "scan")]
    Scan {
        /// Directories to search
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Allowed extensions (default: common audio formats)
        #[arg(short, long = "ext")]
        ext: Vec<String>,
    },

    /// Print shape, peak level and silence status of a file
    #[command(name = "info")]
    Info {
        /// Audio file to inspect
        path: PathBuf,

        /// Sample rate to load at
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sr: u32,

        /// Silence threshold in dB
        #[arg(long, default_value_t = DEFAULT_SILENCE_THRESHOLD_DB, allow_hyphen_values = true)]
        thresh: f32,
    },

    /// Load, normalize and write a file as WAV
    #[command(name = "normalize")]
    Normalize {
        /// Input audio file
        input: PathBuf,

        /// Output WAV file
        output: PathBuf,

        /// Normalization mode: global | channel
        #[arg(short, long, default_value = "global")]
        mode: String,

        /// Sample rate to load at
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sr: u32,

        /// Output bit depth: 16, 24 or 32 (float)
        #[arg(long, default_value_t = 24)]
        bit_depth: u16,
    },

    /// Show how a file would be chopped into windows
    #[command(name = "batch")]
    Batch {
        /// Audio file to window
        path: PathBuf,

        /// Window length in samples
        #[arg(short, long)]
        win_len: usize,

        /// Sample rate to load at
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sr: u32,
    },

    /// Check whether a program is available on PATH
    #[command(name = "which")]
    Which {
        /// Program name
        name: String,
    },

    /// Create a directory (and parents) if missing
    #[command(name = "mkdir")]
    Mkdir {
        /// Directory to create
        path: PathBuf,
    },

    /// Print the first non-sequence value of a JSON document
    #[command(name = "untuple")]
    Untuple {
        /// JSON text, e.g. '[[1, 2], 3]'
        json: String,
    },
}
