//! Error handling for aeiou
//!
//! Decode and I/O failures are propagated through [`AeiouError`]. Filesystem
//! helpers that are best-effort (scanning, directory creation) report their
//! failures in their return values instead.

use thiserror::Error;

/// Result type alias for aeiou operations
pub type Result<T> = std::result::Result<T, AeiouError>;

/// Main error type for aeiou operations
#[derive(Error, Debug)]
pub enum AeiouError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Processing Errors
    #[error("Resampling from {from_rate} Hz to {to_rate} Hz failed: {reason}")]
    Resample {
        from_rate: u32,
        to_rate: u32,
        reason: String,
    },

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    // Structural Errors
    #[error("Cannot unwrap an empty sequence")]
    EmptySequence,

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AeiouError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            AeiouError::FileNotFound { .. } => "FILE_NOT_FOUND",
            AeiouError::InvalidAudio { .. } => "INVALID_AUDIO",
            AeiouError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            AeiouError::Resample { .. } => "RESAMPLE_ERROR",
            AeiouError::InvalidParameter { .. } => "INVALID_PARAMETER",
            AeiouError::Shape(_) => "SHAPE_ERROR",
            AeiouError::EmptySequence => "EMPTY_SEQUENCE",
            AeiouError::Io(_) => "IO_ERROR",
            AeiouError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error is recoverable by the caller (e.g. by picking another file)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AeiouError::FileNotFound { .. }
                | AeiouError::InvalidAudio { .. }
                | AeiouError::UnsupportedFormat { .. }
                | AeiouError::InvalidParameter { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            AeiouError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            AeiouError::InvalidAudio { .. } => vec![
                "Check if the file plays in another application",
                "The file may be corrupted - try re-exporting from source",
            ],
            AeiouError::UnsupportedFormat { .. } => vec![
                "Convert to WAV or FLAC format",
                "Supported formats: WAV, FLAC, OGG, AIFF, MP3",
            ],
            AeiouError::Resample { .. } => vec![
                "Load at the file's native sample rate and resample separately",
            ],
            AeiouError::EmptySequence => vec!["Pass a sequence with at least one element"],
            _ => vec![],
        }
    }
}
