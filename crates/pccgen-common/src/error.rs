//! Error types for script generation.
//!
//! This module defines the error types used throughout the generator crates.
//! All errors implement `std::error::Error` via `thiserror`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur while collecting links or writing a script.
#[derive(Debug, Error)]
pub enum GenError {
    /// Operator input could not be used (e.g. a non-integer link count).
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message.
        message: String,
    },

    /// Input ended while a value was still expected.
    #[error("Input ended while reading {expected}")]
    UnexpectedEof {
        /// What was being read when input ran out.
        expected: String,
    },

    /// Talking to the operator (reading answers or printing prompts) failed.
    #[error("Prompt I/O failed: {source}")]
    Prompt {
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A link descriptor file could not be opened.
    #[error("Failed to open link file '{}': {source}", path.display())]
    InputFile {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A link descriptor file could not be parsed.
    #[error("Failed to parse link file '{}': {message}", path.display())]
    InputFormat {
        /// The file that failed to parse.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },

    /// Writing the generated script failed.
    #[error("Failed to write script to '{target}': {source}")]
    WriteFailed {
        /// Where the script was being written.
        target: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl GenError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }

    /// Creates a write failure error.
    pub fn write_failed(target: impl Into<String>, source: io::Error) -> Self {
        Self::WriteFailed {
            target: target.into(),
            source,
        }
    }

    /// Returns true if this error happened before any output was produced.
    ///
    /// Input errors abort the run with no partial script on disk.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, GenError::WriteFailed { .. })
    }
}
