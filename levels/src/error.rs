//! Error types for level, label, and color generation.
//!
//! This module defines `LevelsError`, the error type for every fallible
//! operation in the crate. It uses `thiserror` for convenient error
//! construction and implements the standard error traits.

use thiserror::Error;

/// Custom error type for level-generation operations.
///
/// Structural problems surface immediately with enough context (which value
/// or interval failed) for the caller to report a precise message.
/// Degenerate inputs (all-missing data, equal endpoints) are not errors and
/// produce well-defined values instead.
#[derive(Debug, Error)]
pub enum LevelsError {
    /// A level sequence given as interval pairs is not mutually contiguous
    #[error("Invalid intervals: {message}")]
    InvalidIntervals { message: String },

    /// A reserved but unimplemented mode was requested
    #[error("Unsupported mode: {message}")]
    UnsupportedMode { message: String },

    /// A leaf value that is not numeric after full container descent
    #[error("Malformed value: {message}")]
    MalformedValue { message: String },

    /// A color palette with no entries
    #[error("Palette must contain at least one color")]
    EmptyPalette,

    /// Failure reported by the calendar collaborator
    #[error("Calendar error: {message}")]
    Calendar { message: String },
}

impl LevelsError {
    /// Create an InvalidIntervals error with a message
    pub fn invalid_intervals(message: impl Into<String>) -> Self {
        Self::InvalidIntervals {
            message: message.into(),
        }
    }

    /// Create an UnsupportedMode error with a message
    pub fn unsupported_mode(message: impl Into<String>) -> Self {
        Self::UnsupportedMode {
            message: message.into(),
        }
    }

    /// Create a MalformedValue error with a message
    pub fn malformed_value(message: impl Into<String>) -> Self {
        Self::MalformedValue {
            message: message.into(),
        }
    }

    /// Create a Calendar error with a message
    pub fn calendar(message: impl Into<String>) -> Self {
        Self::Calendar {
            message: message.into(),
        }
    }
}

// Type alias for Result using LevelsError
pub type Result<T> = std::result::Result<T, LevelsError>;
