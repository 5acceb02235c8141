//! Error types for scanning and document I/O.
//!
//! Scanning has exactly one failure mode: the attempted position is not an
//! inline math span. That outcome is reported as [`Error::NoMatch`] together
//! with a [`Reject`] naming the cause, so a host can fall back to ordinary
//! text handling. Decoding and encoding never fail.
//!
//! ## Examples
//!
//! ```rust
//! use math_inline::{scan, Error, Reject};
//!
//! let err = scan("foo:math[x]", 3).unwrap_err();
//! assert_eq!(
//!     err,
//!     Error::NoMatch { offset: 3, reason: Reject::WordCharBefore('o') }
//! );
//! assert!(err.to_string().contains("word character"));
//! ```

use std::fmt;
use thiserror::Error;

/// Why a scan attempt did not produce an inline math span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Reject {
    /// The character before the `:` is an ASCII letter, digit or underscore.
    #[error("preceded by word character {0:?}")]
    WordCharBefore(char),

    /// The input deviates from the literal `:math[` opening marker.
    #[error("expected {expected:?}, found {}", describe(.found))]
    Mismatch {
        expected: char,
        found: Option<char>,
    },

    /// A line ending was reached before the terminating `]`.
    #[error("line ending inside math data")]
    LineEnding,

    /// The input ended before the terminating `]`.
    #[error("unexpected end of input inside math data")]
    UnexpectedEof,
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("{:?}", ch),
        None => "end of input".to_string(),
    }
}

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No inline math span starts at `offset`.
    #[error("no inline math at byte {offset}: {reason}")]
    NoMatch { offset: usize, reason: Reject },

    /// The requested scan offset is out of bounds or not on a character boundary.
    #[error("invalid scan offset {offset}")]
    InvalidOffset { offset: usize },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a no-match error for a scan attempt starting at `offset`.
    pub fn no_match(offset: usize, reason: Reject) -> Self {
        Error::NoMatch { offset, reason }
    }

    /// Returns the rejection cause if this is a [`Error::NoMatch`].
    ///
    /// ```rust
    /// use math_inline::{scan, Reject};
    ///
    /// let err = scan(":math[x\ny]", 0).unwrap_err();
    /// assert_eq!(err.reject(), Some(Reject::LineEnding));
    /// ```
    #[must_use]
    pub fn reject(&self) -> Option<Reject> {
        match self {
            Error::NoMatch { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
