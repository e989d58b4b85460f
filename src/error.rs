//! Error types for chatlens.
//!
//! [`ChatlensError`] covers the failures that actually stop an operation:
//! reading or writing files, a bad filter argument, an unsupported output
//! format, or a malformed sentiment lexicon.
//!
//! Malformed transcript *content* is never an error. Unresolvable timestamps
//! drop their segment, unclassifiable segments become sentinel entries, and a
//! transcript without any structure yields an empty result with a diagnostic
//! [`ParseStatus`](crate::parser::ParseStatus).

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Shorthand for results carrying a [`ChatlensError`].
///
/// ```rust
/// use chatlens::Entry;
///
/// fn load() -> chatlens::Result<Vec<Entry>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// Everything that can make a chatlens operation fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// Reading a transcript or resource file, or writing output, failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A date filter argument is not a calendar date.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        input: String,
        expected: &'static str,
    },

    /// The output format is unknown, or its cargo feature is disabled.
    #[error("Unsupported output format '{name}': {reason}")]
    UnsupportedFormat { name: String, reason: String },

    /// A line of a sentiment lexicon file could not be read.
    #[error("Invalid lexicon at line {line}: {reason}")]
    Lexicon { line: usize, reason: String },

    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A writer produced bytes that are not UTF-8.
    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl ChatlensError {
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    pub fn unsupported_format(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ChatlensError::UnsupportedFormat {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Builds a lexicon error for a 1-based line number.
    pub fn lexicon(line: usize, reason: impl Into<String>) -> Self {
        ChatlensError::Lexicon {
            line,
            reason: reason.into(),
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ChatlensError::UnsupportedFormat { .. })
    }

    pub fn is_lexicon(&self) -> bool {
        matches!(self, ChatlensError::Lexicon { .. })
    }
}
