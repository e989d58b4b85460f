//! Filter entries by date range and author.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for narrowing an entry collection. Filtering never edits
//! entries; it returns a new collection holding the ones that pass.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Entries on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Entries on or before date |
//! | Author | [`with_author`](FilterConfig::with_author) | Entries from a specific author |
//!
//! # Example
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::parser::TranscriptParser;
//!
//! # fn main() -> chatlens::Result<()> {
//! let transcript = TranscriptParser::new().parse_str(
//!     "1/1/24, 09:00 - Alice: Old\n15/6/24, 09:00 - Alice: New\n15/6/24, 09:01 - Bob: Hi",
//! );
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_author("alice");
//!
//! let filtered = apply_filters(transcript.entries, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body(), "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Author matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime};

use crate::Entry;
use crate::error::ChatlensError;

/// Configuration for filtering entries by date and author.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only entries on or after this moment.
    pub after: Option<NaiveDateTime>,

    /// Include only entries on or before this moment.
    pub before: Option<NaiveDateTime>,

    /// Include only entries from this author (case-insensitive).
    pub author: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all entries pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_date(date_str)?;
        self.after = Some(date.and_time(chrono::NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        let date = parse_date(date_str)?;
        // End of the day to include the full day
        let end = date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatlensError::invalid_date(date_str))?;
        self.before = Some(end);
        Ok(self)
    }

    /// Sets the author filter.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the start moment directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end moment directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.author.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the entry passes every active filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(ref author) = self.author {
            if !entry.author().eq_ignore_ascii_case(author) {
                return false;
            }
        }

        let ts = entry.timestamp();
        if self.after.is_some_and(|after| ts < after) {
            return false;
        }
        if self.before.is_some_and(|before| ts > before) {
            return false;
        }

        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Filters a collection of entries based on the provided configuration.
///
/// Order is preserved. If no filters are active, returns the entries unchanged.
pub fn apply_filters(entries: Vec<Entry>, config: &FilterConfig) -> Vec<Entry> {
    if !config.is_active() {
        return entries;
    }

    entries.into_iter().filter(|e| config.matches(e)).collect()
}
