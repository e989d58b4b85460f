//! The normalized chat record.
//!
//! This module provides [`Entry`], one classified transcript line with its
//! resolved timestamp and every calendar/clock field the analytics need.
//! Entries are produced once by the parser and never mutated afterwards;
//! filtering produces new views over them.
//!
//! # Examples
//!
//! ```
//! use chatlens::Entry;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 2, 1)
//!     .unwrap()
//!     .and_hms_opt(23, 15, 0)
//!     .unwrap();
//! let entry = Entry::build(ts, "Alice", "hello");
//!
//! assert_eq!(entry.author(), "Alice");
//! assert_eq!(entry.day_name(), "Wednesday");
//! assert_eq!(entry.month(), "February");
//! assert_eq!(entry.period(), "23-00");
//! ```

use std::fmt;

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::parsing::classify::Classification;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Placeholder authors for lines that cannot be attributed to a participant.
///
/// Sentinel entries stay in the record stream so the timeline is complete,
/// but statistics about "active users" must skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentinel {
    /// Group service line: joins, leaves, subject changes, encryption notice.
    GroupNotification,
    /// Non-empty line without an author and without notification keywords.
    UnknownUser,
    /// Timestamp marker followed by nothing.
    EmptyMessage,
    /// Segment that could not be classified.
    ErrorProcessing,
}

impl Sentinel {
    /// All sentinel tags, in a fixed order.
    pub const ALL: [Sentinel; 4] = [
        Sentinel::GroupNotification,
        Sentinel::UnknownUser,
        Sentinel::EmptyMessage,
        Sentinel::ErrorProcessing,
    ];

    /// Returns the author tag written into entries.
    pub fn as_str(self) -> &'static str {
        match self {
            Sentinel::GroupNotification => "group_notification",
            Sentinel::UnknownUser => "unknown_user",
            Sentinel::EmptyMessage => "empty_message",
            Sentinel::ErrorProcessing => "error_processing",
        }
    }

    /// Looks up the sentinel whose tag equals `author`.
    pub fn from_author(author: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == author)
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `author` is one of the four sentinel tags.
pub fn is_sentinel(author: &str) -> bool {
    Sentinel::from_author(author).is_some()
}

/// Label of the one-hour window starting at `hour`, e.g. `"09-10"`.
///
/// Hour 23 wraps to `"23-00"`.
pub fn hour_bucket(hour: u32) -> String {
    match hour {
        23 => "23-00".to_string(),
        0 => "00-01".to_string(),
        h => format!("{:02}-{:02}", h, h + 1),
    }
}

/// Full English month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("Unknown", |m| m.name())
}

/// A normalized, classified transcript line.
///
/// | Field | Description |
/// |-------|-------------|
/// | `timestamp` | Resolved moment of the timestamp marker |
/// | `author` | Display name, or a [`Sentinel`] tag |
/// | `body` | Message text (empty for `empty_message`) |
/// | `year`, `month_num`, `month`, `day` | Calendar fields |
/// | `day_name`, `specific_date` | Weekday name and calendar date |
/// | `hour`, `minute`, `period` | Clock fields and hour bucket |
///
/// All derived fields are computed once in [`Entry::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    timestamp: NaiveDateTime,
    author: String,
    body: String,
    year: i32,
    month_num: u32,
    month: &'static str,
    day: u32,
    day_name: &'static str,
    specific_date: NaiveDate,
    hour: u32,
    minute: u32,
    period: String,
}

impl Entry {
    /// Builds an entry and derives its calendar and clock fields.
    pub fn build(
        timestamp: NaiveDateTime,
        author: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let date = timestamp.date();
        let hour = timestamp.hour();
        Self {
            timestamp,
            author: author.into(),
            body: body.into(),
            year: date.year(),
            month_num: date.month(),
            month: month_name(date.month()),
            day: date.day(),
            day_name: WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize],
            specific_date: date,
            hour,
            minute: timestamp.minute(),
            period: hour_bucket(hour),
        }
    }

    /// Builds an entry from a classifier verdict.
    pub fn from_classification(timestamp: NaiveDateTime, classification: Classification) -> Self {
        let (author, body) = classification.into_author_and_body();
        Self::build(timestamp, author, body)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month_num(&self) -> u32 {
        self.month_num
    }

    /// Full month name, e.g. `"March"`.
    pub fn month(&self) -> &'static str {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Full weekday name, e.g. `"Sunday"`.
    pub fn day_name(&self) -> &'static str {
        self.day_name
    }

    pub fn specific_date(&self) -> NaiveDate {
        self.specific_date
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Hour bucket label, see [`hour_bucket`].
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Returns the sentinel tag if this entry is not attributed to a participant.
    pub fn sentinel(&self) -> Option<Sentinel> {
        Sentinel::from_author(&self.author)
    }

    /// Returns `true` if the author is a real participant.
    pub fn is_participant(&self) -> bool {
        self.sentinel().is_none()
    }
}
