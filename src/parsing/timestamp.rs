//! Timestamp normalization.
//!
//! Export files carry no locale tag, so `3/4/23` could be 3 April or 4 March.
//! Resolution is a fixed two-step policy: try the day-first reading, and only
//! if it yields an impossible date fall back to month-first. A marker that
//! fails both readings cannot be placed on the timeline and its segment is
//! dropped.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

static PARTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{1,2})/(\d{1,2})/(\d{2,4}),\s(\d{1,2}):(\d{2})(?::(\d{2}))?(?:\s?([APap])[Mm])?$",
    )
    .expect("timestamp parts pattern compiles")
});

/// How the two leading date numbers are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `DD/MM/YY`
    DayFirst,
    /// `MM/DD/YY`
    MonthFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// Raw numeric fields of a marker, before any interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampParts {
    first: u32,
    second: u32,
    year: i32,
    hour: u32,
    minute: u32,
    seconds: u32,
    meridiem: Option<Meridiem>,
}

impl TimestampParts {
    /// Splits a cleaned marker (`"1/2/23, 10:00 PM"`) into its fields.
    pub fn extract(cleaned: &str) -> Option<Self> {
        let caps = PARTS_RE.captures(cleaned)?;
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        let year_digits = caps.get(3)?.as_str();
        let year = expand_year(year_digits.parse().ok()?, year_digits.len());

        let meridiem = caps.get(7).map(|m| {
            if m.as_str().eq_ignore_ascii_case("a") {
                Meridiem::Am
            } else {
                Meridiem::Pm
            }
        });

        Some(Self {
            first: num(1)?,
            second: num(2)?,
            year,
            hour: num(4)?,
            minute: num(5)?,
            seconds: num(6).unwrap_or(0),
            meridiem,
        })
    }

    /// Builds a moment using the given date order, if every field is in range.
    pub fn resolve(self, order: DateOrder) -> Option<NaiveDateTime> {
        let (day, month) = match order {
            DateOrder::DayFirst => (self.first, self.second),
            DateOrder::MonthFirst => (self.second, self.first),
        };
        let date = NaiveDate::from_ymd_opt(self.year, month, day)?;
        date.and_hms_opt(self.hour_24()?, self.minute, self.seconds)
    }

    fn hour_24(self) -> Option<u32> {
        match self.meridiem {
            None if self.hour < 24 => Some(self.hour),
            None => None,
            Some(_) if !(1..=12).contains(&self.hour) => None,
            Some(Meridiem::Am) => Some(self.hour % 12),
            Some(Meridiem::Pm) => Some(self.hour % 12 + 12),
        }
    }
}

/// Two-digit years use a fixed pivot: 00-69 → 2000s, 70-99 → 1900s.
///
/// dateutil instead picks the century that puts the year within 50 years of
/// the current one, so its reading of `75` moves with the clock (2075 when
/// run in 2026). The fixed pivot keeps parsing independent of when it runs.
fn expand_year(value: i32, digits: usize) -> i32 {
    match (digits, value) {
        (0..=2, 0..=69) => 2000 + value,
        (0..=2, _) => 1900 + value,
        _ => value,
    }
}

/// Strips the trailing ` - ` delimiter and surrounding whitespace.
pub fn clean_literal(literal: &str) -> &str {
    let trimmed = literal.trim();
    trimmed.strip_suffix('-').unwrap_or(trimmed).trim_end()
}

/// Day-first reading of a cleaned marker.
pub fn try_day_first(cleaned: &str) -> Option<NaiveDateTime> {
    TimestampParts::extract(cleaned)?.resolve(DateOrder::DayFirst)
}

/// Month-first reading of a cleaned marker.
pub fn try_month_first(cleaned: &str) -> Option<NaiveDateTime> {
    TimestampParts::extract(cleaned)?.resolve(DateOrder::MonthFirst)
}

/// Resolves a raw marker literal to a moment: day-first, then month-first.
///
/// Returns `None` when neither reading is a valid date and time.
pub fn resolve_timestamp(literal: &str) -> Option<NaiveDateTime> {
    let cleaned = clean_literal(literal);
    let parts = TimestampParts::extract(cleaned)?;
    parts
        .resolve(DateOrder::DayFirst)
        .or_else(|| parts.resolve(DateOrder::MonthFirst))
}
