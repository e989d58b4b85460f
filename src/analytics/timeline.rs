//! Message counts over calendar time.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{Selection, rank, selected};
use crate::Entry;
use crate::entry::{hour_bucket, month_name};

/// Messages in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month_num: u32,
    pub month: &'static str,
    pub messages: usize,
    /// `"<Month>-<year>"`, e.g. `"February-2023"`
    pub label: String,
}

/// Counts messages per month, oldest first.
pub fn monthly_timeline(selection: &Selection, entries: &[Entry]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for entry in selected(selection, entries) {
        *months.entry((entry.year(), entry.month_num())).or_default() += 1;
    }

    months
        .into_iter()
        .map(|((year, month_num), messages)| {
            let month = month_name(month_num);
            MonthlyCount {
                year,
                month_num,
                month,
                messages,
                label: format!("{month}-{year}"),
            }
        })
        .collect()
}

/// Messages on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub messages: usize,
}

/// Counts messages per day, oldest first.
pub fn daily_timeline(selection: &Selection, entries: &[Entry]) -> Vec<DailyCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for entry in selected(selection, entries) {
        *days.entry(entry.specific_date()).or_default() += 1;
    }

    days.into_iter()
        .map(|(date, messages)| DailyCount { date, messages })
        .collect()
}

/// Counts messages per weekday name, busiest first.
pub fn weekday_activity(selection: &Selection, entries: &[Entry]) -> Vec<(&'static str, usize)> {
    rank(selected(selection, entries).map(Entry::day_name))
}

/// Counts messages per month name (across years), busiest first.
pub fn month_activity(selection: &Selection, entries: &[Entry]) -> Vec<(&'static str, usize)> {
    rank(selected(selection, entries).map(Entry::month))
}

/// Message counts by weekday and hour bucket.
///
/// Only weekdays and buckets that occur are present. Rows run Monday to
/// Sunday, columns by hour; absent combinations hold zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub days: Vec<&'static str>,
    pub buckets: Vec<String>,
    /// `counts[day][bucket]`
    pub counts: Vec<Vec<usize>>,
}

impl Heatmap {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Returns the count for a weekday name and bucket label, zero if absent.
    pub fn get(&self, day: &str, bucket: &str) -> usize {
        let row = self.days.iter().position(|d| *d == day);
        let col = self.buckets.iter().position(|b| b == bucket);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Builds the weekday by hour-bucket activity matrix.
pub fn activity_heatmap(selection: &Selection, entries: &[Entry]) -> Heatmap {
    let mut cells: BTreeMap<(u32, u32), usize> = BTreeMap::new();
    let mut weekdays: BTreeMap<u32, &'static str> = BTreeMap::new();
    let mut hours: BTreeSet<u32> = BTreeSet::new();

    for entry in selected(selection, entries) {
        let weekday = entry.timestamp().weekday().num_days_from_monday();
        weekdays.insert(weekday, entry.day_name());
        hours.insert(entry.hour());
        *cells.entry((weekday, entry.hour())).or_default() += 1;
    }

    let counts = weekdays
        .keys()
        .map(|day| {
            hours
                .iter()
                .map(|hour| cells.get(&(*day, *hour)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Heatmap {
        days: weekdays.into_values().collect(),
        buckets: hours.into_iter().map(hour_bucket).collect(),
        counts,
    }
}
