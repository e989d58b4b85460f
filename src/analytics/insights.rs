//! Aggregated insights and the plain-text summary report.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::links::extract_urls;
use super::sentiment::{SentimentAnalyzer, sentiment_summary};
use super::words::{StopWords, most_common_words};
use super::{Selection, rank, selected};
use crate::Entry;

/// Words listed in the summary report.
const REPORT_TOP_WORDS: usize = 5;

/// First and last day covered by a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Whole days between the first and last message, plus one
    pub duration_days: i64,
}

/// Busiest weekday, hour and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeakActivity {
    pub day: &'static str,
    pub hour: u32,
    pub month: &'static str,
}

/// Headline facts about a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatInsights {
    pub total_messages: usize,
    pub date_range: DateRange,
    pub avg_messages_per_day: f64,
    pub peak: PeakActivity,
    pub total_links: usize,
    pub unique_links: usize,
}

/// Computes insights over every entry of the selection.
///
/// Returns `None` when the selection is empty.
pub fn chat_insights(selection: &Selection, entries: &[Entry]) -> Option<ChatInsights> {
    let chosen: Vec<&Entry> = selected(selection, entries).collect();

    let first = chosen.iter().map(|e| e.timestamp()).min()?;
    let last = chosen.iter().map(|e| e.timestamp()).max()?;
    let duration_days = (last - first).num_days() + 1;

    let peak = PeakActivity {
        day: busiest(chosen.iter().map(|e| e.day_name()))?,
        hour: busiest(chosen.iter().map(|e| e.hour()))?,
        month: busiest(chosen.iter().map(|e| e.month()))?,
    };

    let links: Vec<&str> = chosen.iter().flat_map(|e| extract_urls(e.body())).collect();
    let unique_links = links.iter().collect::<HashSet<_>>().len();

    Some(ChatInsights {
        total_messages: chosen.len(),
        date_range: DateRange {
            start: first.date(),
            end: last.date(),
            duration_days,
        },
        avg_messages_per_day: chosen.len() as f64 / duration_days as f64,
        peak,
        total_links: links.len(),
        unique_links,
    })
}

fn busiest<K, I>(items: I) -> Option<K>
where
    K: Eq + std::hash::Hash + Clone,
    I: IntoIterator<Item = K>,
{
    rank(items).into_iter().next().map(|(key, _)| key)
}

/// Renders a human-readable summary of a selection.
///
/// Returns `"No data available."` when the selection is empty.
///
/// ```
/// use chatlens::analytics::{Selection, SentimentAnalyzer, StopWords, summary_report};
/// use chatlens::parser::TranscriptParser;
///
/// let transcript = TranscriptParser::new().parse_str("1/2/23, 10:00 - Alice: great news");
/// let report = summary_report(
///     &Selection::Overall,
///     &transcript.entries,
///     &SentimentAnalyzer::new(),
///     &StopWords::new(),
/// );
/// assert!(report.starts_with("Analysis Summary for: Overall"));
/// assert!(report.contains("- Positive: 1 messages"));
/// ```
pub fn summary_report(
    selection: &Selection,
    entries: &[Entry],
    analyzer: &SentimentAnalyzer,
    stop_words: &StopWords,
) -> String {
    let Some(insights) = chat_insights(selection, entries) else {
        return "No data available.".to_string();
    };

    let range = insights.date_range;
    let mut lines = vec![
        format!("Analysis Summary for: {}", selection.label()),
        format!("Total Messages: {}", insights.total_messages),
        format!(
            "Date Range: {} to {} ({} days)",
            range.start, range.end, range.duration_days
        ),
        format!("Average Messages/Day: {:.1}", insights.avg_messages_per_day),
        format!("Peak Day: {}", insights.peak.day),
        format!("Peak Hour: {}:00", insights.peak.hour),
        format!("Peak Month: {}", insights.peak.month),
        format!("Total Links Shared: {}", insights.total_links),
        format!("Unique Links Shared: {}", insights.unique_links),
    ];

    let sentiment = sentiment_summary(selection, entries, analyzer);
    if !sentiment.is_empty() {
        lines.push(String::new());
        lines.push("Sentiment Overview:".to_string());
        for (label, count) in sentiment {
            lines.push(format!("- {label}: {count} messages"));
        }
    }

    let words = most_common_words(selection, entries, stop_words, REPORT_TOP_WORDS);
    if !words.is_empty() {
        lines.push(String::new());
        lines.push(format!("Top {REPORT_TOP_WORDS} Most Common Words:"));
        for word in words {
            lines.push(format!("- {}: {} times", word.word, word.count));
        }
    }

    lines.join("\n")
}
