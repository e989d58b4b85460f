//! Statistics over the normalized entry stream.
//!
//! Every function here is a read-only pass over a slice of [`Entry`] values
//! and returns an empty or zero result for empty input.
//!
//! Most statistics take a [`Selection`]: [`Selection::Overall`] covers the
//! whole transcript, [`Selection::User`] narrows to one author. Which
//! statistics skip sentinel authors (notifications, unattributed lines) is
//! documented per function.
//!
//! | Module | Statistics |
//! |--------|------------|
//! | [`stats`] | message/word/media/link counts, active users, message lengths |
//! | [`words`] | stop words, word-cloud tokens, common words |
//! | [`timeline`] | monthly/daily counts, weekday/month activity, heatmap |
//! | [`sentiment`] | VADER and lexicon scoring, per-message labels, summaries |
//! | [`emoji`] | emoji frequency |
//! | [`links`] | URL extraction, domain frequency |
//! | [`conversation`] | response times, conversation starters |
//! | [`insights`] | aggregated insights and the text report |
//!
//! # Example
//!
//! ```
//! use chatlens::analytics::{Selection, stats::chat_stats};
//! use chatlens::parser::TranscriptParser;
//!
//! let transcript = TranscriptParser::new().parse_str(
//!     "1/2/23, 10:00 - Alice: see https://example.com\n1/2/23, 10:05 - Bob: <Media omitted>",
//! );
//!
//! let stats = chat_stats(&Selection::Overall, &transcript.entries);
//! assert_eq!(stats.messages, 2);
//! assert_eq!(stats.media, 1);
//! assert_eq!(stats.links, 1);
//! ```

pub mod conversation;
pub mod emoji;
pub mod insights;
pub mod links;
pub mod sentiment;
pub mod stats;
pub mod timeline;
pub mod words;

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::Entry;

pub use conversation::{
    ResponseTime, StarterCount, conversation_starters, mean_response_by_user, response_times,
};
pub use emoji::{EmojiCount, emoji_frequency};
pub use insights::{ChatInsights, chat_insights, summary_report};
pub use links::{DomainCount, extract_urls, url_domains};
pub use sentiment::{
    CompoundSource, SentimentAnalyzer, SentimentLabel, SentimentLexicon, SentimentRecord,
    analyze_sentiment, sentiment_summary, sentiment_timeline,
};
pub use stats::{ActiveUsers, ChatStats, chat_stats, message_lengths, most_active_users};
pub use timeline::{
    Heatmap, activity_heatmap, daily_timeline, month_activity, monthly_timeline, weekday_activity,
};
pub use words::{StopWords, WordCount, most_common_words, word_cloud_tokens};

/// Body text WhatsApp writes in place of attachments when media is excluded.
pub const MEDIA_PLACEHOLDER: &str = "<Media omitted>";

const MEDIA_PLACEHOLDER_LOWER: &str = "<media omitted>";

/// Which part of the transcript a statistic covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Selection {
    /// Every entry in the transcript.
    #[default]
    Overall,
    /// Entries written by one author (exact match).
    User(String),
}

impl Selection {
    /// Selects a single author.
    pub fn user(name: impl Into<String>) -> Self {
        Selection::User(name.into())
    }

    /// Maps an optional author name to a selection.
    ///
    /// `None` and the literal `"Overall"` both select the whole transcript.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None | Some("Overall") => Selection::Overall,
            Some(user) => Selection::User(user.to_string()),
        }
    }

    /// Returns the display label used in reports.
    pub fn label(&self) -> &str {
        match self {
            Selection::Overall => "Overall",
            Selection::User(name) => name,
        }
    }

    pub fn is_overall(&self) -> bool {
        matches!(self, Selection::Overall)
    }

    /// Returns `true` if the entry belongs to this selection.
    pub fn includes(&self, entry: &Entry) -> bool {
        match self {
            Selection::Overall => true,
            Selection::User(name) => entry.author() == name,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns `true` if the body is an omitted-media placeholder (case-insensitive).
pub fn is_media(body: &str) -> bool {
    body.to_lowercase().contains(MEDIA_PLACEHOLDER_LOWER)
}

pub(crate) fn selected<'a>(
    selection: &'a Selection,
    entries: &'a [Entry],
) -> impl Iterator<Item = &'a Entry> + 'a {
    entries.iter().filter(move |e| selection.includes(e))
}

/// Selected entries whose body is real text rather than a media placeholder.
pub(crate) fn selected_text<'a>(
    selection: &'a Selection,
    entries: &'a [Entry],
) -> impl Iterator<Item = &'a Entry> + 'a {
    selected(selection, entries).filter(|e| !is_media(e.body()))
}

/// Counts occurrences and orders them by count, descending.
///
/// Ties keep the order of first appearance.
pub(crate) fn rank<K, I>(items: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for item in items {
        match index.get(&item) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
