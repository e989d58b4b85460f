//! Headline counts, participant ranking and message lengths.

use serde::Serialize;

use super::links::extract_urls;
use super::{Selection, is_media, rank, selected, selected_text};
use crate::Entry;

/// Headline counts for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    /// Messages written by participants
    pub messages: usize,
    /// Whitespace-separated words across those messages
    pub words: usize,
    /// Messages that are omitted-media placeholders
    pub media: usize,
    /// URLs found in message bodies
    pub links: usize,
}

/// Counts messages, words, media placeholders and links.
///
/// Sentinel entries are never counted, for either selection.
pub fn chat_stats(selection: &Selection, entries: &[Entry]) -> ChatStats {
    selected(selection, entries)
        .filter(|e| e.is_participant())
        .fold(ChatStats::default(), |mut stats, entry| {
            let body = entry.body();
            stats.messages += 1;
            stats.words += body.split_whitespace().count();
            stats.links += extract_urls(body).len();
            if is_media(body) {
                stats.media += 1;
            }
            stats
        })
}

/// One participant's share of all participant messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserShare {
    pub name: String,
    /// Percentage rounded to two decimals
    pub percent: f64,
}

/// Most active participants and everyone's share.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActiveUsers {
    /// Top participants by message count
    pub top: Vec<(String, usize)>,
    /// Every participant's share, in the same order as the full ranking
    pub shares: Vec<UserShare>,
}

impl ActiveUsers {
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Ranks participants by message count.
///
/// Sentinel entries are excluded. `top` holds at most `n` participants;
/// `shares` lists all of them.
pub fn most_active_users(entries: &[Entry], n: usize) -> ActiveUsers {
    let ranking = rank(
        entries
            .iter()
            .filter(|e| e.is_participant())
            .map(Entry::author),
    );
    let total: usize = ranking.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return ActiveUsers::default();
    }

    let shares = ranking
        .iter()
        .map(|(name, count)| UserShare {
            name: (*name).to_string(),
            percent: round2(*count as f64 / total as f64 * 100.0),
        })
        .collect();
    let top = ranking
        .into_iter()
        .take(n)
        .map(|(name, count)| (name.to_string(), count))
        .collect();

    ActiveUsers { top, shares }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Character length of one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageLength {
    pub author: String,
    pub length: usize,
}

/// Returns the character length of every non-media message, in entry order.
pub fn message_lengths(selection: &Selection, entries: &[Entry]) -> Vec<MessageLength> {
    selected_text(selection, entries)
        .map(|e| MessageLength {
            author: e.author().to_string(),
            length: e.body().chars().count(),
        })
        .collect()
}
