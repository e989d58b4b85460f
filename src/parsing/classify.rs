//! Entry classification.
//!
//! Decides what a segment is: an authored `"name: text"` message, a group
//! service notification, an empty marker, or an unattributable line.
//!
//! Order of checks:
//! 1. empty text → [`Classification::Empty`]
//! 2. `"<author>: <body>"` shape → [`Classification::Authored`]
//! 3. all tokens of any keyword tuple present → [`Classification::Notification`]
//! 4. otherwise → [`Classification::Unattributed`]
//!
//! The authored shape wins over keywords, so `"Bob: I left early"` stays Bob's.
//! Classification itself never fails. Segments whose bytes were damaged before
//! lossy decoding are rejected by the parser with a [`ClassifyError`] and
//! stored as [`Classification::Failed`].

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::entry::Sentinel;

/// Keyword tuples identifying group notifications.
///
/// A segment is a notification if its lowercase text contains every token
/// of at least one tuple. Tuples are checked in order; the first hit wins.
pub const DEFAULT_NOTIFICATION_KEYWORDS: &[&[&str]] = &[
    &["added", "to the group"],
    &["left"],
    &["changed the subject"],
    &["changed this group's icon"],
    &["changed the group description"],
    &["messages and calls are end-to-end encrypted"],
    &["created group"],
    &["you were added"],
    &["admin", "promoted"],
    &["admin", "dismissed"],
    &["security code changed"],
    &["joined using this group's invite link"],
    &["was removed"],
    &["you're now an admin"],
];

/// Maximum number of characters kept in the body of a failed entry.
pub const FAILED_BODY_CHARS: usize = 70;

static AUTHORED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([^:]+?):\s+(.*)").expect("authored pattern compiles"));

/// Verdict for a single segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Authored { author: String, body: String },
    Notification { text: String },
    Empty,
    Unattributed { text: String },
    /// Classification failed; `text` is already truncated.
    Failed { text: String },
}

impl Classification {
    /// Builds a failed verdict, keeping the first [`FAILED_BODY_CHARS`] characters.
    pub fn failed(text: &str) -> Self {
        Classification::Failed {
            text: truncate_chars(text, FAILED_BODY_CHARS),
        }
    }

    /// The sentinel tag for non-authored verdicts.
    pub fn sentinel(&self) -> Option<Sentinel> {
        match self {
            Classification::Authored { .. } => None,
            Classification::Notification { .. } => Some(Sentinel::GroupNotification),
            Classification::Empty => Some(Sentinel::EmptyMessage),
            Classification::Unattributed { .. } => Some(Sentinel::UnknownUser),
            Classification::Failed { .. } => Some(Sentinel::ErrorProcessing),
        }
    }

    /// Consumes the verdict into the `(author, body)` pair stored on an entry.
    pub fn into_author_and_body(self) -> (String, String) {
        let tag = self.sentinel().map(|s| s.as_str().to_string());
        match self {
            Classification::Authored { author, body } => (author, body),
            Classification::Empty => (tag.unwrap_or_default(), String::new()),
            Classification::Notification { text }
            | Classification::Unattributed { text }
            | Classification::Failed { text } => (tag.unwrap_or_default(), text),
        }
    }
}

/// Why a segment could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Lossy decoding replaced invalid bytes at this offset of the segment.
    #[error("undecodable bytes at offset {offset}")]
    Undecodable { offset: usize },
}

/// Segment classifier with an injectable notification keyword table.
///
/// # Example
///
/// ```
/// use chatlens::parsing::classify::{Classification, Classifier};
///
/// let classifier = Classifier::new();
/// assert_eq!(
///     classifier.classify("Alice: hello"),
///     Classification::Authored { author: "Alice".into(), body: "hello".into() }
/// );
/// assert!(matches!(
///     classifier.classify("Alice added Bob to the group"),
///     Classification::Notification { .. }
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: Vec<Vec<String>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Creates a classifier using [`DEFAULT_NOTIFICATION_KEYWORDS`].
    pub fn new() -> Self {
        Self::with_keywords(
            DEFAULT_NOTIFICATION_KEYWORDS
                .iter()
                .map(|tuple| tuple.iter().copied()),
        )
    }

    /// Creates a classifier with a custom keyword table.
    ///
    /// Tokens are lower-cased; empty tuples are ignored.
    pub fn with_keywords<I, T, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|tuple| {
                tuple
                    .into_iter()
                    .map(|kw| kw.as_ref().to_lowercase())
                    .collect::<Vec<_>>()
            })
            .filter(|tuple| !tuple.is_empty())
            .collect();
        Self { keywords }
    }

    /// Returns the keyword table in use.
    pub fn keywords(&self) -> &[Vec<String>] {
        &self.keywords
    }

    /// Classifies a segment. Any text, including control characters and
    /// U+FFFD, yields a verdict.
    pub fn classify(&self, text: &str) -> Classification {
        let text = text.trim();
        if text.is_empty() {
            return Classification::Empty;
        }

        if let Some(caps) = AUTHORED_RE.captures(text) {
            let author = caps.get(1).map_or("", |m| m.as_str().trim());
            let body = caps.get(2).map_or("", |m| m.as_str().trim());
            return Classification::Authored {
                author: author.to_string(),
                body: body.to_string(),
            };
        }

        if self.is_notification(text) {
            Classification::Notification {
                text: text.to_string(),
            }
        } else {
            Classification::Unattributed {
                text: text.to_string(),
            }
        }
    }

    /// Returns `true` if the text contains every token of some keyword tuple.
    pub fn is_notification(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .any(|tuple| tuple.iter().all(|kw| lower.contains(kw.as_str())))
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
