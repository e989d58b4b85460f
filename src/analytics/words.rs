//! Stop-word filtering and word frequency.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use super::{Selection, rank, selected_text};
use crate::Entry;
use crate::config::AnalyticsConfig;

/// A set of words ignored by word statistics.
///
/// Lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Parses line-delimited text, one word per line. Blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    /// Loads a line-delimited stop-word file.
    ///
    /// A missing or unreadable file is not an error: a warning is logged and
    /// the returned set is empty.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => {
                let words = Self::parse(&text);
                debug!(path = %path.display(), count = words.len(), "loaded stop words");
                words
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "stop-word file not found, using an empty set");
                Self::new()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read stop-word file, using an empty set");
                Self::new()
            }
        }
    }

    /// Loads the file named by the configuration, or returns an empty set.
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        config
            .stop_words_path
            .as_deref()
            .map_or_else(Self::new, Self::load)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Returns the tokens a word cloud would be drawn from.
///
/// Tokens come from non-media messages split on whitespace, keep their
/// original case, and must be longer than one character and not a stop word.
pub fn word_cloud_tokens(
    selection: &Selection,
    entries: &[Entry],
    stop_words: &StopWords,
) -> Vec<String> {
    selected_text(selection, entries)
        .flat_map(|e| e.body().split_whitespace())
        .filter(|w| w.chars().count() > 1 && !stop_words.contains(w))
        .map(str::to_string)
        .collect()
}

/// A word and its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Returns the `n` most frequent words in non-media messages.
///
/// Words are lower-cased and must be purely alphabetic, longer than one
/// character and not a stop word. Ties keep first-occurrence order.
pub fn most_common_words(
    selection: &Selection,
    entries: &[Entry],
    stop_words: &StopWords,
    n: usize,
) -> Vec<WordCount> {
    let words = selected_text(selection, entries).flat_map(|e| {
        e.body()
            .to_lowercase()
            .split_whitespace()
            .filter(|w| {
                w.chars().count() > 1
                    && w.chars().all(char::is_alphabetic)
                    && !stop_words.contains(w)
            })
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    rank(words)
        .into_iter()
        .take(n)
        .map(|(word, count)| WordCount { word, count })
        .collect()
}
