//! Configuration types for the parser and the analytics layer.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - transcript parsing settings
//! - [`AnalyticsConfig`] - thresholds and resources used by statistics
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::ParserConfig;
//! use chatlens::parser::TranscriptParser;
//!
//! let config = ParserConfig::new()
//!     .with_parallel(false)
//!     .with_lossy_decoding(true);
//!
//! let parser = TranscriptParser::with_config(config);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::parsing::classify::{Classifier, DEFAULT_NOTIFICATION_KEYWORDS};

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_notification_keywords(vec![vec!["pinned a message".to_string()]]);
/// assert_eq!(config.notification_keywords.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Classify segments on a rayon pool (default: true)
    pub parallel: bool,

    /// Minimum number of segments before going parallel (default: 512)
    pub parallel_threshold: usize,

    /// Decode invalid UTF-8 lossily instead of rejecting the input (default: false)
    pub lossy_decoding: bool,

    /// Keyword tuples that mark a group notification
    pub notification_keywords: Vec<Vec<String>>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 512,
            lossy_decoding: false,
            notification_keywords: DEFAULT_NOTIFICATION_KEYWORDS
                .iter()
                .map(|tuple| tuple.iter().map(|kw| (*kw).to_string()).collect())
                .collect(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables parallel classification.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the segment count above which classification goes parallel.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enables or disables lossy UTF-8 decoding in `parse_bytes`.
    #[must_use]
    pub fn with_lossy_decoding(mut self, enabled: bool) -> Self {
        self.lossy_decoding = enabled;
        self
    }

    /// Replaces the notification keyword table.
    #[must_use]
    pub fn with_notification_keywords(mut self, keywords: Vec<Vec<String>>) -> Self {
        self.notification_keywords = keywords;
        self
    }

    /// Builds the classifier described by this configuration.
    pub fn classifier(&self) -> Classifier {
        Classifier::with_keywords(&self.notification_keywords)
    }
}

/// Configuration for the analytics layer.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalyticsConfig;
///
/// let config = AnalyticsConfig::new()
///     .with_stop_words_path("stop_words.txt")
///     .with_conversation_gap_minutes(90);
/// assert_eq!(config.conversation_gap_minutes, 90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Line-delimited stop-word file (default: none)
    pub stop_words_path: Option<PathBuf>,

    /// Number of users in the "most active" ranking (default: 5)
    pub top_users: usize,

    /// Number of words in the common-words table (default: 20)
    pub top_words: usize,

    /// Number of emojis in the emoji table (default: 20)
    pub top_emojis: usize,

    /// Gaps at or above this many minutes are not responses (default: 720)
    pub response_gap_cap_minutes: i64,

    /// Gaps above this many minutes start a new conversation (default: 120)
    pub conversation_gap_minutes: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            stop_words_path: None,
            top_users: 5,
            top_words: 20,
            top_emojis: 20,
            response_gap_cap_minutes: 12 * 60,
            conversation_gap_minutes: 2 * 60,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stop-word file.
    #[must_use]
    pub fn with_stop_words_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stop_words_path = Some(path.into());
        self
    }

    /// Sets the size of the most-active-users ranking.
    #[must_use]
    pub fn with_top_users(mut self, n: usize) -> Self {
        self.top_users = n;
        self
    }

    /// Sets the size of the common-words table.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the size of the emoji table.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    /// Sets the response-time cap in minutes.
    #[must_use]
    pub fn with_response_gap_cap_minutes(mut self, minutes: i64) -> Self {
        self.response_gap_cap_minutes = minutes;
        self
    }

    /// Sets the conversation gap in minutes.
    #[must_use]
    pub fn with_conversation_gap_minutes(mut self, minutes: i64) -> Self {
        self.conversation_gap_minutes = minutes;
        self
    }
}
