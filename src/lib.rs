//! # Chatlens
//!
//! A Rust library for turning exported WhatsApp chat transcripts into a
//! normalized, classified entry stream and computing activity statistics
//! over it.
//!
//! ## Overview
//!
//! A transcript export is one long text where every message starts with a
//! timestamp marker such as `1/2/23, 10:00 - `. Chatlens:
//!
//! - locates every marker and splits the text into segments
//! - resolves each marker (day-first, then month-first), dropping segments
//!   whose timestamp cannot be read
//! - classifies each segment as an authored message, a group notification,
//!   an empty message, or an unattributable line
//! - builds an [`Entry`] with every calendar field the statistics need
//!
//! Content problems never abort parsing. Lines that cannot be attributed get
//! a sentinel author (`group_notification`, `unknown_user`, `empty_message`,
//! `error_processing`) and stay in the stream.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let transcript = TranscriptParser::new()
//!     .parse_str("1/2/23, 10:00 - Alice: hello\n1/2/23, 10:05 - Bob: hi there");
//!
//! assert_eq!(transcript.status, ParseStatus::Parsed);
//! assert_eq!(transcript.entries.len(), 2);
//! assert_eq!(transcript.entries[1].author(), "Bob");
//!
//! let stats = chat_stats(&Selection::Overall, &transcript.entries);
//! assert_eq!(stats.words, 3);
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), [`Transcript`](parser::Transcript), [`ParseStatus`](parser::ParseStatus)
//! - [`parsing`] - pipeline stages: marker location, timestamp resolution, classification
//! - [`entry`] - [`Entry`], [`Sentinel`](entry::Sentinel), hour buckets
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`AnalyticsConfig`](config::AnalyticsConfig)
//! - [`core`] - derived views and export
//!   - [`core::filter`] - [`FilterConfig`](core::FilterConfig), [`apply_filters`](core::apply_filters)
//!   - [`core::output`] - CSV, JSON and JSONL writers
//! - [`analytics`] - statistics over the entry stream
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `csv-output` | CSV writer |
//! | `json-output` | JSON and JSONL writers |
//! | `parallel` | Classify large transcripts on a rayon pool |
//! | `cli` | Command-line front end |
//! | `full` | All of the above (default) |

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod entry;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use entry::Entry;
pub use error::{ChatlensError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Core record type
    pub use crate::Entry;
    pub use crate::entry::Sentinel;

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Parsing
    pub use crate::parser::{ParseStats, ParseStatus, Transcript, TranscriptParser};

    // Configuration
    pub use crate::config::{AnalyticsConfig, ParserConfig};

    // Filtering and output settings
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::OutputFormat;

    // Analytics
    pub use crate::analytics::{
        Selection, SentimentAnalyzer, StopWords, chat_insights, chat_stats, most_active_users,
        summary_report,
    };
}
