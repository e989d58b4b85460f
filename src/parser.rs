//! Transcript parsing pipeline.
//!
//! [`TranscriptParser`] runs the stages from [`parsing`](crate::parsing) in a
//! single forward pass:
//!
//! ```text
//! raw text → locate markers → split segments → resolve timestamps
//!          → classify segments → build entries
//! ```
//!
//! Content problems never abort the pass. A transcript without markers, or
//! whose markers all fail to resolve, yields an empty [`Transcript`] whose
//! [`ParseStatus`] says why.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::{ParseStatus, TranscriptParser};
//!
//! let parser = TranscriptParser::new();
//! let transcript = parser.parse_str("1/2/23, 10:00 - Alice: hello\n1/2/23, 10:05 - Bob: hi there");
//!
//! assert_eq!(transcript.status, ParseStatus::Parsed);
//! assert_eq!(transcript.entries.len(), 2);
//! assert_eq!(transcript.entries[1].author(), "Bob");
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::Entry;
use crate::config::ParserConfig;
use crate::entry::Sentinel;
use crate::error::ChatlensError;
use crate::parsing::classify::{Classification, ClassifyError, Classifier};
use crate::parsing::decode::{decode_lossy, first_replacement};
use crate::parsing::locator::{locate, split};
use crate::parsing::timestamp::resolve_timestamp;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of a parse, distinguishing the ways a transcript can come out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    /// The input was empty or not text.
    InvalidInput,
    /// No timestamp markers were found.
    NoTimestamps,
    /// Markers were found but none resolved to a valid moment.
    NoResolvableTimestamps,
    /// At least one entry was produced.
    Parsed,
}

impl ParseStatus {
    /// Human-readable explanation suitable for showing to a user.
    pub fn diagnostic(self) -> &'static str {
        match self {
            ParseStatus::InvalidInput => {
                "Input is empty or not valid text. Export the chat again as a .txt file."
            }
            ParseStatus::NoTimestamps => {
                "No timestamped lines were found. Make sure the file is an unmodified chat export."
            }
            ParseStatus::NoResolvableTimestamps => {
                "Timestamps were found but none could be read as a valid date."
            }
            ParseStatus::Parsed => "Chat parsed successfully.",
        }
    }

    /// Returns `true` if entries were produced.
    pub fn is_parsed(self) -> bool {
        self == ParseStatus::Parsed
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diagnostic())
    }
}

/// Counters collected during a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Timestamp markers located.
    pub markers: usize,
    /// Segments whose timestamp could not be resolved.
    pub dropped: usize,
    /// Entries attributed to a participant.
    pub authored: usize,
    pub notifications: usize,
    pub unknown: usize,
    pub empty: usize,
    pub errors: usize,
}

impl ParseStats {
    fn record(&mut self, entry: &Entry) {
        match entry.sentinel() {
            None => self.authored += 1,
            Some(Sentinel::GroupNotification) => self.notifications += 1,
            Some(Sentinel::UnknownUser) => self.unknown += 1,
            Some(Sentinel::EmptyMessage) => self.empty += 1,
            Some(Sentinel::ErrorProcessing) => self.errors += 1,
        }
    }

    /// Total number of entries produced.
    pub fn entries(&self) -> usize {
        self.authored + self.notifications + self.unknown + self.empty + self.errors
    }
}

/// Result of parsing one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub status: ParseStatus,
    /// Entries in source order.
    pub entries: Vec<Entry>,
    pub stats: ParseStats,
}

impl Transcript {
    fn empty(status: ParseStatus, stats: ParseStats) -> Self {
        Self {
            status,
            entries: Vec::new(),
            stats,
        }
    }

    /// Returns `true` if no entries were produced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct participant names, sorted.
    pub fn participants(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.is_participant())
            .map(|e| e.author().to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Consumes the transcript, returning its entries.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

/// Parser for exported chat transcripts.
#[derive(Debug, Clone)]
pub struct TranscriptParser {
    config: ParserConfig,
    classifier: Classifier,
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        let classifier = config.classifier();
        Self { config, classifier }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    ///
    /// Only I/O failures are errors; content problems are reported through
    /// [`Transcript::status`].
    pub fn parse(&self, path: &Path) -> Result<Transcript, ChatlensError> {
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "read transcript");
        Ok(self.parse_bytes(&bytes))
    }

    /// Parses raw bytes.
    ///
    /// Invalid UTF-8 yields [`ParseStatus::InvalidInput`] unless lossy decoding
    /// is enabled, in which case the segments holding damaged bytes become
    /// `error_processing` entries. Valid text is never rejected, whatever
    /// characters it contains.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Transcript {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.parse_str(text),
            Err(e) if self.config.lossy_decoding => {
                let decoded = decode_lossy(bytes);
                warn!(
                    valid_up_to = e.valid_up_to(),
                    replaced = decoded.replacements().len(),
                    "transcript is not valid UTF-8, decoding lossily"
                );
                self.parse_text(&decoded.text, decoded.replacements())
            }
            Err(e) => {
                warn!(error = %e, "transcript is not valid UTF-8");
                Transcript::empty(ParseStatus::InvalidInput, ParseStats::default())
            }
        }
    }

    /// Parses transcript text.
    pub fn parse_str(&self, text: &str) -> Transcript {
        self.parse_text(text, &[])
    }

    /// `replaced` holds the ascending offsets of characters standing in for
    /// undecodable bytes.
    fn parse_text(&self, text: &str, replaced: &[usize]) -> Transcript {
        let mut stats = ParseStats::default();

        if text.trim().is_empty() {
            warn!("{}", ParseStatus::InvalidInput.diagnostic());
            return Transcript::empty(ParseStatus::InvalidInput, stats);
        }

        let markers = locate(text);
        stats.markers = markers.len();
        if markers.is_empty() {
            warn!("{}", ParseStatus::NoTimestamps.diagnostic());
            return Transcript::empty(ParseStatus::NoTimestamps, stats);
        }

        let resolved: Vec<Resolved<'_>> = split(text, &markers)
            .into_iter()
            .filter_map(|segment| match resolve_timestamp(segment.marker.literal) {
                Some(timestamp) => Some(Resolved {
                    timestamp,
                    text: segment.text,
                    damaged_at: first_replacement(replaced, segment.offset, segment.text.len()),
                }),
                None => {
                    debug!(
                        literal = segment.marker.literal.trim(),
                        offset = segment.marker.start,
                        "dropping segment with unresolvable timestamp"
                    );
                    stats.dropped += 1;
                    None
                }
            })
            .collect();

        if stats.dropped > 0 {
            warn!(
                dropped = stats.dropped,
                markers = stats.markers,
                "segments dropped after timestamp resolution failed"
            );
        }

        if resolved.is_empty() {
            warn!("{}", ParseStatus::NoResolvableTimestamps.diagnostic());
            return Transcript::empty(ParseStatus::NoResolvableTimestamps, stats);
        }

        let entries = self.build_entries(&resolved);
        for entry in &entries {
            stats.record(entry);
        }

        info!(
            entries = entries.len(),
            authored = stats.authored,
            notifications = stats.notifications,
            unknown = stats.unknown,
            empty = stats.empty,
            errors = stats.errors,
            "transcript parsed"
        );

        Transcript {
            status: ParseStatus::Parsed,
            entries,
            stats,
        }
    }

    #[cfg(feature = "parallel")]
    fn build_entries(&self, resolved: &[Resolved<'_>]) -> Vec<Entry> {
        if self.config.parallel && resolved.len() >= self.config.parallel_threshold {
            debug!(segments = resolved.len(), "classifying in parallel");
            // Indexed collect keeps source order.
            resolved
                .par_iter()
                .map(|segment| self.build_entry(segment))
                .collect()
        } else {
            self.build_entries_sequential(resolved)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn build_entries(&self, resolved: &[Resolved<'_>]) -> Vec<Entry> {
        self.build_entries_sequential(resolved)
    }

    fn build_entries_sequential(&self, resolved: &[Resolved<'_>]) -> Vec<Entry> {
        resolved
            .iter()
            .map(|segment| self.build_entry(segment))
            .collect()
    }

    fn build_entry(&self, segment: &Resolved<'_>) -> Entry {
        let classification = match segment.check() {
            Ok(()) => self.classifier.classify(segment.text),
            Err(e) => {
                debug!(
                    error = %e,
                    timestamp = %segment.timestamp,
                    "segment could not be classified"
                );
                Classification::failed(segment.text)
            }
        };
        Entry::from_classification(segment.timestamp, classification)
    }
}

/// A segment whose timestamp resolved.
struct Resolved<'a> {
    timestamp: NaiveDateTime,
    text: &'a str,
    /// Offset within `text` of the first character decoded from damaged bytes.
    damaged_at: Option<usize>,
}

impl Resolved<'_> {
    fn check(&self) -> Result<(), ClassifyError> {
        match self.damaged_at {
            Some(offset) => Err(ClassifyError::Undecodable { offset }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_messages() {
        let t = TranscriptParser::new()
            .parse_str("1/2/23, 10:00 - Alice: hello\n1/2/23, 10:05 - Bob: hi there");
        assert_eq!(t.status, ParseStatus::Parsed);
        assert_eq!(t.entries.len(), 2);
        assert_eq!(t.entries[0].author(), "Alice");
        assert_eq!(t.entries[0].body(), "hello");
        assert_eq!(t.entries[1].author(), "Bob");
        assert_eq!(t.entries[1].body(), "hi there");
        assert_eq!(t.stats.authored, 2);
    }

    #[test]
    fn test_status_distinguishes_empty_results() {
        let parser = TranscriptParser::new();
        assert_eq!(parser.parse_str("").status, ParseStatus::InvalidInput);
        assert_eq!(parser.parse_str("   \n").status, ParseStatus::InvalidInput);
        assert_eq!(
            parser.parse_str("hello world").status,
            ParseStatus::NoTimestamps
        );
        let t = parser.parse_str("31/31/23, 10:00 - Alice: hi");
        assert_eq!(t.status, ParseStatus::NoResolvableTimestamps);
        assert_eq!(t.stats.markers, 1);
        assert_eq!(t.stats.dropped, 1);
        assert!(t.is_empty());
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let t = TranscriptParser::new().parse_bytes(b"1/2/23, 10:00 - Alice: caf\xff");
        assert_eq!(t.status, ParseStatus::InvalidInput);
        assert!(t.is_empty());
    }

    #[test]
    fn test_lossy_decoding_marks_damaged_segment() {
        let parser = TranscriptParser::with_config(ParserConfig::new().with_lossy_decoding(true));
        let t = parser.parse_bytes(b"1/2/23, 10:00 - Alice: caf\xff\n1/2/23, 10:01 - Bob: ok");
        assert_eq!(t.status, ParseStatus::Parsed);
        assert_eq!(t.entries[0].author(), "error_processing");
        assert_eq!(t.entries[1].author(), "Bob");
        assert_eq!(t.stats.errors, 1);
    }

    #[test]
    fn test_lossy_decoding_keeps_genuine_replacement_characters() {
        let parser = TranscriptParser::with_config(ParserConfig::new().with_lossy_decoding(true));
        let bytes = "1/2/23, 10:00 - Alice: odd \u{FFFD} glyph\n1/2/23, 10:01 - Bob: caf"
            .bytes()
            .chain([0xff])
            .collect::<Vec<u8>>();
        let t = parser.parse_bytes(&bytes);
        assert_eq!(t.entries[0].author(), "Alice");
        assert_eq!(t.entries[0].body(), "odd \u{FFFD} glyph");
        assert_eq!(t.entries[1].author(), "error_processing");
        assert_eq!(t.entries[1].body(), "Bob: caf\u{FFFD}");
    }

    #[test]
    fn test_valid_text_with_replacement_or_nul_keeps_author() {
        let t = TranscriptParser::new().parse_str(
            "1/2/23, 10:00 - Alice: look at this \u{FFFD} emoji\n1/2/23, 10:01 - Bob: x\u{0}y",
        );
        assert_eq!(t.entries[0].author(), "Alice");
        assert_eq!(t.entries[0].body(), "look at this \u{FFFD} emoji");
        assert_eq!(t.entries[1].author(), "Bob");
        assert_eq!(t.entries[1].body(), "x\u{0}y");
        assert_eq!(t.stats.errors, 0);

        let strict = TranscriptParser::new()
            .parse_bytes("1/2/23, 10:00 - Alice: a \u{FFFD} b".as_bytes());
        assert_eq!(strict.entries[0].author(), "Alice");
    }

    #[test]
    fn test_dropped_segment_keeps_others() {
        let t = TranscriptParser::new()
            .parse_str("1/2/23, 10:00 - Alice: a\n31/31/23, 10:01 - Bob: b\n1/2/23, 10:02 - Carol: c");
        assert_eq!(t.entries.len(), 2);
        assert_eq!(t.entries[0].author(), "Alice");
        // Bob's marker failed, so his text is lost along with it.
        assert_eq!(t.entries[1].author(), "Carol");
        assert_eq!(t.stats.dropped, 1);
    }

    #[test]
    fn test_participants_exclude_sentinels() {
        let t = TranscriptParser::new().parse_str(
            "1/2/23, 10:00 - Bob: a\n1/2/23, 10:01 - Alice left\n1/2/23, 10:02 - Alice: b\n1/2/23, 10:03 - Bob: c",
        );
        assert_eq!(t.participants(), vec!["Alice", "Bob"]);
        assert_eq!(t.stats.notifications, 1);
        assert_eq!(t.stats.entries(), 4);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text: String = (0..40)
            .map(|i| format!("3/4/23, 10:{:02} - User{}: message {}\n", i, i % 3, i))
            .collect();
        let sequential =
            TranscriptParser::with_config(ParserConfig::new().with_parallel(false)).parse_str(&text);
        let parallel = TranscriptParser::with_config(ParserConfig::new().with_parallel_threshold(1))
            .parse_str(&text);
        assert_eq!(sequential, parallel);
        assert_eq!(parallel.entries.len(), 40);
    }

    #[test]
    fn test_parse_missing_file_is_io_error() {
        let err = TranscriptParser::new()
            .parse(Path::new("/definitely/not/here/chat.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
