//! Timestamp marker location and segment splitting.
//!
//! A transcript has no explicit message delimiters. Every message starts with
//! a marker such as `1/2/23, 10:00 - ` and runs until the next marker, so
//! finding the markers is the same as finding the message boundaries.

use std::sync::LazyLock;

use regex::Regex;

/// Lexical shape of a timestamp marker:
/// `<d>/<d>/<yy|yyyy>, <h>:<mm>(:<ss>)?( AM|PM)? - `.
pub const TIMESTAMP_PATTERN: &str =
    r"\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?\s-\s";

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern compiles"));

/// One timestamp marker occurrence in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch<'a> {
    /// Byte offset where the marker starts.
    pub start: usize,
    /// Byte offset just past the trailing ` - ` delimiter.
    pub end: usize,
    /// The matched marker, delimiter included.
    pub literal: &'a str,
}

/// A marker together with the text that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub marker: RawMatch<'a>,
    /// Text up to the next marker, whitespace-trimmed. May be empty.
    pub text: &'a str,
    /// Byte offset of `text` in the source.
    pub offset: usize,
}

/// Finds all timestamp markers, left to right and non-overlapping.
///
/// An empty result means the text has no recognizable structure.
pub fn locate(text: &str) -> Vec<RawMatch<'_>> {
    TIMESTAMP_RE
        .find_iter(text)
        .map(|m| RawMatch {
            start: m.start(),
            end: m.end(),
            literal: m.as_str(),
        })
        .collect()
}

/// Slices the text between consecutive markers into segments.
///
/// Segments with empty text are kept; they become `empty_message` entries.
pub fn split<'a>(text: &'a str, matches: &[RawMatch<'a>]) -> Vec<Segment<'a>> {
    matches
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let stop = matches.get(i + 1).map_or(text.len(), |next| next.start);
            let raw = &text[marker.end..stop];
            let lead = raw.len() - raw.trim_start().len();
            Segment {
                marker: *marker,
                text: raw.trim(),
                offset: marker.end + lead,
            }
        })
        .collect()
}
