//! Output format writers for the normalized entry stream.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of entries - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one entry per line - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{to_csv, write_jsonl};
//! use chatlens::core::models::OutputConfig;
//! use chatlens::parser::TranscriptParser;
//!
//! let transcript = TranscriptParser::new().parse_str("1/2/23, 10:00 - Alice: hello");
//! let config = OutputConfig::new().with_derived();
//!
//! write_jsonl(&transcript.entries, "entries.jsonl", &config)?;
//! let csv_string = to_csv(&transcript.entries, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

use serde::Serialize;

use crate::Entry;
use crate::core::models::OutputConfig;

/// Timestamp layout shared by all writers.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flattened entry as written by the JSON writers.
/// Derived columns are only present when enabled in `OutputConfig`.
#[derive(Serialize)]
pub(crate) struct OutputRecord<'a> {
    timestamp: String,
    author: &'a str,
    body: &'a str,
    #[serde(flatten)]
    derived: Option<DerivedColumns<'a>>,
}

#[derive(Serialize)]
pub(crate) struct DerivedColumns<'a> {
    year: i32,
    month_num: u32,
    month: &'a str,
    day: u32,
    day_name: &'a str,
    specific_date: String,
    hour: u32,
    minute: u32,
    period: &'a str,
}

impl<'a> OutputRecord<'a> {
    pub(crate) fn from_entry(entry: &'a Entry, config: &OutputConfig) -> Self {
        Self {
            timestamp: entry.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            author: entry.author(),
            body: entry.body(),
            derived: config.include_derived.then(|| DerivedColumns {
                year: entry.year(),
                month_num: entry.month_num(),
                month: entry.month(),
                day: entry.day(),
                day_name: entry.day_name(),
                specific_date: entry.specific_date().to_string(),
                hour: entry.hour(),
                minute: entry.minute(),
                period: entry.period(),
            }),
        }
    }
}

/// Entries selected for output by `config`, in order.
pub(crate) fn selected<'a>(
    entries: &'a [Entry],
    config: &'a OutputConfig,
) -> impl Iterator<Item = &'a Entry> + 'a {
    entries
        .iter()
        .filter(move |e| config.include_sentinels || e.is_participant())
}
