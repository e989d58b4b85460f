//! Derived views over the entry stream and its exports.
//!
//! Entries leave the parser immutable. Everything here either narrows them
//! ([`filter`]) or serializes them ([`output`]), steered by
//! [`OutputConfig`](models::OutputConfig).
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::{FilterConfig, OutputConfig, apply_filters, to_csv};
//! use chatlens::parser::TranscriptParser;
//!
//! let transcript = TranscriptParser::new()
//!     .parse_str("1/2/23, 10:00 - Alice: hi\n1/2/23, 10:01 - Bob: hey");
//! let bob = apply_filters(transcript.into_entries(), &FilterConfig::new().with_author("Bob"));
//!
//! let csv = to_csv(&bob, &OutputConfig::new())?;
//! assert_eq!(csv.lines().count(), 2);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

pub mod filter;
pub mod models;
pub mod output;

pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
