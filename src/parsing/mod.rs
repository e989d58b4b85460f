//! Transcript parsing stages.
//!
//! The stages run in a fixed order, each consuming the previous one's output:
//!
//! - [`decode`] - lossy UTF-8 decoding that remembers which bytes were damaged
//! - [`locator`] - find timestamp markers and split the text into segments
//! - [`timestamp`] - resolve marker literals (day-first, then month-first)
//! - [`classify`] - decide whether a segment is authored, a notification, or residue
//!
//! [`TranscriptParser`](crate::parser::TranscriptParser) wires them together
//! and builds [`Entry`](crate::Entry) values from the results.

pub mod classify;
pub mod decode;
pub mod locator;
pub mod timestamp;

pub use classify::{Classification, Classifier, ClassifyError, DEFAULT_NOTIFICATION_KEYWORDS};
pub use decode::{LossyText, decode_lossy};
pub use locator::{RawMatch, Segment, TIMESTAMP_PATTERN, locate, split};
pub use timestamp::{DateOrder, resolve_timestamp, try_day_first, try_month_first};
