//! Output format selection for the entry stream.
//!
//! [`OutputFormat`] does not depend on the CLI, so library callers can pick a
//! writer by name or by file extension and hand entries to
//! [`write_to_format`] or [`to_format_string`].
//!
//! | Format | Extension | Aliases | Feature |
//! |--------|-----------|---------|---------|
//! | CSV | `csv` | | `csv-output` |
//! | JSON | `json` | | `json-output` |
//! | JSON Lines | `jsonl` | `ndjson` | `json-output` |
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatlens::Result<()> {
//! use chatlens::format::{OutputFormat, to_format_string};
//! use chatlens::core::models::OutputConfig;
//! use chatlens::parser::TranscriptParser;
//!
//! let transcript = TranscriptParser::new().parse_str("1/2/23, 10:00 - Alice: hello");
//!
//! let format = OutputFormat::from_path("entries.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! let jsonl = to_format_string(&transcript.entries, format, &OutputConfig::new())?;
//! assert!(jsonl.contains("Alice"));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Entry;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

/// Serialization format for the entry stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-delimited CSV with a header row
    #[default]
    Csv,
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

const FORMATS: [OutputFormat; 3] = [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl];

impl OutputFormat {
    /// File extension without the dot.
    ///
    /// ```rust
    /// use chatlens::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Extra names accepted for this format.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            OutputFormat::Jsonl => &["ndjson"],
            OutputFormat::Csv | OutputFormat::Json => &[],
        }
    }

    /// Every accepted format name, aliases included.
    pub fn all_names() -> Vec<&'static str> {
        FORMATS
            .iter()
            .flat_map(|f| std::iter::once(f.extension()).chain(f.aliases().iter().copied()))
            .collect()
    }

    pub fn all() -> &'static [OutputFormat] {
        &FORMATS
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Looks a format up by name or alias, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        FORMATS
            .into_iter()
            .find(|f| f.extension() == name || f.aliases().contains(&name.as_str()))
    }

    /// Picks the format matching a file's extension.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::UnsupportedFormat`] when the path has no
    /// extension or an unknown one.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatlensError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        Self::from_name(ext).ok_or_else(|| {
            ChatlensError::unsupported_format(
                ext,
                format!("expected one of: {}", Self::all_names().join(", ")),
            )
        })
    }

    fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl FromStr for OutputFormat {
    type Err = ChatlensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            ChatlensError::unsupported_format(
                s,
                format!("expected one of: {}", Self::all_names().join(", ")),
            )
        })
    }
}

/// Writes entries to `path` in the given format.
///
/// # Errors
///
/// Fails when the format's feature is disabled or the file cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    entries: &[Entry],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(entries, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(entries, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(entries, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Renders entries to a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(
    entries: &[Entry],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatlensError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(entries, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(entries, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(entries, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

#[allow(dead_code)]
fn feature_disabled(format: OutputFormat) -> ChatlensError {
    ChatlensError::unsupported_format(
        format.extension(),
        format!("enable the '{}' feature", format.required_feature()),
    )
}
