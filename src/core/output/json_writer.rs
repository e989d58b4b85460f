//! JSON output writer.

use std::fs::File;
use std::io::Write;

use crate::Entry;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

use super::{OutputRecord, selected};

/// Writes entries to JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"timestamp": "2023-02-01 10:00:00", "author": "Alice", "body": "hello"},
///   {"timestamp": "2023-02-01 10:05:00", "author": "Bob", "body": "hi there"}
/// ]
/// ```
pub fn write_json(
    entries: &[Entry],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let json = to_json(entries, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts entries to a pretty-printed JSON array.
pub fn to_json(entries: &[Entry], config: &OutputConfig) -> Result<String, ChatlensError> {
    let records: Vec<OutputRecord<'_>> = selected(entries, config)
        .map(|e| OutputRecord::from_entry(e, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
