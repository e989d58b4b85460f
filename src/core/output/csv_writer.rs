//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::Entry;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

use super::{TIMESTAMP_FORMAT, selected};

/// Writes entries to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Author`, `Body`, plus the derived calendar
///   columns when enabled in `OutputConfig`
/// - Encoding: UTF-8
pub fn write_csv(
    entries: &[Entry],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path)?;
    write_records(entries, file, config)
}

/// Converts entries to a CSV string.
///
/// Same format as `write_csv`, but returns a String instead of writing to file.
pub fn to_csv(entries: &[Entry], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut buffer = Vec::new();
    write_records(entries, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(
    entries: &[Entry],
    sink: W,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(build_header(config))?;
    for entry in selected(entries, config) {
        writer.write_record(build_record(entry, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["Timestamp", "Author", "Body"];

    if config.include_derived {
        header.extend([
            "Year", "MonthNum", "Month", "Day", "DayName", "Date", "Hour", "Minute", "Period",
        ]);
    }

    header
}

/// Build CSV record for a single entry.
fn build_record(entry: &Entry, config: &OutputConfig) -> Vec<String> {
    let mut record = vec![
        entry.timestamp().format(TIMESTAMP_FORMAT).to_string(),
        entry.author().to_string(),
        entry.body().to_string(),
    ];

    if config.include_derived {
        record.extend([
            entry.year().to_string(),
            entry.month_num().to_string(),
            entry.month().to_string(),
            entry.day().to_string(),
            entry.day_name().to_string(),
            entry.specific_date().to_string(),
            entry.hour().to_string(),
            entry.minute().to_string(),
            entry.period().to_string(),
        ]);
    }

    record
}
