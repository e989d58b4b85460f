//! JSON Lines (JSONL) output writer.
//!
//! One entry per line, which suits streaming consumers and data pipelines.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::Entry;
use crate::core::models::OutputConfig;
use crate::error::ChatlensError;

use super::{OutputRecord, selected};

/// Writes entries to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"timestamp":"2023-02-01 10:00:00","author":"Alice","body":"hello"}
/// {"timestamp":"2023-02-01 10:05:00","author":"Bob","body":"hi there"}
/// ```
pub fn write_jsonl(
    entries: &[Entry],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(entries, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts entries to a JSONL string.
pub fn to_jsonl(entries: &[Entry], config: &OutputConfig) -> Result<String, ChatlensError> {
    let mut buffer = Vec::new();
    write_lines(entries, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(
    entries: &[Entry],
    writer: &mut W,
    config: &OutputConfig,
) -> Result<(), ChatlensError> {
    for entry in selected(entries, config) {
        let line = serde_json::to_string(&OutputRecord::from_entry(entry, config))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn entry(author: &str, body: &str) -> Entry {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        Entry::build(ts, author, body)
    }

    #[test]
    fn test_write_jsonl_basic() {
        let entries = vec![entry("Alice", "Hello"), entry("Bob", "Hi")];

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&entries, path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["author"], "Alice");
        assert_eq!(first["body"], "Hello");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["author"], "Bob");
    }

    #[test]
    fn test_jsonl_no_array_brackets() {
        let content = to_jsonl(&[entry("Alice", "Hello")], &OutputConfig::new()).unwrap();
        assert!(!content.starts_with('['));
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn test_jsonl_multiline_body_stays_on_one_line() {
        let content = to_jsonl(&[entry("Alice", "a\nb")], &OutputConfig::new()).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains(r#""body":"a\nb""#));
    }
}
