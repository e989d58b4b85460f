//! End-to-end CLI tests for chatlens.
//!
//! These tests verify the complete CLI workflow by running the actual binary
//! with various arguments and checking the output.
//!
//! # Test Categories
//!
//! - **parse**: entry export in every format, with filters and flags
//! - **report**: summary report, per-user selection, stop words, lexicon
//! - **users**: participant listing
//! - **Error handling**: empty and unreadable transcripts, bad arguments
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const CHAT: &str = "\
1/2/23, 09:58 - Messages and calls are end-to-end encrypted. No one outside of this chat can read them.
1/2/23, 10:00 - Alice: Good morning, great day!
1/2/23, 10:05 - Bob: morning 😀
1/2/23, 10:06 - Bob: <Media omitted>
1/2/23, 10:30 - Carol: plans at https://www.example.com/plans
1/2/23, 14:00 - Carol left
3/2/23, 09:00 - Bob: anyone up; \"really\"?
3/2/23, 09:10 - Alice: terrible weather today";

/// Creates a temporary directory with transcript fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("chat.txt"), CHAT).unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    fs::write(dir.path().join("notes.txt"), "shopping list\nmilk\neggs").unwrap();
    fs::write(
        dir.path().join("bad_dates.txt"),
        "31/31/23, 10:00 - Alice: x\n40/40/23, 10:00 - Bob: y",
    )
    .unwrap();
    fs::write(dir.path().join("stop_words.txt"), "good\nmorning\n").unwrap();
    fs::write(dir.path().join("lexicon.tsv"), "weather\t3.0\n").unwrap();

    dir
}

fn chatlens_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatlens"));
    Command::from_std(cmd)
}

fn fixture(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// parse
// ============================================================================

mod parse_command {
    use super::*;

    #[test]
    fn test_parse_to_csv() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatlens_cmd()
            .args(["parse", &fixture(&fixtures, "chat.txt"), "-o"])
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 8 entries"))
            .stdout(predicate::str::contains("Done"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Timestamp;Author;Body\n"));
        assert!(content.contains("2023-02-01 10:00:00;Alice;Good morning, great day!"));
        assert!(content.contains("group_notification;Carol left"));
        assert!(content.contains("\"anyone up; \"\"really\"\"?\""));
    }

    #[test]
    fn test_parse_to_json_with_derived() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.json");

        chatlens_cmd()
            .args(["parse", &fixture(&fixtures, "chat.txt"), "-f", "json", "--derived", "-o"])
            .arg(&output)
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 8);
        assert_eq!(entries[1]["author"], "Alice");
        assert_eq!(entries[1]["day_name"], "Wednesday");
        assert_eq!(entries[1]["period"], "10-11");
    }

    #[test]
    fn test_parse_to_jsonl_participants_only() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.jsonl");

        chatlens_cmd()
            .args(["parse", &fixture(&fixtures, "chat.txt"), "-f", "ndjson"])
            .arg("--participants-only")
            .arg("-o")
            .arg(&output)
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_ne!(value["author"], "group_notification");
        }
    }

    #[test]
    fn test_parse_default_output_follows_format() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .current_dir(fixtures.path())
            .args(["parse", "chat.txt", "-f", "jsonl"])
            .assert()
            .success();

        assert!(fixtures.path().join("entries.jsonl").exists());
        assert!(!fixtures.path().join("entries.csv").exists());
    }

    #[test]
    fn test_parse_with_filters() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "filtered.csv");

        chatlens_cmd()
            .args([
                "parse",
                &fixture(&fixtures, "chat.txt"),
                "--after",
                "2023-02-02",
                "--from",
                "alice",
                "-o",
            ])
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("1 of 8 entries kept"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("terrible weather today"));
        assert!(!content.contains("Good morning"));
    }

    #[test]
    fn test_parse_invalid_date_filter() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["parse", &fixture(&fixtures, "chat.txt"), "--after", "02/01/2023"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid date"));
    }
}

// ============================================================================
// report / users
// ============================================================================

mod report_command {
    use super::*;

    #[test]
    fn test_report_overall() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["report", &fixture(&fixtures, "chat.txt")])
            .assert()
            .success()
            .stdout(predicate::str::contains("Analysis Summary for: Overall"))
            .stdout(predicate::str::contains("Total Messages: 8"))
            .stdout(predicate::str::contains("Sentiment Overview:"))
            .stdout(predicate::str::contains("Media:     1"))
            .stdout(predicate::str::contains("example.com"))
            .stdout(predicate::str::contains("Most active:"))
            .stdout(predicate::str::contains("Conversation starters:"));
    }

    #[test]
    fn test_report_for_user_skips_group_sections() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["report", &fixture(&fixtures, "chat.txt"), "--user", "Bob"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Analysis Summary for: Bob"))
            .stdout(predicate::str::contains("Total Messages: 3"))
            .stdout(predicate::str::contains("Most active:").not());
    }

    #[test]
    fn test_report_unknown_user() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["report", &fixture(&fixtures, "chat.txt"), "-u", "Nobody"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No data available."));
    }

    #[test]
    fn test_report_with_stop_words() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["report", &fixture(&fixtures, "chat.txt"), "--stop-words"])
            .arg(fixture(&fixtures, "stop_words.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains("- morning:").not());
    }

    #[test]
    fn test_report_with_missing_stop_words_still_runs() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["report", &fixture(&fixtures, "chat.txt"), "--stop-words"])
            .arg(fixture(&fixtures, "missing.txt"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Top 5 Most Common Words:"));
    }

    #[test]
    fn test_report_with_lexicon() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["report", &fixture(&fixtures, "chat.txt"), "--lexicon"])
            .arg(fixture(&fixtures, "lexicon.tsv"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Sentiment Overview:"));
    }

    #[test]
    fn test_report_with_malformed_lexicon() {
        let fixtures = setup_fixtures();
        let lexicon = output_path(&fixtures, "broken.tsv");
        fs::write(&lexicon, "weather\tvery\n").unwrap();

        chatlens_cmd()
            .args(["report", &fixture(&fixtures, "chat.txt"), "--lexicon"])
            .arg(&lexicon)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid lexicon at line 1"));
    }

    #[test]
    fn test_users_lists_participants() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["users", &fixture(&fixtures, "chat.txt")])
            .assert()
            .success()
            .stdout(predicate::str::contains("Participants: 3"))
            .stdout(predicate::str::contains("Bob"))
            .stdout(predicate::str::contains("group_notification").not());
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_empty_file_exits_with_guidance() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["users", &fixture(&fixtures, "empty.txt")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("empty"))
            .stderr(predicate::str::contains("Export chat"));
    }

    #[test]
    fn test_file_without_timestamps() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["report", &fixture(&fixtures, "notes.txt")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No timestamped lines"));
    }

    #[test]
    fn test_file_with_unreadable_dates() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["parse", &fixture(&fixtures, "bad_dates.txt")])
            .current_dir(fixtures.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("none could be read"));

        assert!(!fixtures.path().join("entries.csv").exists());
    }

    #[test]
    fn test_missing_input_file() {
        chatlens_cmd()
            .args(["users", "/nonexistent/chat.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_unknown_format() {
        let fixtures = setup_fixtures();

        chatlens_cmd()
            .args(["parse", &fixture(&fixtures, "chat.txt"), "-f", "xml"])
            .assert()
            .failure();
    }

    #[test]
    fn test_missing_subcommand() {
        chatlens_cmd().assert().failure();
    }

    #[test]
    fn test_version_flag() {
        chatlens_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("chatlens"));
    }
}
