//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - top-level arguments (for use with clap)
//! - [`Command`] - the `parse`, `report` and `users` subcommands
//! - [`OutputFormat`] - output format options, convertible to
//!   [`format::OutputFormat`](crate::format::OutputFormat)
//!
//! ```rust
//! use clap::Parser;
//! use chatlens::cli::{Args, Command};
//!
//! let args = Args::parse_from(["chatlens", "report", "chat.txt", "--user", "Alice"]);
//! match args.command {
//!     Command::Report { user, .. } => assert_eq!(user.as_deref(), Some("Alice")),
//!     _ => unreachable!(),
//! }
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Parse and analyze exported WhatsApp chat transcripts.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens parse chat.txt -o entries.csv
    chatlens parse chat.txt -f jsonl --derived --after 2024-01-01
    chatlens report chat.txt --user Alice --stop-words stop_words.txt
    chatlens users chat.txt")]
pub struct Args {
    /// Log debug diagnostics to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write the normalized entry stream to a file
    Parse {
        /// Path to the exported transcript
        input: PathBuf,

        /// Path to output file
        #[arg(short, long, default_value = "entries.csv")]
        output: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Include derived calendar columns (year, month, day, hour bucket...)
        #[arg(long)]
        derived: bool,

        /// Leave out notification and unattributed entries
        #[arg(long)]
        participants_only: bool,

        /// Keep entries on or after this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        after: Option<String>,

        /// Keep entries on or before this date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        before: Option<String>,

        /// Keep entries from this author only
        #[arg(long, value_name = "USER")]
        from: Option<String>,
    },

    /// Print the summary report and headline statistics
    Report {
        /// Path to the exported transcript
        input: PathBuf,

        /// Restrict the report to one author
        #[arg(short, long, value_name = "NAME")]
        user: Option<String>,

        /// Line-delimited stop-word file
        #[arg(long, value_name = "PATH")]
        stop_words: Option<PathBuf>,

        /// Tab-separated sentiment lexicon merged over the built-in one; labels
        /// then come from the lexicon instead of VADER
        #[arg(long, value_name = "PATH")]
        lexicon: Option<PathBuf>,

        /// Number of participants in the activity ranking
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// List participants with their message share
    Users {
        /// Path to the exported transcript
        input: PathBuf,
    },
}

impl Command {
    /// Returns the transcript path of any subcommand.
    pub fn input(&self) -> &PathBuf {
        match self {
            Command::Parse { input, .. }
            | Command::Report { input, .. }
            | Command::Users { input } => input,
        }
    }
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - opens in spreadsheets
/// - [`Json`](OutputFormat::Json) - one structured array
/// - [`Jsonl`](OutputFormat::Jsonl) - one object per line, streams well
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of entries
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::format::OutputFormat::from(*self).fmt(f)
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_defaults() {
        let args = Args::parse_from(["chatlens", "parse", "chat.txt"]);
        assert!(!args.verbose);
        match args.command {
            Command::Parse {
                input,
                output,
                format,
                derived,
                participants_only,
                after,
                ..
            } => {
                assert_eq!(input, PathBuf::from("chat.txt"));
                assert_eq!(output, "entries.csv");
                assert_eq!(format, OutputFormat::Csv);
                assert!(!derived);
                assert!(!participants_only);
                assert!(after.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_subcommand_options() {
        let args = Args::parse_from([
            "chatlens", "-v", "parse", "chat.txt", "-f", "ndjson", "--derived", "--from", "Bob",
            "--after", "2024-01-01",
        ]);
        assert!(args.verbose);
        let Command::Parse {
            format,
            derived,
            from,
            after,
            ..
        } = args.command
        else {
            panic!("expected parse");
        };
        assert_eq!(format, OutputFormat::Jsonl);
        assert!(derived);
        assert_eq!(from.as_deref(), Some("Bob"));
        assert_eq!(after.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_report_and_users_subcommands() {
        let args = Args::parse_from(["chatlens", "report", "chat.txt", "--top", "3", "--verbose"]);
        assert!(args.verbose);
        assert_eq!(args.command.input(), &PathBuf::from("chat.txt"));
        assert!(matches!(args.command, Command::Report { top: 3, .. }));

        let args = Args::parse_from(["chatlens", "users", "other.txt"]);
        assert_eq!(args.command.input(), &PathBuf::from("other.txt"));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Args::try_parse_from(["chatlens"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let lib: crate::format::OutputFormat = OutputFormat::Jsonl.into();
        assert_eq!(lib, crate::format::OutputFormat::Jsonl);
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
    }
}
