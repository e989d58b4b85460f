//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chatlens::ChatlensError;
use chatlens::analytics::{
    Selection, SentimentAnalyzer, SentimentLexicon, StopWords, chat_stats, conversation_starters,
    emoji_frequency, mean_response_by_user, most_active_users, response_times, summary_report,
    url_domains,
};
use chatlens::cli::{Args, Command, OutputFormat as CliFormat};
use chatlens::config::AnalyticsConfig;
use chatlens::core::{FilterConfig, OutputConfig, apply_filters};
use chatlens::format::{OutputFormat, write_to_format};
use chatlens::parser::{Transcript, TranscriptParser};

/// Domains listed in the report.
const REPORT_DOMAINS: usize = 10;

/// Printed when a transcript yields no entries.
const REEXPORT_HINT: &str = "Open the chat in WhatsApp, choose \"Export chat\" > \"Without media\", and pass the .txt file.";

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "chatlens=debug" } else { "chatlens=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when the transcript held no usable entries.
fn run(args: Args) -> Result<bool, ChatlensError> {
    let transcript = match load(args.command.input())? {
        Some(transcript) => transcript,
        None => return Ok(false),
    };

    match args.command {
        Command::Parse {
            output,
            format,
            derived,
            participants_only,
            after,
            before,
            from,
            ..
        } => {
            let mut filter = FilterConfig::new();
            if let Some(ref after) = after {
                filter = filter.with_date_from(after)?;
                println!("📅 After:   {}", after);
            }
            if let Some(ref before) = before {
                filter = filter.with_date_to(before)?;
                println!("📅 Before:  {}", before);
            }
            if let Some(ref from) = from {
                filter = filter.with_author(from.clone());
                println!("👤 From:    {}", from);
            }

            let mut output_config = OutputConfig::new();
            if derived {
                output_config = output_config.with_derived();
            }
            if participants_only {
                output_config = output_config.without_sentinels();
            }

            write_entries(transcript, &filter, &output, format, &output_config)?;
        }
        Command::Report {
            user,
            stop_words,
            lexicon,
            top,
            ..
        } => {
            let mut config = AnalyticsConfig::new().with_top_users(top);
            if let Some(path) = stop_words {
                config = config.with_stop_words_path(path);
            }
            let analyzer = match lexicon {
                Some(path) => {
                    let mut merged = SentimentLexicon::builtin();
                    merged.extend(SentimentLexicon::load(&path)?);
                    SentimentAnalyzer::with_lexicon(merged)
                }
                None => SentimentAnalyzer::new(),
            };
            let selection = Selection::from_name(user.as_deref());
            print_report(&transcript, &selection, &config, &analyzer);
        }
        Command::Users { .. } => print_users(&transcript),
    }

    Ok(true)
}

/// Parses the transcript, printing the re-export guidance if it is empty.
fn load(input: &Path) -> Result<Option<Transcript>, ChatlensError> {
    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", input.display());

    let start = Instant::now();
    let transcript = TranscriptParser::new().parse(input)?;
    let elapsed = start.elapsed();
    debug!(stats = ?transcript.stats, "parse finished");

    if transcript.is_empty() {
        eprintln!("⚠️  {}", transcript.status.diagnostic());
        eprintln!("   {}", REEXPORT_HINT);
        return Ok(None);
    }

    let stats = &transcript.stats;
    println!(
        "   Found {} entries ({} messages, {} notifications) in {:.2}s",
        stats.entries(),
        stats.authored,
        stats.notifications,
        elapsed.as_secs_f64()
    );
    if stats.dropped > 0 {
        println!("   Skipped {} lines with unreadable timestamps", stats.dropped);
    }
    println!();

    Ok(Some(transcript))
}

fn write_entries(
    transcript: Transcript,
    filter: &FilterConfig,
    output: &str,
    format: CliFormat,
    output_config: &OutputConfig,
) -> Result<(), ChatlensError> {
    let output_path = adjust_output_extension(output, format);
    let total = transcript.entries.len();

    let entries = if filter.is_active() {
        println!("🔍 Filtering entries...");
        let filtered = apply_filters(transcript.into_entries(), filter);
        println!("   {} of {} entries kept", filtered.len(), total);
        filtered
    } else {
        transcript.into_entries()
    };

    let lib_format: OutputFormat = format.into();
    println!("💾 Writing {}...", lib_format);
    let write_start = Instant::now();
    write_to_format(&entries, &output_path, lib_format, output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path);
    Ok(())
}

fn print_report(
    transcript: &Transcript,
    selection: &Selection,
    config: &AnalyticsConfig,
    analyzer: &SentimentAnalyzer,
) {
    let entries = &transcript.entries;
    let stop_words = StopWords::from_config(config);

    println!("{}", summary_report(selection, entries, analyzer, &stop_words));

    let stats = chat_stats(selection, entries);
    println!();
    println!("📊 Counts:");
    println!("   Messages:  {}", stats.messages);
    println!("   Words:     {}", stats.words);
    println!("   Media:     {}", stats.media);
    println!("   Links:     {}", stats.links);

    let emojis = emoji_frequency(selection, entries, config.top_emojis);
    if !emojis.is_empty() {
        let line: Vec<String> = emojis
            .iter()
            .map(|e| format!("{} {}", e.emoji, e.count))
            .collect();
        println!();
        println!("😀 Emojis:    {}", line.join("  "));
    }

    let domains = url_domains(selection, entries);
    if !domains.is_empty() {
        println!();
        println!("🔗 Domains:");
        for domain in domains.iter().take(REPORT_DOMAINS) {
            println!("   {:<24} {}", domain.domain, domain.count);
        }
    }

    if !selection.is_overall() {
        return;
    }

    let active = most_active_users(entries, config.top_users);
    if !active.is_empty() {
        println!();
        println!("👥 Most active:");
        for (name, count) in &active.top {
            println!("   {:<24} {}", name, count);
        }
    }

    let responses = response_times(entries, config.response_gap_cap_minutes);
    if !responses.is_empty() {
        println!();
        println!("⏱️  Average response time:");
        for (name, minutes) in mean_response_by_user(&responses) {
            println!("   {:<24} {:.1} min", name, minutes);
        }
    }

    let starters = conversation_starters(entries, config.conversation_gap_minutes);
    if !starters.is_empty() {
        println!();
        println!("💬 Conversation starters:");
        for starter in &starters {
            println!("   {:<24} {}", starter.user, starter.conversations);
        }
    }
}

fn print_users(transcript: &Transcript) {
    let active = most_active_users(&transcript.entries, usize::MAX);
    println!("👥 Participants: {}", active.shares.len());
    for share in &active.shares {
        println!("   {:<24} {:>6.2}%", share.name, share.percent);
    }
}

/// Adjusts output file extension based on format if using the default output.
fn adjust_output_extension(output: &str, format: CliFormat) -> String {
    if output != "entries.csv" {
        return output.to_string();
    }

    let lib_format: OutputFormat = format.into();
    format!("entries.{}", lib_format.extension())
}
