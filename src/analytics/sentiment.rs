//! Sentiment scoring.
//!
//! By default `compound` comes from VADER (`vader_sentiment`), which handles
//! boosters, capitalization, `but` shifts, emoticons and emoji. `polarity` and
//! `subjectivity` come from a [`SentimentLexicon`]: each message is tokenized
//! into lower-cased words, and a negator (`not`, `never`, `don't`, ...) flips
//! the sign of the next scored word.
//!
//! - `polarity` is the mean of `valence / 4`, clamped to `[-1, 1]`
//! - `subjectivity` is the mean subjectivity of the scored words
//!
//! An analyzer built with [`SentimentAnalyzer::with_lexicon`] takes `compound`
//! from its lexicon as well, normalizing the summed valence into `(-1, 1)`
//! with `s / sqrt(s² + 15)`. Use it for languages VADER does not cover.
//!
//! A message is [`Positive`](SentimentLabel::Positive) when
//! `compound >= 0.05`, [`Negative`](SentimentLabel::Negative) when
//! `compound <= -0.05`, otherwise [`Neutral`](SentimentLabel::Neutral).
//!
//! ```
//! use chatlens::analytics::sentiment::{SentimentAnalyzer, SentimentLabel};
//!
//! let analyzer = SentimentAnalyzer::new();
//! assert_eq!(analyzer.label("this is great"), SentimentLabel::Positive);
//! assert_eq!(analyzer.label("not great"), SentimentLabel::Negative);
//! assert_eq!(analyzer.label("see you at five"), SentimentLabel::Neutral);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use vader_sentiment::SentimentIntensityAnalyzer;

use super::{Selection, is_media, rank};
use crate::Entry;
use crate::error::ChatlensError;

const COMPOUND_ALPHA: f64 = 15.0;
const LABEL_THRESHOLD: f64 = 0.05;
const MAX_VALENCE: f64 = 4.0;

/// Subjectivity assigned to words loaded without an explicit value.
const DEFAULT_SUBJECTIVITY: f64 = 0.5;

const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without", "cannot",
    "can't", "cant", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt",
    "wasn't", "wasnt", "won't", "wont", "aren't", "arent", "shouldn't", "wouldn't",
];

// (word, valence in [-4, 4], subjectivity in [0, 1])
const BUILTIN_LEXICON: &[(&str, f64, f64)] = &[
    ("amazing", 2.8, 0.9),
    ("angry", -2.3, 1.0),
    ("annoying", -1.7, 0.8),
    ("awesome", 3.1, 1.0),
    ("awful", -2.0, 1.0),
    ("bad", -2.5, 0.67),
    ("beautiful", 2.9, 1.0),
    ("best", 3.2, 0.3),
    ("bored", -1.1, 0.7),
    ("boring", -1.3, 1.0),
    ("congrats", 2.4, 0.6),
    ("congratulations", 2.9, 0.6),
    ("cool", 1.3, 0.65),
    ("crazy", -1.4, 0.9),
    ("cry", -2.1, 0.6),
    ("enjoy", 2.2, 0.5),
    ("excellent", 2.7, 1.0),
    ("excited", 1.4, 0.75),
    ("fail", -2.5, 0.5),
    ("fine", 0.8, 0.5),
    ("fun", 2.3, 0.2),
    ("glad", 2.0, 1.0),
    ("good", 1.9, 0.6),
    ("great", 3.1, 0.75),
    ("haha", 1.6, 0.3),
    ("happy", 2.7, 1.0),
    ("hate", -2.7, 0.9),
    ("hope", 1.9, 0.5),
    ("horrible", -2.5, 1.0),
    ("hurt", -2.4, 0.8),
    ("kill", -3.7, 0.5),
    ("lol", 1.8, 0.7),
    ("lose", -1.3, 0.4),
    ("love", 3.2, 0.6),
    ("miss", -0.6, 0.4),
    ("nice", 1.8, 1.0),
    ("ok", 0.9, 0.5),
    ("okay", 0.9, 0.5),
    ("pain", -2.3, 0.7),
    ("perfect", 2.7, 1.0),
    ("poor", -2.1, 0.6),
    ("problem", -1.7, 0.4),
    ("sad", -2.1, 1.0),
    ("sick", -2.3, 0.9),
    ("sorry", -0.3, 1.0),
    ("stupid", -2.4, 1.0),
    ("terrible", -2.1, 1.0),
    ("thank", 1.5, 0.4),
    ("thanks", 1.9, 0.4),
    ("tired", -1.9, 0.7),
    ("ugly", -2.3, 1.0),
    ("upset", -1.6, 0.8),
    ("welcome", 2.0, 0.5),
    ("win", 2.8, 0.4),
    ("wonderful", 2.7, 1.0),
    ("worried", -1.2, 0.7),
    ("worst", -3.1, 1.0),
    ("wow", 2.8, 0.9),
    ("wrong", -2.1, 0.9),
    ("yay", 2.4, 0.8),
];

/// Sentiment class of one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classifies a compound score.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score of one lexicon word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WordScore {
    /// Valence in `[-4, 4]`
    pub valence: f64,
    /// Subjectivity in `[0, 1]`
    pub subjectivity: f64,
}

/// Word-to-score table used by [`SentimentAnalyzer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentLexicon {
    words: HashMap<String, WordScore>,
}

impl SentimentLexicon {
    /// Creates an empty lexicon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the compact built-in English lexicon.
    pub fn builtin() -> Self {
        let mut lexicon = Self::empty();
        for &(word, valence, subjectivity) in BUILTIN_LEXICON {
            lexicon.insert(word, WordScore { valence, subjectivity });
        }
        lexicon
    }

    /// Adds or replaces a word. The word is stored lower-cased.
    pub fn insert(&mut self, word: &str, score: WordScore) {
        self.words.insert(word.to_lowercase(), score);
    }

    /// Adds every word of `other`, replacing existing entries.
    pub fn extend(&mut self, other: SentimentLexicon) {
        self.words.extend(other.words);
    }

    pub fn get(&self, word: &str) -> Option<WordScore> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Parses a tab-separated lexicon: `word<TAB>valence[<TAB>subjectivity]`.
    ///
    /// Blank lines and lines starting with `#` are skipped. Missing
    /// subjectivity defaults to 0.5.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::Lexicon`] for a line with a missing or
    /// non-numeric valence.
    pub fn parse_tsv(text: &str) -> Result<Self, ChatlensError> {
        let mut lexicon = Self::empty();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let word = fields.next().unwrap_or_default().trim();
            let valence = fields
                .next()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .ok_or_else(|| ChatlensError::lexicon(idx + 1, "missing or invalid valence"))?;
            let subjectivity = match fields.next() {
                Some(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ChatlensError::lexicon(idx + 1, "invalid subjectivity"))?,
                None => DEFAULT_SUBJECTIVITY,
            };

            if word.is_empty() {
                return Err(ChatlensError::lexicon(idx + 1, "empty word"));
            }
            lexicon.insert(
                word,
                WordScore {
                    valence: valence.clamp(-MAX_VALENCE, MAX_VALENCE),
                    subjectivity: subjectivity.clamp(0.0, 1.0),
                },
            );
        }

        Ok(lexicon)
    }

    /// Loads a tab-separated lexicon file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`ChatlensError::Lexicon`] if a line is malformed.
    pub fn load(path: &Path) -> Result<Self, ChatlensError> {
        let text = fs::read_to_string(path)?;
        Self::parse_tsv(&text)
    }
}

/// Scores of one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentScores {
    pub compound: f64,
    pub polarity: f64,
    pub subjectivity: f64,
}

impl SentimentScores {
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

/// Where the compound score of a [`SentimentAnalyzer`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompoundSource {
    Vader,
    Lexicon,
}

/// Scores text with VADER and a polarity/subjectivity lexicon.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: SentimentLexicon,
    compound: CompoundSource,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    /// Creates an analyzer scoring `compound` with VADER.
    pub fn new() -> Self {
        Self {
            lexicon: SentimentLexicon::builtin(),
            compound: CompoundSource::Vader,
        }
    }

    /// Creates an analyzer scoring every value from `lexicon` alone.
    pub fn with_lexicon(lexicon: SentimentLexicon) -> Self {
        Self {
            lexicon,
            compound: CompoundSource::Lexicon,
        }
    }

    pub fn lexicon(&self) -> &SentimentLexicon {
        &self.lexicon
    }

    pub fn compound_source(&self) -> CompoundSource {
        self.compound
    }

    /// Scores one piece of text.
    pub fn score(&self, text: &str) -> SentimentScores {
        let lexical = self.score_lexicon(text);
        match self.compound {
            CompoundSource::Lexicon => lexical,
            CompoundSource::Vader => SentimentScores {
                compound: vader_compound(text),
                ..lexical
            },
        }
    }

    /// Text with no lexicon words scores zero.
    fn score_lexicon(&self, text: &str) -> SentimentScores {
        let lowered = text.to_lowercase();
        let mut sum = 0.0;
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut matched = 0usize;
        let mut negate = false;

        for token in lowered.split_whitespace().map(trim_token) {
            if token.is_empty() {
                continue;
            }
            if NEGATORS.contains(&token) {
                negate = true;
                continue;
            }
            let Some(score) = self.lexicon.get(token) else {
                continue;
            };

            let valence = if negate { -score.valence } else { score.valence };
            negate = false;

            sum += valence;
            polarity_sum += (valence / MAX_VALENCE).clamp(-1.0, 1.0);
            subjectivity_sum += score.subjectivity;
            matched += 1;
        }

        if matched == 0 {
            return SentimentScores::default();
        }

        let n = matched as f64;
        SentimentScores {
            compound: sum / (sum * sum + COMPOUND_ALPHA).sqrt(),
            polarity: polarity_sum / n,
            subjectivity: subjectivity_sum / n,
        }
    }

    pub fn label(&self, text: &str) -> SentimentLabel {
        self.score(text).label()
    }
}

fn vader_compound(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    SentimentIntensityAnalyzer::new()
        .polarity_scores(text)
        .get("compound")
        .copied()
        .unwrap_or(0.0)
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
}

/// Sentiment of one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentRecord {
    /// Position of the entry in the analyzed slice
    pub index: usize,
    pub author: String,
    pub label: SentimentLabel,
    pub compound: f64,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Scores every non-media message of the selection, in entry order.
pub fn analyze_sentiment(
    selection: &Selection,
    entries: &[Entry],
    analyzer: &SentimentAnalyzer,
) -> Vec<SentimentRecord> {
    scored(selection, entries, analyzer)
        .map(|(index, entry, scores)| SentimentRecord {
            index,
            author: entry.author().to_string(),
            label: scores.label(),
            compound: scores.compound,
            polarity: scores.polarity,
            subjectivity: scores.subjectivity,
        })
        .collect()
}

fn scored<'a>(
    selection: &'a Selection,
    entries: &'a [Entry],
    analyzer: &'a SentimentAnalyzer,
) -> impl Iterator<Item = (usize, &'a Entry, SentimentScores)> + 'a {
    entries
        .iter()
        .enumerate()
        .filter(move |(_, entry)| selection.includes(entry) && !is_media(entry.body()))
        .map(move |(index, entry)| (index, entry, analyzer.score(entry.body())))
}

/// Counts messages per label, most common first. Labels with no messages are omitted.
pub fn sentiment_summary(
    selection: &Selection,
    entries: &[Entry],
    analyzer: &SentimentAnalyzer,
) -> Vec<(SentimentLabel, usize)> {
    rank(scored(selection, entries, analyzer).map(|(_, _, scores)| scores.label()))
}

/// Label counts for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDay {
    pub date: NaiveDate,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Counts labels per day, oldest first.
pub fn sentiment_timeline(
    selection: &Selection,
    entries: &[Entry],
    analyzer: &SentimentAnalyzer,
) -> Vec<SentimentDay> {
    let mut days: BTreeMap<NaiveDate, SentimentDay> = BTreeMap::new();

    for (_, entry, scores) in scored(selection, entries, analyzer) {
        let date = entry.specific_date();
        let day = days.entry(date).or_insert_with(|| SentimentDay {
            date,
            ..SentimentDay::default()
        });
        match scores.label() {
            SentimentLabel::Positive => day.positive += 1,
            SentimentLabel::Negative => day.negative += 1,
            SentimentLabel::Neutral => day.neutral += 1,
        }
    }

    days.into_values().collect()
}
