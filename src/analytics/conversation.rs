//! Turn-taking: response times and conversation starters.
//!
//! Both statistics look at participant entries only, ordered by timestamp.
//! Entries with equal timestamps keep their transcript order.

use serde::Serialize;

use super::rank;
use crate::Entry;

fn participants_by_time(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().filter(|e| e.is_participant()).collect();
    sorted.sort_by_key(|e| e.timestamp());
    sorted
}

/// Minutes a participant took to reply to someone else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTime {
    pub responder: String,
    pub minutes: f64,
}

/// Measures the gap before every change of author.
///
/// Consecutive messages from the same author are not responses. Gaps of zero
/// and gaps of `cap_minutes` or more are ignored.
///
/// ```
/// use chatlens::analytics::response_times;
/// use chatlens::parser::TranscriptParser;
///
/// let transcript = TranscriptParser::new().parse_str(
///     "1/2/23, 10:00 - A: one\n1/2/23, 10:05 - A: two\n1/2/23, 10:10 - B: three",
/// );
/// let times = response_times(&transcript.entries, 720);
/// assert_eq!(times.len(), 1);
/// assert_eq!(times[0].responder, "B");
/// assert_eq!(times[0].minutes, 5.0);
/// ```
pub fn response_times(entries: &[Entry], cap_minutes: i64) -> Vec<ResponseTime> {
    let sorted = participants_by_time(entries);
    let cap = cap_minutes as f64;

    sorted
        .windows(2)
        .filter(|pair| pair[0].author() != pair[1].author())
        .filter_map(|pair| {
            let seconds = (pair[1].timestamp() - pair[0].timestamp()).num_seconds();
            let minutes = seconds as f64 / 60.0;
            (minutes > 0.0 && minutes < cap).then(|| ResponseTime {
                responder: pair[1].author().to_string(),
                minutes,
            })
        })
        .collect()
}

/// Average response time per responder, in first-response order.
pub fn mean_response_by_user(times: &[ResponseTime]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64, usize)> = Vec::new();
    for time in times {
        match totals.iter_mut().find(|(name, _, _)| *name == time.responder) {
            Some((_, sum, count)) => {
                *sum += time.minutes;
                *count += 1;
            }
            None => totals.push((time.responder.clone(), time.minutes, 1)),
        }
    }

    totals
        .into_iter()
        .map(|(name, sum, count)| (name, sum / count as f64))
        .collect()
}

/// How many conversations a participant opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarterCount {
    pub user: String,
    pub conversations: usize,
}

/// Counts who starts conversations, most frequent first.
///
/// The first message starts a conversation, and so does any message sent more
/// than `gap_minutes` after the previous one. Fewer than two participant
/// messages yield no result.
pub fn conversation_starters(entries: &[Entry], gap_minutes: i64) -> Vec<StarterCount> {
    let sorted = participants_by_time(entries);
    if sorted.len() < 2 {
        return Vec::new();
    }

    let gap_seconds = gap_minutes * 60;
    let first = sorted.first().map(|e| e.author());
    let later = sorted.windows(2).filter_map(|pair| {
        let seconds = (pair[1].timestamp() - pair[0].timestamp()).num_seconds();
        (seconds > gap_seconds).then_some(pair[1].author())
    });

    rank(first.into_iter().chain(later))
        .into_iter()
        .map(|(user, conversations)| StarterCount {
            user: user.to_string(),
            conversations,
        })
        .collect()
}
