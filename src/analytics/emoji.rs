//! Emoji frequency.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::{Selection, rank, selected_text};
use crate::Entry;

// Single code points with the Emoji property. ASCII digits, `#` and `*` carry
// the property too and are filtered out by `is_emoji`.
static EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Emoji}").expect("valid emoji regex"));

/// Returns `true` if `c` is an emoji code point.
pub fn is_emoji(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    let mut buf = [0u8; 4];
    EMOJI_RE.is_match(c.encode_utf8(&mut buf))
}

/// Emoji code points of a text, in order.
pub fn emojis_in(text: &str) -> impl Iterator<Item = char> + '_ {
    EMOJI_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().chars().next())
        .filter(|c| !c.is_ascii())
}

/// An emoji and how often it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmojiCount {
    pub emoji: char,
    pub count: usize,
}

/// Returns the `n` most used emojis in non-media messages.
///
/// Multi-code-point sequences are counted per code point, so a skin-tone
/// variant counts both the base emoji and the modifier.
pub fn emoji_frequency(selection: &Selection, entries: &[Entry], n: usize) -> Vec<EmojiCount> {
    rank(selected_text(selection, entries).flat_map(|e| emojis_in(e.body())))
        .into_iter()
        .take(n)
        .map(|(emoji, count)| EmojiCount { emoji, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::entry_at;

    #[test]
    fn test_is_emoji() {
        assert!(is_emoji('😂'));
        assert!(is_emoji('❤'));
        assert!(is_emoji('🎉'));
        assert!(!is_emoji('a'));
        assert!(!is_emoji('1'));
        assert!(!is_emoji('#'));
        assert!(!is_emoji('ভ'));
    }

    #[test]
    fn test_emojis_in() {
        let found: Vec<char> = emojis_in("ha 😂😂 ok 👍 #1").collect();
        assert_eq!(found, vec!['😂', '😂', '👍']);
    }

    #[test]
    fn test_emoji_frequency() {
        let entries = vec![
            entry_at(0, "Alice", "😂 that was funny 😂"),
            entry_at(1, "Bob", "👍"),
            entry_at(2, "Bob", "<Media omitted> 🎉"),
            entry_at(3, "Alice", "👍 sure"),
        ];

        let overall = emoji_frequency(&Selection::Overall, &entries, 20);
        assert_eq!(
            overall,
            vec![
                EmojiCount { emoji: '😂', count: 2 },
                EmojiCount { emoji: '👍', count: 2 },
            ]
        );

        let bob = emoji_frequency(&Selection::user("Bob"), &entries, 20);
        assert_eq!(bob, vec![EmojiCount { emoji: '👍', count: 1 }]);

        assert_eq!(emoji_frequency(&Selection::Overall, &entries, 1).len(), 1);
    }

    #[test]
    fn test_emoji_frequency_empty() {
        assert!(emoji_frequency(&Selection::Overall, &[], 20).is_empty());
    }
}
