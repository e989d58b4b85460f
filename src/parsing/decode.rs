//! Lossy UTF-8 decoding of raw transcript bytes.
//!
//! A transcript can legitimately contain U+FFFD, so the decoded text alone
//! cannot tell which replacement characters stand for damaged bytes.
//! [`decode_lossy`] records the offset of every replacement it inserts.

/// Text decoded lossily, with the byte offsets of inserted replacements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LossyText {
    pub text: String,
    replaced: Vec<usize>,
}

impl LossyText {
    /// Ascending byte offsets where invalid input was replaced with U+FFFD.
    pub fn replacements(&self) -> &[usize] {
        &self.replaced
    }

    /// Returns `true` if no bytes were replaced.
    pub fn is_clean(&self) -> bool {
        self.replaced.is_empty()
    }
}

/// Decodes bytes, replacing each maximal invalid sequence with U+FFFD.
///
/// The text matches [`String::from_utf8_lossy`].
///
/// ```
/// use chatlens::parsing::decode::decode_lossy;
///
/// let decoded = decode_lossy(b"caf\xff \xef\xbf\xbd");
/// assert_eq!(decoded.text, "caf\u{FFFD} \u{FFFD}");
/// // only the first one replaced damaged input
/// assert_eq!(decoded.replacements(), &[3]);
/// ```
pub fn decode_lossy(bytes: &[u8]) -> LossyText {
    let mut text = String::with_capacity(bytes.len());
    let mut replaced = Vec::new();

    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            replaced.push(text.len());
            text.push(char::REPLACEMENT_CHARACTER);
        }
    }

    LossyText { text, replaced }
}

/// First replacement inside `start..start + len`, relative to `start`.
pub fn first_replacement(replaced: &[usize], start: usize, len: usize) -> Option<usize> {
    let idx = replaced.partition_point(|&at| at < start);
    replaced
        .get(idx)
        .filter(|&&at| at < start + len)
        .map(|&at| at - start)
}
