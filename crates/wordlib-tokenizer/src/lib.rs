//! UTF-8 word tokenizer for wordlib.
//!
//! [`tokenize`] extracts maximal runs of word characters from a byte slice
//! as half-open `(byte_start, byte_end)` spans. The scan is a single pass
//! and allocates nothing; spans always land on code-point boundaries.
//!
//! What counts as a word character:
//!
//! - ASCII letters `A-Z`, `a-z`
//! - every code point at or above U+0080 (a pragmatic stand-in for the
//!   Unicode Letter category)
//! - `'` and `-` when the corresponding config flag is set and the byte is
//!   flanked by word characters on both sides
//!
//! ASCII digits, punctuation, and whitespace separate words. Malformed
//! UTF-8 is tolerated: an invalid byte acts as a one-byte separator and the
//! scan continues behind it.

#![deny(unsafe_code)]

use thiserror::Error;

/// Tokenizer failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// The input contains a NUL byte, which no text document may carry.
    #[error("input contains a NUL byte at offset {0}")]
    NullByte(usize),
}

/// A word occurrence as a half-open byte range into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// First byte of the word (inclusive).
    pub start: usize,
    /// One past the last byte of the word (exclusive).
    pub end: usize,
}

impl Token {
    /// Length of the word in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Tokens are never empty; present for completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Options controlling what joins a word.
#[derive(Debug, Clone, Copy)]
pub struct TokenizerConfig {
    /// Let `'` join two word characters, as in `don't`.
    pub include_apostrophes: bool,
    /// Let `-` join two word characters, as in `well-known`.
    pub include_hyphens: bool,
    /// Discard tokens shorter than this many bytes.
    pub min_length: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { include_apostrophes: true, include_hyphens: false, min_length: 1 }
    }
}

/// How a decoded character participates in tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// Part of a word.
    Word,
    /// `'` or `-` with its config flag set; joins only when flanked.
    Joiner,
    /// Separator (including malformed bytes).
    Other,
}

/// Classify the character starting at `pos` and report its width in bytes.
///
/// Invalid sequences (stray continuation bytes, truncated sequences,
/// out-of-range lead bytes) classify as `Other` with width 1 so the scan
/// resynchronizes on the next byte.
fn classify(text: &[u8], pos: usize, config: &TokenizerConfig) -> (CharClass, usize) {
    let b = text[pos];
    match b {
        b'A'..=b'Z' | b'a'..=b'z' => (CharClass::Word, 1),
        b'\'' if config.include_apostrophes => (CharClass::Joiner, 1),
        b'-' if config.include_hyphens => (CharClass::Joiner, 1),
        0x00..=0x7f => (CharClass::Other, 1),
        lead => {
            let width = match lead {
                0xc2..=0xdf => 2,
                0xe0..=0xef => 3,
                0xf0..=0xf4 => 4,
                // Continuation byte with no lead, or a byte no UTF-8
                // sequence can start with.
                _ => return (CharClass::Other, 1),
            };
            if pos + width > text.len() {
                return (CharClass::Other, 1);
            }
            if text[pos + 1..pos + width].iter().any(|&c| c & 0xc0 != 0x80) {
                return (CharClass::Other, 1);
            }
            (CharClass::Word, width)
        }
    }
}

/// Tokenize a byte slice.
///
/// # Errors
///
/// [`TokenizeError::NullByte`] if the input contains a NUL byte.
pub fn tokenize<'a>(
    text: &'a [u8],
    config: TokenizerConfig,
) -> Result<Tokens<'a>, TokenizeError> {
    if let Some(pos) = text.iter().position(|&b| b == 0) {
        return Err(TokenizeError::NullByte(pos));
    }
    Ok(Tokens { text, config, pos: 0 })
}

/// Lazy token stream produced by [`tokenize`].
pub struct Tokens<'a> {
    text: &'a [u8],
    config: TokenizerConfig,
    pos: usize,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            // Skip separators (and unflanked joiners) to the next word start.
            while self.pos < self.text.len() {
                let (class, width) = classify(self.text, self.pos, &self.config);
                if class == CharClass::Word {
                    break;
                }
                self.pos += width;
            }
            if self.pos >= self.text.len() {
                return None;
            }

            let start = self.pos;
            let mut end = self.pos;
            while end < self.text.len() {
                let (class, width) = classify(self.text, end, &self.config);
                match class {
                    CharClass::Word => end += width,
                    CharClass::Joiner => {
                        // A joiner continues the word only when a word
                        // character follows directly.
                        let after = end + width;
                        if after < self.text.len() {
                            let (next_class, _) = classify(self.text, after, &self.config);
                            if next_class == CharClass::Word {
                                end = after;
                                continue;
                            }
                        }
                        break;
                    }
                    CharClass::Other => break,
                }
            }

            self.pos = end;
            if end - start >= self.config.min_length {
                return Some(Token { start, end });
            }
            // Token too short; keep scanning from behind it.
        }
    }
}

/// Byte offset where the word-character run ending at `offset` begins.
///
/// This is the prefix-extraction rule for completion: walk backwards from
/// the cursor over word characters (joiners count only when flanked by word
/// characters). Returns `offset` itself when no word character precedes it.
pub fn prefix_start(text: &[u8], offset: usize, config: TokenizerConfig) -> usize {
    let mut start = offset.min(text.len());
    loop {
        let Some((class, char_start)) = classify_before(text, start, &config) else {
            return start;
        };
        match class {
            CharClass::Word => start = char_start,
            CharClass::Joiner => {
                // Flanked on the right by the run walked so far; require a
                // word character on the left as well.
                if start == offset {
                    return start;
                }
                match classify_before(text, char_start, &config) {
                    Some((CharClass::Word, before_start)) => {
                        start = before_start;
                    }
                    _ => return start,
                }
            }
            CharClass::Other => return start,
        }
    }
}

/// Classify the character that ends at byte boundary `end`.
///
/// Returns the class and the start offset of that character, or None at the
/// beginning of the text. A malformed trailing sequence classifies as
/// `Other` over its final byte.
fn classify_before(
    text: &[u8],
    end: usize,
    config: &TokenizerConfig,
) -> Option<(CharClass, usize)> {
    if end == 0 {
        return None;
    }
    // Walk back over continuation bytes to a plausible lead byte.
    let mut start = end - 1;
    while start > 0 && end - start < 4 && text[start] & 0xc0 == 0x80 {
        start -= 1;
    }
    let (class, width) = classify(text, start, config);
    if start + width == end {
        Some((class, start))
    } else {
        // The bytes before `end` are not a whole character.
        Some((CharClass::Other, end - 1))
    }
}
