//! Line index for byte offset <-> line/UTF-16 column translation.

use crate::span::ByteSpan;

/// Precomputed line starts over a borrowed document text.
///
/// Lines are separated by `\n`; the line number of an offset is the count of
/// `\n` bytes before it. Columns count UTF-16 code units from the line
/// start, so a 4-byte code point (one surrogate pair in UTF-16) contributes
/// two columns and every other code point contributes one.
///
/// Construction is O(text); each conversion is then O(log lines) to find
/// the line plus O(chars on the line) to count columns.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// Ascending byte offsets of line starts; always begins with 0.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Index the given text.
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { text, line_starts }
    }

    /// The indexed text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of lines (a trailing newline opens a final empty line).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Translate a byte offset to (line, UTF-16 column), clamping offsets
    /// past the end of the text.
    pub fn position(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.text.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        let line_start = self.line_starts[line];
        let column: usize =
            self.text[line_start..offset].chars().map(char::len_utf16).sum();
        (line as u32, column as u32)
    }

    /// Translate both ends of a byte span to LSP-style positions.
    pub fn range(&self, span: ByteSpan) -> ((u32, u32), (u32, u32)) {
        (self.position(span.start), self.position(span.end))
    }

    /// Translate (line, UTF-16 column) back to a byte offset.
    ///
    /// Returns None for a line past the end of the document, for a column
    /// past the end of its line, or for a column that lands between the two
    /// code units of a surrogate pair.
    pub fn offset(&self, line: u32, character: u32) -> Option<usize> {
        let line = line as usize;
        if line >= self.line_starts.len() {
            return None;
        }
        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        let line_text = &self.text[line_start..line_end];

        let target = character as usize;
        let mut utf16 = 0;
        for (byte, ch) in line_text.char_indices() {
            if utf16 == target {
                return Some(line_start + byte);
            }
            utf16 += ch.len_utf16();
            if utf16 > target {
                // The column points inside a surrogate pair.
                return None;
            }
        }
        (utf16 == target).then_some(line_start + line_text.len())
    }

    /// Like [`LineIndex::offset`], but clamps out-of-range positions to the
    /// nearest valid offset instead of rejecting them. Incoming client
    /// positions use this so a cursor at a stale coordinate still resolves.
    pub fn offset_clamped(&self, line: u32, character: u32) -> usize {
        let line = line as usize;
        if line >= self.line_starts.len() {
            return self.text.len();
        }
        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());
        let line_text = &self.text[line_start..line_end];

        let target = character as usize;
        let mut utf16 = 0;
        let mut byte = 0;
        for ch in line_text.chars() {
            if utf16 >= target || ch == '\n' {
                break;
            }
            utf16 += ch.len_utf16();
            byte += ch.len_utf8();
        }
        line_start + byte
    }
}
