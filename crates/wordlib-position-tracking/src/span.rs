//! Byte-based span type for word occurrences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A half-open byte range `[start, end)` into a document's text.
///
/// Offsets are bytes, not characters; producers guarantee that both ends
/// lie on UTF-8 code-point boundaries of the text they refer to.
///
/// # Example
///
/// ```
/// use wordlib_position_tracking::ByteSpan;
///
/// let span = ByteSpan::new(4, 9);
/// assert_eq!(span.len(), 5);
/// assert_eq!(span.slice("The quikc brown fox"), "quikc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ByteSpan {
    /// Starting byte offset (inclusive).
    pub start: usize,
    /// Ending byte offset (exclusive).
    pub end: usize,
}

impl ByteSpan {
    /// Create a span. Debug builds assert `start <= end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "ByteSpan: start ({start}) > end ({end})");
        Self { start, end }
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if `start == end`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `offset` falls inside the span.
    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// The covered slice of `source`.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds or off a char boundary.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// The covered slice, or None when out of bounds.
    #[inline]
    pub fn try_slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for ByteSpan {
    #[inline]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<ByteSpan> for Range<usize> {
    #[inline]
    fn from(span: ByteSpan) -> Self {
        span.start..span.end
    }
}
