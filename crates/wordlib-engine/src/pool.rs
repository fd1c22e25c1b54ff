//! String interning for canonical word storage.
//!
//! Every word known to the engine is stored exactly once. The pool hands out
//! dense [`WordId`] handles; handle equality implies byte equality of the
//! underlying words, which lets the indices compare words in O(1).

use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::sync::Arc;

/// Opaque identity of an interned word.
///
/// Valid for the lifetime of the pool that issued it. Two ids issued by the
/// same pool are equal iff the interned byte sequences are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordId(u32);

impl WordId {
    /// Dense index of this id, suitable for table addressing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Canonical store for interned words.
///
/// When constructed case-insensitive, ASCII case folding is applied on every
/// intern and lookup, so `"Hello"` and `"hello"` share one id. The folding
/// mode is fixed at construction and cannot change for a live pool.
pub struct StringPool {
    /// Interned payloads, indexed by `WordId`.
    words: Vec<Arc<str>>,
    /// Reverse index from payload to id. Shares allocations with `words`.
    index: FxHashMap<Arc<str>, WordId>,
    case_sensitive: bool,
}

impl StringPool {
    /// Create an empty pool with the given folding mode.
    pub fn new(case_sensitive: bool) -> Self {
        Self { words: Vec::new(), index: FxHashMap::default(), case_sensitive }
    }

    /// Whether this pool compares words byte-for-byte without folding.
    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Apply this pool's folding mode to a query or word.
    ///
    /// Returns the input unchanged (borrowed) when no folding is needed.
    pub fn fold<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.case_sensitive || !word.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.to_ascii_lowercase())
        }
    }

    /// Intern a word, returning the existing id for an equal (post-folding)
    /// byte sequence or allocating a new one. Idempotent.
    pub fn intern(&mut self, word: &str) -> WordId {
        let folded = self.fold(word);
        if let Some(&id) = self.index.get(folded.as_ref()) {
            return id;
        }
        let payload: Arc<str> = Arc::from(folded.as_ref());
        let id = WordId(self.words.len() as u32);
        self.words.push(Arc::clone(&payload));
        self.index.insert(payload, id);
        id
    }

    /// Look up the id of a word without interning it.
    pub fn lookup(&self, word: &str) -> Option<WordId> {
        let folded = self.fold(word);
        self.index.get(folded.as_ref()).copied()
    }

    /// The canonical payload of an interned word.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this pool.
    #[inline]
    pub fn as_str(&self, id: WordId) -> &str {
        &self.words[id.index()]
    }

    /// Number of distinct interned words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if nothing has been interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
