//! Engine facade owning the pool and the three indices.
//!
//! The facade is the consistency boundary: `add` and `remove` mutate the
//! hash set, the trie, and the BK-tree together, so from outside the engine
//! the three always describe the same word set. Queries never mutate.

use crate::bk_tree::BkTree;
use crate::error::EngineError;
use crate::hash_set::WordSet;
use crate::pool::{StringPool, WordId};
use crate::trie::PrefixTrie;
use rustc_hash::FxHashSet;

/// Result of [`Engine::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The word was not known and is now stored.
    Added,
    /// The word (after folding) was already stored.
    AlreadyPresent,
}

/// Result of [`Engine::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The word was stored and has been removed.
    Removed,
    /// The word was not stored.
    Absent,
}

/// The word-library engine.
///
/// Owns the canonical [`StringPool`] and the exact/prefix/metric indices
/// over it. One instance serves one logical request at a time; callers that
/// dispatch from multiple threads must serialize access.
///
/// Case sensitivity is fixed when the engine is created. A case-insensitive
/// engine folds ASCII letters at the pool boundary, so every query and every
/// stored word observe the same folding.
pub struct Engine {
    pool: StringPool,
    set: WordSet,
    trie: PrefixTrie,
    bk: BkTree,
    /// Set on every successful mutation, cleared by [`Engine::mark_clean`].
    dirty: bool,
}

impl Engine {
    /// Create an empty engine.
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            pool: StringPool::new(case_sensitive),
            set: WordSet::new(),
            trie: PrefixTrie::new(),
            bk: BkTree::new(),
            dirty: false,
        }
    }

    /// Whether this engine compares words without ASCII folding.
    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.pool.case_sensitive()
    }

    /// Number of stored words.
    #[inline]
    pub fn count(&self) -> usize {
        self.set.len()
    }

    /// True since the last mutation after [`Engine::mark_clean`].
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, typically after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Reject words the store cannot represent: empty strings and strings
    /// containing ASCII control bytes (which includes line terminators).
    fn validate(word: &str) -> Result<(), EngineError> {
        if word.is_empty() {
            return Err(EngineError::InvalidInput("empty word".to_string()));
        }
        if word.bytes().any(|b| b < 0x20 || b == 0x7f) {
            return Err(EngineError::InvalidInput(format!(
                "word {word:?} contains control bytes"
            )));
        }
        Ok(())
    }

    /// Add a word to all three indices.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidInput`] for unstorable words, or
    /// [`EngineError::InsufficientMemory`] if the hash set could not grow
    /// (no index is modified in that case).
    pub fn add(&mut self, word: &str) -> Result<AddOutcome, EngineError> {
        Self::validate(word)?;
        let id = self.pool.intern(word);
        if self.set.contains(id) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        // The hash set resize is the only fallible step; do it first so a
        // failure leaves the trie and BK-tree untouched.
        self.set.insert(id)?;
        let canonical = self.pool.as_str(id);
        self.trie.insert(canonical, id);
        self.bk.insert(&self.pool, id);
        self.dirty = true;
        Ok(AddOutcome::Added)
    }

    /// Remove a word from all three indices. The pool slot stays interned.
    pub fn remove(&mut self, word: &str) -> RemoveOutcome {
        let Some(id) = self.pool.lookup(word) else {
            return RemoveOutcome::Absent;
        };
        if !self.set.remove(id) {
            return RemoveOutcome::Absent;
        }
        let canonical = self.pool.as_str(id);
        self.trie.remove(canonical);
        self.bk.remove(&self.pool, canonical);
        self.dirty = true;
        RemoveOutcome::Removed
    }

    /// Exact membership, O(1) expected after the pool lookup.
    pub fn contains(&self, word: &str) -> bool {
        self.pool.lookup(word).map(|id| self.set.contains(id)).unwrap_or(false)
    }

    /// Stored words sharing `prefix`, lexicographic, at most `limit`.
    pub fn complete<'a>(&'a self, prefix: &str, limit: usize) -> impl Iterator<Item = &'a str> {
        let folded = self.pool.fold(prefix);
        self.trie.complete(folded.as_ref(), limit).map(|id| self.pool.as_str(id))
    }

    /// Stored words within `max_dist` edits of `query`, best first.
    ///
    /// Sorted by distance, then bytes; truncated to `max_results`.
    pub fn suggest(&self, query: &str, max_dist: u32, max_results: usize) -> Vec<(&str, u32)> {
        self.suggest_with(query, max_dist, max_results, |_| 0)
    }

    /// [`Engine::suggest`] with a frequency tiebreaker: among equidistant
    /// candidates, higher `frequency` sorts first, bytes break remaining
    /// ties.
    pub fn suggest_with<F>(
        &self,
        query: &str,
        max_dist: u32,
        max_results: usize,
        frequency: F,
    ) -> Vec<(&str, u32)>
    where
        F: Fn(&str) -> u64,
    {
        let folded = self.pool.fold(query);
        let hits = self.bk.search(&self.pool, folded.as_ref(), max_dist);

        // The tree cannot reach one word twice, but the contract is cheap
        // to enforce here where the results are already materialized.
        let mut seen: FxHashSet<WordId> = FxHashSet::default();
        let mut shaped: Vec<(&str, u32)> = hits
            .into_iter()
            .filter(|(id, _)| seen.insert(*id))
            .map(|(id, d)| (self.pool.as_str(id), d))
            .collect();
        shaped.sort_by(|a, b| {
            a.1.cmp(&b.1)
                .then_with(|| frequency(b.0).cmp(&frequency(a.0)))
                .then_with(|| a.0.cmp(b.0))
        });
        shaped.truncate(max_results);
        shaped
    }

    /// Iterate the stored words in unspecified order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.set.iter().map(|id| self.pool.as_str(id))
    }

    #[cfg(test)]
    pub(crate) fn indices(&self) -> (&StringPool, &WordSet, &PrefixTrie, &BkTree) {
        (&self.pool, &self.set, &self.trie, &self.bk)
    }
}
