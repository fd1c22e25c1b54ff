//! Document state management.
//!
//! Tracks every buffer the client has open, keyed by URI. The server syncs
//! full document text (no incremental edits), so a document is just its
//! latest text plus the version the client stamped on it.

use rustc_hash::FxHashMap;

/// One open text document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Canonical file URI as the client sent it.
    pub uri: String,
    /// Language identifier from `didOpen` (informational).
    pub language_id: String,
    /// Client version; strictly increases across accepted updates.
    pub version: i64,
    /// Complete current text, owned by the store.
    pub text: String,
}

/// Result of [`DocumentStore::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The document is now tracked.
    Opened,
    /// A document with this URI is already open; the store is unchanged.
    AlreadyOpen,
}

/// Result of [`DocumentStore::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The new text and version were accepted.
    Updated,
    /// The update's version is not newer than the stored one; the text is
    /// unchanged. Not an error: the client will send a fresher update.
    StaleUpdate,
    /// No document with this URI is open.
    NotOpen,
}

/// Result of [`DocumentStore::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The document was removed from the store.
    Closed,
    /// No document with this URI was open.
    NotOpen,
}

/// Open documents, keyed by URI.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: FxHashMap<String, Document>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly opened document.
    pub fn open(
        &mut self,
        uri: &str,
        language_id: &str,
        version: i64,
        text: String,
    ) -> OpenOutcome {
        if self.docs.contains_key(uri) {
            return OpenOutcome::AlreadyOpen;
        }
        self.docs.insert(
            uri.to_string(),
            Document {
                uri: uri.to_string(),
                language_id: language_id.to_string(),
                version,
                text,
            },
        );
        OpenOutcome::Opened
    }

    /// Replace a document's text if `version` is newer than the stored one.
    pub fn update(&mut self, uri: &str, version: i64, text: String) -> UpdateOutcome {
        match self.docs.get_mut(uri) {
            None => UpdateOutcome::NotOpen,
            Some(doc) if version <= doc.version => UpdateOutcome::StaleUpdate,
            Some(doc) => {
                doc.version = version;
                doc.text = text;
                UpdateOutcome::Updated
            }
        }
    }

    /// Stop tracking a document.
    pub fn close(&mut self, uri: &str) -> CloseOutcome {
        if self.docs.remove(uri).is_some() {
            CloseOutcome::Closed
        } else {
            CloseOutcome::NotOpen
        }
    }

    /// Look up an open document.
    pub fn get(&self, uri: &str) -> Option<&Document> {
        self.docs.get(uri)
    }

    /// Iterate the open documents in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.values()
    }

    /// Number of open documents.
    pub fn count(&self) -> usize {
        self.docs.len()
    }
}
