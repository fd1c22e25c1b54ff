//! Error types for engine operations.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the engine and its persistence layer.
///
/// Expected conditions (unknown word, stale document version, duplicate
/// open) are modeled as status enums on the operations that produce them,
/// not as errors. This type covers the cases where an operation could not
/// be carried out at all.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller passed input the engine refuses to store or query,
    /// for example a word containing control bytes, or text containing
    /// a NUL byte.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An index could not grow because the allocator refused the request.
    /// The index that reported this is unchanged.
    #[error("insufficient memory while resizing {context}")]
    InsufficientMemory {
        /// Which structure was resizing when the allocation failed.
        context: &'static str,
    },

    /// Dictionary file I/O failed. In-memory state is unaffected.
    #[error("I/O failure on {path}: {source}")]
    Io {
        /// The dictionary path involved.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },
}
