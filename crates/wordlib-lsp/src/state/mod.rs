//! Server state: open documents and session configuration.

mod document;
mod session;

pub use document::{CloseOutcome, Document, DocumentStore, OpenOutcome, UpdateOutcome};
pub use session::{SessionState, Settings};
