//! Source position tracking for wordlib.
//!
//! The engine and tokenizer speak in byte offsets; LSP clients speak in
//! zero-based lines and UTF-16 code-unit columns. This crate provides the
//! two types that bridge them:
//!
//! - [`ByteSpan`] - a half-open byte range into a document
//! - [`LineIndex`] - byte offset <-> (line, UTF-16 column) translation over
//!   a borrowed document text
//!
//! The translation is a pure function of the text. UTF-16 never leaks past
//! this crate; everything upstream of it stays in bytes.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod line_index;
mod span;

pub use line_index::LineIndex;
pub use span::ByteSpan;
