//! LSP transport layer for wordlib-lsp.
//!
//! Implements Content-Length based message framing over any byte stream,
//! per the LSP Base Protocol:
//!
//! ```text
//! Content-Length: <decimal>\r\n\r\n<N bytes of UTF-8 JSON>
//! ```
//!
//! Header names are matched case-insensitively; headers other than
//! `Content-Length` are tolerated and ignored. A frame whose body is not
//! valid JSON-RPC is logged and skipped (its id is unknowable, so no error
//! reply is possible), and the stream keeps going.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod framing;

pub use framing::{read_message, write_message, write_notification};
