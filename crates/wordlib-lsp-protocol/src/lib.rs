//! LSP protocol definitions for the wordlib language server.
//!
//! This crate is the single source of truth for the wire-facing constants
//! and message shapes the server uses:
//!
//! - [`jsonrpc`] - JSON-RPC 2.0 request/response/error types
//! - [`methods`] - LSP method name constants for routing
//! - [`capabilities`] - the capability set advertised at initialize time
//!
//! Payload bodies (diagnostics, completion lists, code actions) use the
//! `lsp-types` crate directly; this crate only adds what `lsp-types` does
//! not model.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod capabilities;
pub mod jsonrpc;
pub mod methods;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// JSON-RPC 2.0 standard error code: malformed JSON.
pub const PARSE_ERROR: i32 = -32700;
/// JSON-RPC 2.0 standard error code: not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;
/// JSON-RPC 2.0 standard error code: unknown method.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC 2.0 standard error code: invalid method parameters.
pub const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC 2.0 standard error code: internal server error.
pub const INTERNAL_ERROR: i32 = -32603;
/// LSP error code: request received before `initialize` completed.
pub const SERVER_NOT_INITIALIZED: i32 = -32002;
