//! JSON-RPC 2.0 message types.
//!
//! Inbound traffic deserializes into [`JsonRpcRequest`]; a message without
//! an `id` is a notification. Outbound traffic serializes from
//! [`JsonRpcResponse`], which carries either a result or an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound JSON-RPC 2.0 message.
///
/// Covers both requests and notifications; `id` is `None` for the latter.
/// A message carrying `result`/`error` instead of `method` (a response to a
/// server-initiated request) fails to deserialize into this type and is
/// dropped by the transport.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version marker, nominally "2.0".
    #[serde(rename = "jsonrpc", default)]
    pub _jsonrpc: String,

    /// Request identifier; `None` marks a notification.
    pub id: Option<Value>,

    /// Method to invoke.
    pub method: String,

    /// Method parameters, if any.
    pub params: Option<Value>,
}

/// An outbound JSON-RPC 2.0 response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// Always "2.0".
    pub jsonrpc: String,

    /// Mirrors the request's id.
    pub id: Option<Value>,

    /// Success payload; mutually exclusive with `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Failure payload; mutually exclusive with `result`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// A success response carrying `result`.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: Some(result), error: None }
    }

    /// An error response.
    pub fn error(id: Option<Value>, error: JsonRpcError) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }

    /// A success response with a JSON `null` result.
    pub fn null(id: Option<Value>) -> Self {
        Self::success(id, Value::Null)
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    /// Error code; see the constants on the crate root.
    pub code: i32,

    /// Human-readable description.
    pub message: String,

    /// Optional structured context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Create an error with no extra data.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    /// Create an error with structured context.
    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self { code, message: message.into(), data: Some(data) }
    }
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcError {}
