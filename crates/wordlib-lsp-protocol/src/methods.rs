//! LSP method name constants.
//!
//! Centralizes the method identifiers the server routes on, so dispatch,
//! capability registration, and tests agree on the exact strings. Names
//! follow the LSP 3.17 specification.

// ============================================================================
// Lifecycle
// ============================================================================

/// Initialize request, the first message of a session.
pub const INITIALIZE: &str = "initialize";

/// Initialized notification, sent after the initialize response.
pub const INITIALIZED: &str = "initialized";

/// Shutdown request; the session winds down but the process stays.
pub const SHUTDOWN: &str = "shutdown";

/// Exit notification; terminates the process.
pub const EXIT: &str = "exit";

// ============================================================================
// Text document synchronization
// ============================================================================

/// Document opened notification.
pub const TEXT_DOCUMENT_DID_OPEN: &str = "textDocument/didOpen";

/// Document changed notification (full-text sync).
pub const TEXT_DOCUMENT_DID_CHANGE: &str = "textDocument/didChange";

/// Document closed notification.
pub const TEXT_DOCUMENT_DID_CLOSE: &str = "textDocument/didClose";

/// Document saved notification; accepted and ignored.
pub const TEXT_DOCUMENT_DID_SAVE: &str = "textDocument/didSave";

/// Publish diagnostics notification (server to client).
pub const TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS: &str = "textDocument/publishDiagnostics";

// ============================================================================
// Language features
// ============================================================================

/// Completion request.
pub const TEXT_DOCUMENT_COMPLETION: &str = "textDocument/completion";

/// Code action request.
pub const TEXT_DOCUMENT_CODE_ACTION: &str = "textDocument/codeAction";

// ============================================================================
// Workspace features
// ============================================================================

/// Execute command request.
pub const WORKSPACE_EXECUTE_COMMAND: &str = "workspace/executeCommand";

/// Configuration changed notification.
pub const WORKSPACE_DID_CHANGE_CONFIGURATION: &str = "workspace/didChangeConfiguration";

// ============================================================================
// Special
// ============================================================================

/// Cancel request notification; accepted, every request is still answered.
pub const CANCEL_REQUEST: &str = "$/cancelRequest";

/// Trace level notification.
pub const SET_TRACE: &str = "$/setTrace";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_methods() {
        assert_eq!(INITIALIZE, "initialize");
        assert_eq!(INITIALIZED, "initialized");
        assert_eq!(SHUTDOWN, "shutdown");
        assert_eq!(EXIT, "exit");
    }

    #[test]
    fn text_document_methods() {
        assert_eq!(TEXT_DOCUMENT_DID_OPEN, "textDocument/didOpen");
        assert_eq!(TEXT_DOCUMENT_DID_CHANGE, "textDocument/didChange");
        assert_eq!(TEXT_DOCUMENT_DID_CLOSE, "textDocument/didClose");
        assert_eq!(TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS, "textDocument/publishDiagnostics");
        assert_eq!(TEXT_DOCUMENT_COMPLETION, "textDocument/completion");
        assert_eq!(TEXT_DOCUMENT_CODE_ACTION, "textDocument/codeAction");
    }

    #[test]
    fn workspace_methods() {
        assert_eq!(WORKSPACE_EXECUTE_COMMAND, "workspace/executeCommand");
        assert_eq!(WORKSPACE_DID_CHANGE_CONFIGURATION, "workspace/didChangeConfiguration");
    }
}
