//! Server capabilities advertised at initialize time.
//!
//! Single source of truth for what the server claims to support: full-text
//! document sync, completion, quickfix code actions, and the two dictionary
//! commands.

use lsp_types::{
    CodeActionKind, CodeActionOptions, CodeActionProviderCapability, CompletionOptions,
    ExecuteCommandOptions, ServerCapabilities, TextDocumentSyncCapability, TextDocumentSyncKind,
    TextDocumentSyncOptions,
};

/// Command identifier for adding a word to the dictionary.
pub const ADD_WORD_COMMAND: &str = "wordlib.addWord";

/// Command identifier for ignoring a word for the rest of the session.
pub const IGNORE_WORD_COMMAND: &str = "wordlib.ignoreWord";

/// The commands accepted by `workspace/executeCommand`.
pub fn supported_commands() -> Vec<String> {
    vec![ADD_WORD_COMMAND.to_string(), IGNORE_WORD_COMMAND.to_string()]
}

/// Build the capability set returned from `initialize`.
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(TextDocumentSyncOptions {
            open_close: Some(true),
            change: Some(TextDocumentSyncKind::FULL),
            ..Default::default()
        })),
        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(Vec::new()),
            ..Default::default()
        }),
        code_action_provider: Some(CodeActionProviderCapability::Options(CodeActionOptions {
            code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
            ..Default::default()
        })),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: supported_commands(),
            ..Default::default()
        }),
        ..Default::default()
    }
}
