//! `workspace/executeCommand` parsing and semantics.
//!
//! Two commands exist, both taking the word as their single argument:
//!
//! - `wordlib.addWord` - add to the engine, persist the dictionary, then
//!   revalidate every open document
//! - `wordlib.ignoreWord` - suppress for this session, then revalidate
//!
//! Parsing lives here; the side effects run on the server, which owns the
//! engine, the session, and the publish queue.

use serde_json::Value;
use wordlib_lsp_protocol::capabilities::{ADD_WORD_COMMAND, IGNORE_WORD_COMMAND};
use wordlib_lsp_protocol::{JsonRpcError, INVALID_PARAMS, METHOD_NOT_FOUND};

/// A validated dictionary command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryCommand {
    /// Add the word to the dictionary and persist it.
    AddWord(String),
    /// Suppress the word until the server exits.
    IgnoreWord(String),
}

/// Validate an executeCommand request into a [`DictionaryCommand`].
///
/// # Errors
///
/// `-32601` for a command outside the advertised set, `-32602` when the
/// word argument is missing or not a string.
pub fn parse_command(
    command: &str,
    arguments: Option<&Vec<Value>>,
) -> Result<DictionaryCommand, JsonRpcError> {
    let word = || -> Result<String, JsonRpcError> {
        arguments
            .and_then(|args| args.first())
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                JsonRpcError::new(
                    INVALID_PARAMS,
                    format!("{command} requires a single string argument"),
                )
            })
    };

    match command {
        ADD_WORD_COMMAND => Ok(DictionaryCommand::AddWord(word()?)),
        IGNORE_WORD_COMMAND => Ok(DictionaryCommand::IgnoreWord(word()?)),
        other => Err(JsonRpcError::new(
            METHOD_NOT_FOUND,
            format!("Unknown command: {other}"),
        )),
    }
}
