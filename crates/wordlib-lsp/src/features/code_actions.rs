//! Quick fixes for unknown-word diagnostics.
//!
//! Every diagnostic carrying the `wordlib.unknown` code yields exactly two
//! actions: add the word to the dictionary, or ignore it for the session.
//! Both are command-backed; the edits happen server-side when the client
//! executes the command, followed by a revalidation of all open documents.

use crate::features::diagnostics::UNKNOWN_WORD_CODE;
use lsp_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, Command, Diagnostic, NumberOrString,
};
use serde_json::json;
use wordlib_lsp_protocol::capabilities::{ADD_WORD_COMMAND, IGNORE_WORD_COMMAND};

/// The word a diagnostic refers to.
///
/// Preferred source is the `data.word` field the diagnostic pipeline
/// attaches; diagnostics echoed back by clients that strip `data` fall back
/// to the `Unknown word: '...'` message.
fn diagnostic_word(diagnostic: &Diagnostic) -> Option<String> {
    if let Some(word) = diagnostic
        .data
        .as_ref()
        .and_then(|d| d.get("word"))
        .and_then(|w| w.as_str())
    {
        return Some(word.to_string());
    }
    let message = &diagnostic.message;
    let rest = message.strip_prefix("Unknown word: '")?;
    let word = rest.strip_suffix('\'')?;
    (!word.is_empty()).then(|| word.to_string())
}

fn is_unknown_word(diagnostic: &Diagnostic) -> bool {
    matches!(
        &diagnostic.code,
        Some(NumberOrString::String(code)) if code == UNKNOWN_WORD_CODE
    )
}

/// Build the quick fixes for the diagnostics a code-action request carries.
pub fn actions_for_diagnostics(diagnostics: &[Diagnostic]) -> Vec<CodeActionOrCommand> {
    let mut actions = Vec::new();
    for diagnostic in diagnostics {
        if !is_unknown_word(diagnostic) {
            continue;
        }
        let Some(word) = diagnostic_word(diagnostic) else {
            continue;
        };

        let add_title = format!("Add '{word}' to dictionary");
        actions.push(CodeActionOrCommand::CodeAction(CodeAction {
            title: add_title.clone(),
            kind: Some(CodeActionKind::QUICKFIX),
            diagnostics: Some(vec![diagnostic.clone()]),
            command: Some(Command {
                title: add_title,
                command: ADD_WORD_COMMAND.to_string(),
                arguments: Some(vec![json!(word)]),
            }),
            ..Default::default()
        }));

        let ignore_title = format!("Ignore '{word}' for this session");
        actions.push(CodeActionOrCommand::CodeAction(CodeAction {
            title: ignore_title.clone(),
            kind: Some(CodeActionKind::QUICKFIX),
            diagnostics: Some(vec![diagnostic.clone()]),
            command: Some(Command {
                title: ignore_title,
                command: IGNORE_WORD_COMMAND.to_string(),
                arguments: Some(vec![json!(word)]),
            }),
            ..Default::default()
        }));
    }
    actions
}
