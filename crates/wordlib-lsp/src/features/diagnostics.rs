//! Unknown-word diagnostic computation.
//!
//! Pure function from (engine word set, session ignore set, document text)
//! to a sorted diagnostic list. Publishing is the server's job; this module
//! never touches the wire.

use crate::state::{Document, SessionState};
use lsp_types::{Diagnostic, NumberOrString, Position, Range};
use serde_json::json;
use wordlib_engine::Engine;
use wordlib_position_tracking::{ByteSpan, LineIndex};
use wordlib_tokenizer::tokenize;

/// Diagnostic code attached to every unknown-word report.
pub const UNKNOWN_WORD_CODE: &str = "wordlib.unknown";

/// Diagnostic source identifier.
pub const DIAGNOSTIC_SOURCE: &str = "wordlib";

/// Compute the unknown-word diagnostics for one document.
///
/// Tokens found in the engine or the session ignore set produce nothing.
/// The result is sorted by (start, end, word) and is deterministic for a
/// given engine state, ignore set, and text. A document containing a NUL
/// byte yields no diagnostics (the tokenizer refuses it; the condition is
/// logged).
pub fn compute_diagnostics(
    engine: &Engine,
    session: &SessionState,
    doc: &Document,
) -> Vec<Diagnostic> {
    let tokens = match tokenize(doc.text.as_bytes(), session.tokenizer) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("wordlib-lsp: cannot tokenize {}: {e}", doc.uri);
            return Vec::new();
        }
    };

    let index = LineIndex::new(&doc.text);
    let severity = session.settings.diagnostic_severity;
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for token in tokens {
        let span = ByteSpan::new(token.start, token.end);
        // Token spans land on code-point boundaries, so slicing is safe.
        let word = span.slice(&doc.text);
        if session.is_ignored(word) || engine.contains(word) {
            continue;
        }
        let ((start_line, start_col), (end_line, end_col)) = index.range(span);
        diagnostics.push(Diagnostic {
            range: Range {
                start: Position { line: start_line, character: start_col },
                end: Position { line: end_line, character: end_col },
            },
            severity: Some(severity),
            code: Some(NumberOrString::String(UNKNOWN_WORD_CODE.to_string())),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: format!("Unknown word: '{word}'"),
            // The word rides along so the code-action provider does not
            // have to re-parse it out of the message.
            data: Some(json!({ "word": word })),
            ..Default::default()
        });
    }

    diagnostics.sort_by(|a, b| {
        let key = |d: &Diagnostic| {
            (
                d.range.start.line,
                d.range.start.character,
                d.range.end.line,
                d.range.end.character,
                d.message.clone(),
            )
        };
        key(a).cmp(&key(b))
    });
    diagnostics
}
