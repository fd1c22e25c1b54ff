//! Prefix completion against the dictionary.

use crate::state::{Document, SessionState};
use lsp_types::{CompletionItem, CompletionItemKind, CompletionList};
use wordlib_engine::Engine;
use wordlib_position_tracking::LineIndex;
use wordlib_tokenizer::prefix_start;

/// Cap on returned completion items. The trie is probed for one extra
/// match; its presence sets `is_incomplete`.
const COMPLETION_LIMIT: usize = 50;

/// Build the completion list for a cursor position.
///
/// The prefix is the maximal run of word characters ending at the cursor.
/// With no prefix (cursor after whitespace, start of file) the list is
/// empty. Items keep the trie's lexicographic order: `sort_text` is the
/// zero-padded item index, which stops clients from re-sorting by label.
pub fn complete_at(
    engine: &Engine,
    session: &SessionState,
    doc: &Document,
    line: u32,
    character: u32,
) -> CompletionList {
    let index = LineIndex::new(&doc.text);
    let offset = index.offset_clamped(line, character);
    let start = prefix_start(doc.text.as_bytes(), offset, session.tokenizer);
    if start >= offset {
        return CompletionList { is_incomplete: false, items: Vec::new() };
    }
    let prefix = &doc.text[start..offset];

    let mut labels: Vec<&str> = engine.complete(prefix, COMPLETION_LIMIT + 1).collect();
    let is_incomplete = labels.len() > COMPLETION_LIMIT;
    labels.truncate(COMPLETION_LIMIT);

    let items = labels
        .into_iter()
        .enumerate()
        .map(|(i, word)| CompletionItem {
            label: word.to_string(),
            kind: Some(CompletionItemKind::TEXT),
            sort_text: Some(format!("{i:04}")),
            ..Default::default()
        })
        .collect();
    CompletionList { is_incomplete, items }
}
