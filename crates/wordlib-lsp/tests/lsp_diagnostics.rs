//! Diagnostic publication over the document lifecycle.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{
    change_document, drain_publishes, initialize_with_root, last_publish_for, notify,
    open_document, seed_workspace_dictionary,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wordlib_lsp::LspServer;

const URI: &str = "file:///a.txt";

fn server_with_dictionary(words: &[&str]) -> (LspServer, tempfile::TempDir) {
    let workspace = tempfile::tempdir().expect("tempdir");
    seed_workspace_dictionary(workspace.path(), words);
    let mut server = LspServer::new();
    initialize_with_root(&mut server, workspace.path());
    (server, workspace)
}

#[test]
fn open_publishes_diagnostic_for_unknown_word() {
    let (mut server, _workspace) = server_with_dictionary(&["the", "brown", "fox"]);
    open_document(&mut server, URI, 1, "The quikc brown fox");

    let publish = last_publish_for(&mut server, URI).expect("publish");
    assert_eq!(publish["uri"], URI);
    assert_eq!(publish["version"], 1);

    let diagnostics = publish["diagnostics"].as_array().expect("array");
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic["message"], "Unknown word: 'quikc'");
    assert_eq!(diagnostic["code"], "wordlib.unknown");
    assert_eq!(diagnostic["source"], "wordlib");
    assert_eq!(diagnostic["severity"], 3); // information, the default
    assert_eq!(
        diagnostic["range"],
        json!({
            "start": { "line": 0, "character": 4 },
            "end": { "line": 0, "character": 9 },
        })
    );
}

#[test]
fn multibyte_words_get_utf16_columns() {
    let (mut server, _workspace) = server_with_dictionary(&[]);
    open_document(&mut server, URI, 1, "Bon café!");

    let publish = last_publish_for(&mut server, URI).expect("publish");
    let diagnostics = publish["diagnostics"].as_array().expect("array");
    assert_eq!(diagnostics.len(), 2);

    assert_eq!(diagnostics[0]["message"], "Unknown word: 'Bon'");
    assert_eq!(diagnostics[0]["range"]["start"]["character"], 0);
    assert_eq!(diagnostics[0]["range"]["end"]["character"], 3);

    // "café" is bytes 4..9 but UTF-16 columns 4..8.
    assert_eq!(diagnostics[1]["message"], "Unknown word: 'café'");
    assert_eq!(diagnostics[1]["range"]["start"]["character"], 4);
    assert_eq!(diagnostics[1]["range"]["end"]["character"], 8);
}

#[test]
fn change_republishes_at_the_new_version() {
    let (mut server, _workspace) = server_with_dictionary(&["hello"]);
    open_document(&mut server, URI, 1, "hello");
    drain_publishes(&mut server);

    change_document(&mut server, URI, 2, "hello wrold");
    let publish = last_publish_for(&mut server, URI).expect("publish");
    assert_eq!(publish["version"], 2);
    let diagnostics = publish["diagnostics"].as_array().expect("array");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["message"], "Unknown word: 'wrold'");
}

#[test]
fn stale_change_is_dropped_without_publish_or_mutation() {
    let (mut server, _workspace) = server_with_dictionary(&["hello"]);
    open_document(&mut server, URI, 5, "hello");
    drain_publishes(&mut server);

    change_document(&mut server, URI, 5, "garbage wrods");
    change_document(&mut server, URI, 3, "older wrods");

    assert!(drain_publishes(&mut server).is_empty(), "stale updates must not publish");
    let doc = server.documents().get(URI).expect("doc");
    assert_eq!(doc.text, "hello");
    assert_eq!(doc.version, 5);
}

#[test]
fn close_clears_diagnostics_with_an_empty_publish() {
    let (mut server, _workspace) = server_with_dictionary(&[]);
    open_document(&mut server, URI, 3, "wrold");
    drain_publishes(&mut server);

    notify(
        &mut server,
        "textDocument/didClose",
        json!({ "textDocument": { "uri": URI } }),
    );
    let publish = last_publish_for(&mut server, URI).expect("publish");
    assert_eq!(publish["diagnostics"], json!([]));
    assert_eq!(publish["version"], 3);
    assert_eq!(server.documents().count(), 0);
}

#[test]
fn duplicate_open_is_ignored_and_does_not_republish() {
    let (mut server, _workspace) = server_with_dictionary(&[]);
    open_document(&mut server, URI, 1, "first wrods");
    drain_publishes(&mut server);

    open_document(&mut server, URI, 2, "second text");
    assert!(drain_publishes(&mut server).is_empty());
    assert_eq!(server.documents().get(URI).expect("doc").text, "first wrods");
}

#[test]
fn diagnostics_are_sorted_and_deterministic() {
    let (mut server, _workspace) = server_with_dictionary(&["known"]);
    let text = "zz known aa\nmm known bb";
    open_document(&mut server, URI, 1, text);
    let first = last_publish_for(&mut server, URI).expect("publish");

    change_document(&mut server, URI, 2, text);
    let second = last_publish_for(&mut server, URI).expect("publish");
    assert_eq!(first["diagnostics"], second["diagnostics"]);

    let messages: Vec<&str> = first["diagnostics"]
        .as_array()
        .expect("array")
        .iter()
        .map(|d| d["message"].as_str().expect("message"))
        .collect();
    assert_eq!(
        messages,
        [
            "Unknown word: 'zz'",
            "Unknown word: 'aa'",
            "Unknown word: 'mm'",
            "Unknown word: 'bb'",
        ]
    );
}

#[test]
fn dictionary_words_are_folded_case_insensitively() {
    let (mut server, _workspace) = server_with_dictionary(&["Hello", "WORLD"]);
    open_document(&mut server, URI, 1, "hello world HELLO World");
    let publish = last_publish_for(&mut server, URI).expect("publish");
    assert_eq!(publish["diagnostics"], json!([]));
}

#[test]
fn change_for_unopened_document_is_ignored() {
    let (mut server, _workspace) = server_with_dictionary(&[]);
    change_document(&mut server, URI, 1, "never opened");
    assert!(drain_publishes(&mut server).is_empty());
    assert_eq!(server.documents().count(), 0);
}

#[test]
fn large_document_round_trips() {
    let (mut server, _workspace) = server_with_dictionary(&["word"]);
    // ~100K tokens, one unknown in the middle.
    let mut text = "word ".repeat(50_000);
    text.push_str("qzqzq ");
    text.push_str(&"word ".repeat(50_000));
    open_document(&mut server, URI, 1, &text);

    let publish = last_publish_for(&mut server, URI).expect("publish");
    let diagnostics = publish["diagnostics"].as_array().expect("array");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["message"], "Unknown word: 'qzqzq'");
}
