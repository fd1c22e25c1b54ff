//! Shared harness for driving the server through its dispatch entry point.

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use wordlib_lsp::{JsonRpcRequest, LspServer};

/// Build a request message and dispatch it, returning the response as JSON.
pub fn request(server: &mut LspServer, id: i64, method: &str, params: Value) -> Value {
    let message: JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    }))
    .expect("request message");
    let response = server.handle_request(message).expect("request must be answered");
    serde_json::to_value(&response).expect("serializable response")
}

/// Dispatch a notification and assert no response comes back.
pub fn notify(server: &mut LspServer, method: &str, params: Value) {
    let message: JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
    }))
    .expect("notification message");
    let response = server.handle_request(message);
    assert!(response.is_none(), "notification {method} produced a response");
}

/// file:// URI for a local path.
pub fn path_to_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Write `<root>/.wordlib/dictionary.txt` containing the given words.
pub fn seed_workspace_dictionary(root: &Path, words: &[&str]) {
    let dir = root.join(".wordlib");
    fs::create_dir_all(&dir).expect("mkdir");
    let mut content = String::from("# wordlib dictionary v1\n");
    for word in words {
        content.push_str(word);
        content.push('\n');
    }
    fs::write(dir.join("dictionary.txt"), content).expect("write dictionary");
}

/// Run the initialize handshake with no workspace root.
pub fn initialize(server: &mut LspServer) -> Value {
    let response = request(server, 1, "initialize", json!({}));
    notify(server, "initialized", json!({}));
    response
}

/// Run the initialize handshake against a workspace root directory.
pub fn initialize_with_root(server: &mut LspServer, root: &Path) -> Value {
    let response = request(
        server,
        1,
        "initialize",
        json!({ "rootUri": path_to_uri(root) }),
    );
    notify(server, "initialized", json!({}));
    response
}

/// Open a document with the given text.
pub fn open_document(server: &mut LspServer, uri: &str, version: i64, text: &str) {
    notify(
        server,
        "textDocument/didOpen",
        json!({
            "textDocument": {
                "uri": uri,
                "languageId": "plaintext",
                "version": version,
                "text": text,
            }
        }),
    );
}

/// Replace a document's text (full sync).
pub fn change_document(server: &mut LspServer, uri: &str, version: i64, text: &str) {
    notify(
        server,
        "textDocument/didChange",
        json!({
            "textDocument": { "uri": uri, "version": version },
            "contentChanges": [{ "text": text }],
        }),
    );
}

/// Drain queued notifications, keeping only publishDiagnostics params.
pub fn drain_publishes(server: &mut LspServer) -> Vec<Value> {
    server
        .take_notifications()
        .into_iter()
        .filter(|(method, _)| method == "textDocument/publishDiagnostics")
        .map(|(_, params)| params)
        .collect()
}

/// The diagnostics array of the most recent publish for a URI.
pub fn last_publish_for(server: &mut LspServer, uri: &str) -> Option<Value> {
    drain_publishes(server)
        .into_iter()
        .filter(|p| p.get("uri").and_then(|u| u.as_str()) == Some(uri))
        .next_back()
}
