//! The wordlib language server.
//!
//! One [`LspServer`] owns one engine, one document store, and one session.
//! The server is single-threaded cooperative: [`LspServer::run`] blocks on
//! one inbound message at a time, dispatches it synchronously, writes any
//! queued notifications and then the response, and only then reads the next
//! message. Nothing mutates the engine or the stores outside that tick.

use crate::features::diagnostics::compute_diagnostics;
use crate::state::{DocumentStore, SessionState};
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use wordlib_engine::{dictionary, Engine};
use wordlib_lsp_protocol::methods;
use wordlib_lsp_transport::{read_message, write_message, write_notification};

/// Server lifecycle, advancing only in one direction.
///
/// ```text
/// Uninit --initialize--> Initializing --initialized--> Running
/// Running --shutdown--> ShuttingDown --exit--> Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No `initialize` request seen yet.
    Uninit,
    /// `initialize` answered, waiting for the `initialized` notification.
    Initializing,
    /// Normal operation.
    Running,
    /// `shutdown` answered; only `exit` is acceptable now.
    ShuttingDown,
    /// `exit` received; the main loop stops.
    Stopped,
}

/// LSP server state and dispatch.
pub struct LspServer {
    pub(crate) engine: Engine,
    pub(crate) documents: DocumentStore,
    pub(crate) session: SessionState,
    pub(crate) lifecycle: Lifecycle,
    /// Recorded by `exit`; 0 iff `shutdown` came first.
    exit_code: Option<i32>,
    /// Server-to-client notifications queued during dispatch, drained by
    /// the main loop (or by tests) after each message.
    outbox: Vec<(String, Value)>,
    /// Verbose per-message logging, controlled by `--log` and `$/setTrace`.
    pub(crate) trace: bool,
}

impl Default for LspServer {
    fn default() -> Self {
        Self::new()
    }
}

impl LspServer {
    /// Create a server with an empty, case-insensitive engine. The folding
    /// mode is revisited once during `initialize`, while the engine is
    /// still empty.
    pub fn new() -> Self {
        Self {
            engine: Engine::new(false),
            documents: DocumentStore::new(),
            session: SessionState::new(),
            lifecycle: Lifecycle::Uninit,
            exit_code: None,
            outbox: Vec::new(),
            trace: false,
        }
    }

    /// Enable verbose logging to stderr.
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Exit status recorded by the `exit` notification.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// The engine, for inspection.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Open documents, for inspection.
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Session state, for inspection.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Drain the queued server-to-client notifications in emission order.
    pub fn take_notifications(&mut self) -> Vec<(String, Value)> {
        std::mem::take(&mut self.outbox)
    }

    /// Queue a notification for the client.
    pub(crate) fn notify(&mut self, method: &str, params: Value) {
        self.outbox.push((method.to_string(), params));
    }

    /// Record the exit status and stop the loop. Status 0 only when
    /// `shutdown` preceded the `exit` notification.
    pub(crate) fn record_exit(&mut self) {
        let code = if self.lifecycle == Lifecycle::ShuttingDown { 0 } else { 1 };
        self.exit_code = Some(code);
        self.lifecycle = Lifecycle::Stopped;
        eprintln!("wordlib-lsp: exit requested, status {code}");
    }

    /// Compute and queue the diagnostics for one open document, stamped
    /// with the document's current version.
    pub(crate) fn publish_diagnostics(&mut self, uri: &str) {
        let Some(doc) = self.documents.get(uri) else {
            return;
        };
        let diagnostics = compute_diagnostics(&self.engine, &self.session, doc);
        let version = doc.version;
        let params = json!({
            "uri": uri,
            "version": version,
            "diagnostics": diagnostics,
        });
        self.notify(methods::TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS, params);
    }

    /// Republish diagnostics for every open document at its current
    /// version. URIs are visited in sorted order so emission is stable.
    pub(crate) fn revalidate_all(&mut self) {
        let mut uris: Vec<String> = self.documents.iter().map(|d| d.uri.clone()).collect();
        uris.sort();
        for uri in uris {
            self.publish_diagnostics(&uri);
        }
    }

    /// Load the global dictionary, then the workspace one, into the engine.
    /// A missing file is an empty load; other failures are logged and the
    /// server continues with what it has.
    pub(crate) fn load_dictionaries(&mut self) {
        let global = self.session.global_dictionary.clone();
        match dictionary::load(&mut self.engine, &global) {
            Ok(count) => {
                if count > 0 || self.trace {
                    eprintln!("wordlib-lsp: loaded {count} words from {}", global.display());
                }
            }
            Err(e) => eprintln!("wordlib-lsp: cannot load {}: {e}", global.display()),
        }
        if let Some(workspace) = self.session.workspace_dictionary.clone() {
            match dictionary::load(&mut self.engine, &workspace) {
                Ok(count) => {
                    if count > 0 || self.trace {
                        eprintln!(
                            "wordlib-lsp: loaded {count} words from {}",
                            workspace.display()
                        );
                    }
                }
                Err(e) => eprintln!("wordlib-lsp: cannot load {}: {e}", workspace.display()),
            }
        }
        self.engine.mark_clean();
    }

    /// Serve messages until `exit` or EOF. Returns the process exit status:
    /// the code recorded by `exit`, or 0 on a clean EOF.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> io::Result<i32> {
        loop {
            let Some(request) = read_message(reader)? else {
                eprintln!("wordlib-lsp: EOF on input, shutting down");
                break;
            };
            if self.trace {
                eprintln!("wordlib-lsp: <- {} (id: {:?})", request.method, request.id);
            }

            let response = self.handle_request(request);

            // Diagnostics triggered by this message go out before its
            // response, in the order they were queued.
            for (method, params) in self.take_notifications() {
                write_notification(writer, &method, params)?;
            }
            if let Some(response) = response {
                write_message(writer, &response)?;
            }
            if self.lifecycle == Lifecycle::Stopped {
                break;
            }
        }
        Ok(self.exit_code.unwrap_or(0))
    }
}
