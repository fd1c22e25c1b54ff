//! Request dispatch and method handlers.
//!
//! Every inbound message flows through [`LspServer::handle_request`]:
//! lifecycle gating first, then a match on the method string, then uniform
//! response shaping. Handlers return `Ok(Some(value))` for a result,
//! `Ok(None)` for notifications (mapped to a null result if the client sent
//! an id anyway), or a [`JsonRpcError`]. Errors on notifications have no
//! reply to ride on and are logged instead.

use crate::execute_command::{parse_command, DictionaryCommand};
use crate::features::{code_actions, completion};
use crate::server::{Lifecycle, LspServer};
use crate::state::{CloseOutcome, OpenOutcome, UpdateOutcome};
use crate::util::uri::uri_to_path;
use lsp_types::{CompletionList, Diagnostic};
use serde_json::{json, Value};
use wordlib_engine::EngineError;
use wordlib_lsp_protocol::{
    capabilities, methods, JsonRpcError, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR,
    INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, SERVER_NOT_INITIALIZED,
};

type HandlerResult = Result<Option<Value>, JsonRpcError>;

fn bad_params(method: &str, detail: &str) -> JsonRpcError {
    JsonRpcError::new(INVALID_PARAMS, format!("{method}: {detail}"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("serialization failed: {e}")))
}

impl LspServer {
    /// Classify and route one inbound message, producing its response.
    ///
    /// Returns `None` for notifications (and for anything arriving after
    /// `exit`). State gating happens before routing: requests before
    /// `initialize` has completed get `-32002`, requests during shutdown
    /// get `-32600`, and `exit` works in every state.
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let JsonRpcRequest { id, method, params, .. } = request;
        let is_request = id.is_some();

        // exit and $/cancelRequest bypass lifecycle gating entirely.
        if method == methods::EXIT {
            self.record_exit();
            return None;
        }
        if method == methods::CANCEL_REQUEST {
            // Accepted but not acted on; the named request still gets its
            // eventual reply.
            return None;
        }

        match self.lifecycle {
            Lifecycle::Stopped => return None,
            Lifecycle::ShuttingDown => {
                return is_request.then(|| {
                    JsonRpcResponse::error(
                        id,
                        JsonRpcError::new(
                            INVALID_REQUEST,
                            format!("server is shutting down, rejecting '{method}'"),
                        ),
                    )
                });
            }
            Lifecycle::Uninit | Lifecycle::Initializing
                if method != methods::INITIALIZE && method != methods::INITIALIZED =>
            {
                return if is_request {
                    Some(JsonRpcResponse::error(
                        id,
                        JsonRpcError::new(SERVER_NOT_INITIALIZED, "Server not initialized"),
                    ))
                } else {
                    eprintln!("wordlib-lsp: dropping '{method}' before initialization");
                    None
                };
            }
            _ => {}
        }

        let result = match method.as_str() {
            methods::INITIALIZE => self.handle_initialize(params),
            methods::INITIALIZED => self.handle_initialized(),
            methods::SHUTDOWN => self.handle_shutdown(),
            methods::TEXT_DOCUMENT_DID_OPEN => self.handle_did_open(params),
            methods::TEXT_DOCUMENT_DID_CHANGE => self.handle_did_change(params),
            methods::TEXT_DOCUMENT_DID_CLOSE => self.handle_did_close(params),
            // Full-sync servers have nothing to do on save.
            methods::TEXT_DOCUMENT_DID_SAVE => Ok(None),
            methods::TEXT_DOCUMENT_COMPLETION => self.handle_completion(params),
            methods::TEXT_DOCUMENT_CODE_ACTION => self.handle_code_action(params),
            methods::WORKSPACE_EXECUTE_COMMAND => self.handle_execute_command(params),
            methods::WORKSPACE_DID_CHANGE_CONFIGURATION => {
                self.handle_did_change_configuration(params)
            }
            methods::SET_TRACE => self.handle_set_trace(params),
            _ => {
                if is_request {
                    Err(JsonRpcError::new(
                        METHOD_NOT_FOUND,
                        format!("Method '{method}' not found"),
                    ))
                } else {
                    eprintln!("wordlib-lsp: ignoring unknown notification '{method}'");
                    Ok(None)
                }
            }
        };

        match result {
            Ok(Some(value)) => is_request.then(|| JsonRpcResponse::success(id, value)),
            Ok(None) => is_request.then(|| JsonRpcResponse::null(id)),
            Err(error) => {
                eprintln!("wordlib-lsp: '{method}' failed: {error}");
                is_request.then(|| JsonRpcResponse::error(id, error))
            }
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    fn handle_initialize(&mut self, params: Option<Value>) -> HandlerResult {
        if self.lifecycle != Lifecycle::Uninit {
            return Err(JsonRpcError::new(
                INVALID_REQUEST,
                "initialize may only be sent once",
            ));
        }
        let params = params.unwrap_or(Value::Null);

        // Settings may arrive up front in initializationOptions, either as
        // the section itself or nested under a "wordlib" key.
        if let Some(options) = params.get("initializationOptions") {
            let section = options.get("wordlib").unwrap_or(options);
            self.session.settings.update_from_value(section);
        }

        // The folding mode of an engine is fixed for its lifetime. The
        // engine holds no words yet, so honoring the configured mode means
        // replacing it now, before the dictionaries load.
        if self.session.settings.case_sensitive != self.engine.case_sensitive() {
            self.engine = wordlib_engine::Engine::new(self.session.settings.case_sensitive);
        }

        if let Some(path) = self.session.settings.dictionary_path.clone() {
            self.session.set_global_dictionary(path);
        }

        let root = params
            .get("rootUri")
            .and_then(|v| v.as_str())
            .and_then(uri_to_path)
            .or_else(|| {
                params
                    .get("workspaceFolders")
                    .and_then(|v| v.as_array())
                    .and_then(|folders| folders.first())
                    .and_then(|folder| folder.get("uri"))
                    .and_then(|v| v.as_str())
                    .and_then(uri_to_path)
            });
        if let Some(root) = root {
            self.session.set_workspace_root(&root);
        }

        self.load_dictionaries();
        self.lifecycle = Lifecycle::Initializing;

        Ok(Some(json!({
            "capabilities": capabilities::server_capabilities(),
            "serverInfo": {
                "name": "wordlib-lsp",
                "version": env!("CARGO_PKG_VERSION"),
            },
        })))
    }

    fn handle_initialized(&mut self) -> HandlerResult {
        if self.lifecycle == Lifecycle::Initializing {
            self.lifecycle = Lifecycle::Running;
            eprintln!(
                "wordlib-lsp: initialized ({} dictionary words)",
                self.engine.count()
            );
        } else {
            eprintln!("wordlib-lsp: unexpected 'initialized' notification, ignoring");
        }
        Ok(None)
    }

    fn handle_shutdown(&mut self) -> HandlerResult {
        self.lifecycle = Lifecycle::ShuttingDown;
        Ok(Some(Value::Null))
    }

    // ------------------------------------------------------------------
    // Text document synchronization
    // ------------------------------------------------------------------

    fn handle_did_open(&mut self, params: Option<Value>) -> HandlerResult {
        const METHOD: &str = methods::TEXT_DOCUMENT_DID_OPEN;
        let params = params.ok_or_else(|| bad_params(METHOD, "missing params"))?;
        let doc = params
            .get("textDocument")
            .ok_or_else(|| bad_params(METHOD, "missing textDocument"))?;
        let uri = doc
            .get("uri")
            .and_then(|v| v.as_str())
            .ok_or_else(|| bad_params(METHOD, "missing textDocument.uri"))?;
        let text = doc
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| bad_params(METHOD, "missing textDocument.text"))?;
        let language = doc.get("languageId").and_then(|v| v.as_str()).unwrap_or("plaintext");
        let version = doc.get("version").and_then(|v| v.as_i64()).unwrap_or(0);

        match self.documents.open(uri, language, version, text.to_string()) {
            OpenOutcome::Opened => {
                let uri = uri.to_string();
                self.publish_diagnostics(&uri);
            }
            OpenOutcome::AlreadyOpen => {
                eprintln!("wordlib-lsp: duplicate didOpen for {uri}, ignoring");
            }
        }
        Ok(None)
    }

    fn handle_did_change(&mut self, params: Option<Value>) -> HandlerResult {
        const METHOD: &str = methods::TEXT_DOCUMENT_DID_CHANGE;
        let params = params.ok_or_else(|| bad_params(METHOD, "missing params"))?;
        let doc = params
            .get("textDocument")
            .ok_or_else(|| bad_params(METHOD, "missing textDocument"))?;
        let uri = doc
            .get("uri")
            .and_then(|v| v.as_str())
            .ok_or_else(|| bad_params(METHOD, "missing textDocument.uri"))?;
        let version = doc
            .get("version")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| bad_params(METHOD, "missing textDocument.version"))?;
        // Full sync: the last change event carries the complete new text.
        let text = params
            .get("contentChanges")
            .and_then(|v| v.as_array())
            .and_then(|changes| changes.last())
            .and_then(|change| change.get("text"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| bad_params(METHOD, "missing contentChanges text"))?;

        match self.documents.update(uri, version, text.to_string()) {
            UpdateOutcome::Updated => {
                let uri = uri.to_string();
                self.publish_diagnostics(&uri);
            }
            UpdateOutcome::StaleUpdate => {
                // Version regression; the stored text stays as it was and
                // no diagnostics are emitted for the non-change.
                eprintln!("wordlib-lsp: stale didChange for {uri} (version {version}), dropped");
            }
            UpdateOutcome::NotOpen => {
                eprintln!("wordlib-lsp: didChange for unopened {uri}, ignoring");
            }
        }
        Ok(None)
    }

    fn handle_did_close(&mut self, params: Option<Value>) -> HandlerResult {
        const METHOD: &str = methods::TEXT_DOCUMENT_DID_CLOSE;
        let params = params.ok_or_else(|| bad_params(METHOD, "missing params"))?;
        let uri = params
            .get("textDocument")
            .and_then(|d| d.get("uri"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| bad_params(METHOD, "missing textDocument.uri"))?
            .to_string();

        let version = self.documents.get(&uri).map(|d| d.version);
        match self.documents.close(&uri) {
            CloseOutcome::Closed => {
                // An empty publish clears the client's diagnostics.
                self.notify(
                    methods::TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS,
                    json!({ "uri": uri, "version": version, "diagnostics": [] }),
                );
            }
            CloseOutcome::NotOpen => {
                eprintln!("wordlib-lsp: didClose for unopened {uri}, ignoring");
            }
        }
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Language features
    // ------------------------------------------------------------------

    fn handle_completion(&mut self, params: Option<Value>) -> HandlerResult {
        const METHOD: &str = methods::TEXT_DOCUMENT_COMPLETION;
        let params = params.ok_or_else(|| bad_params(METHOD, "missing params"))?;
        let uri = params
            .get("textDocument")
            .and_then(|d| d.get("uri"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| bad_params(METHOD, "missing textDocument.uri"))?;
        let position = params
            .get("position")
            .ok_or_else(|| bad_params(METHOD, "missing position"))?;
        let line = position
            .get("line")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| bad_params(METHOD, "missing position.line"))? as u32;
        let character = position
            .get("character")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| bad_params(METHOD, "missing position.character"))?
            as u32;

        let Some(doc) = self.documents.get(uri) else {
            eprintln!("wordlib-lsp: completion for unopened {uri}, returning empty list");
            let empty = CompletionList { is_incomplete: false, items: Vec::new() };
            return Ok(Some(to_json(&empty)?));
        };
        let list = completion::complete_at(&self.engine, &self.session, doc, line, character);
        Ok(Some(to_json(&list)?))
    }

    fn handle_code_action(&mut self, params: Option<Value>) -> HandlerResult {
        const METHOD: &str = methods::TEXT_DOCUMENT_CODE_ACTION;
        let params = params.ok_or_else(|| bad_params(METHOD, "missing params"))?;
        let diagnostics_value = params
            .get("context")
            .and_then(|c| c.get("diagnostics"))
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let diagnostics: Vec<Diagnostic> = serde_json::from_value(diagnostics_value)
            .map_err(|e| bad_params(METHOD, &format!("malformed diagnostics: {e}")))?;

        let actions = code_actions::actions_for_diagnostics(&diagnostics);
        Ok(Some(to_json(&actions)?))
    }

    // ------------------------------------------------------------------
    // Workspace features
    // ------------------------------------------------------------------

    fn handle_execute_command(&mut self, params: Option<Value>) -> HandlerResult {
        const METHOD: &str = methods::WORKSPACE_EXECUTE_COMMAND;
        let params = params.ok_or_else(|| bad_params(METHOD, "missing params"))?;
        let command = params
            .get("command")
            .and_then(|v| v.as_str())
            .ok_or_else(|| bad_params(METHOD, "missing command"))?;
        let arguments = params.get("arguments").and_then(|v| v.as_array()).cloned();

        match parse_command(command, arguments.as_ref())? {
            DictionaryCommand::AddWord(word) => self.execute_add_word(&word),
            DictionaryCommand::IgnoreWord(word) => {
                self.session.ignore_word(&word);
                eprintln!("wordlib-lsp: ignoring '{word}' for this session");
                self.revalidate_all();
                Ok(Some(Value::Null))
            }
        }
    }

    /// Add a word, persist the dictionary, and revalidate.
    ///
    /// The in-memory add sticks even when persistence fails; the client
    /// then sees fresh diagnostics plus an error response naming the save
    /// failure.
    fn execute_add_word(&mut self, word: &str) -> HandlerResult {
        match self.engine.add(word) {
            Ok(_) => {}
            Err(EngineError::InvalidInput(reason)) => {
                return Err(JsonRpcError::new(
                    INVALID_PARAMS,
                    format!("cannot add word: {reason}"),
                ));
            }
            Err(e) => return Err(JsonRpcError::new(INTERNAL_ERROR, e.to_string())),
        }

        let target = self.session.save_target().to_path_buf();
        let persisted = wordlib_engine::dictionary::save(&self.engine, &target);
        match &persisted {
            Ok(()) => {
                self.engine.mark_clean();
                eprintln!("wordlib-lsp: added '{word}' to {}", target.display());
            }
            Err(e) => {
                eprintln!("wordlib-lsp: cannot persist dictionary to {}: {e}", target.display());
            }
        }

        self.revalidate_all();

        match persisted {
            Ok(()) => Ok(Some(Value::Null)),
            Err(e) => Err(JsonRpcError::new(
                INTERNAL_ERROR,
                format!("word added in memory, but saving the dictionary failed: {e}"),
            )),
        }
    }

    fn handle_did_change_configuration(&mut self, params: Option<Value>) -> HandlerResult {
        let section = params
            .as_ref()
            .and_then(|p| p.get("settings"))
            .map(|settings| settings.get("wordlib").unwrap_or(settings).clone())
            .unwrap_or(Value::Null);

        let previous_dictionary = self.session.settings.dictionary_path.clone();
        self.session.settings.update_from_value(&section);

        // The engine's folding mode cannot change mid-session.
        if self.session.settings.case_sensitive != self.engine.case_sensitive() {
            eprintln!(
                "wordlib-lsp: caseSensitive takes effect at the next initialize, keeping {}",
                self.engine.case_sensitive()
            );
            self.session.settings.case_sensitive = self.engine.case_sensitive();
        }
        // Likewise the dictionary already loaded from the old path.
        if self.session.settings.dictionary_path != previous_dictionary {
            eprintln!("wordlib-lsp: dictionaryPath takes effect at the next initialize");
        }

        self.revalidate_all();
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Special
    // ------------------------------------------------------------------

    fn handle_set_trace(&mut self, params: Option<Value>) -> HandlerResult {
        if let Some(value) = params
            .as_ref()
            .and_then(|p| p.get("value"))
            .and_then(|v| v.as_str())
        {
            self.trace = matches!(value, "messages" | "verbose");
        }
        Ok(None)
    }
}
