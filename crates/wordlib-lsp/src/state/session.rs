//! Session-scoped server state.
//!
//! Holds everything that lives for one server run but outside the engine:
//! the volatile ignore set, the resolved dictionary paths, and the settings
//! block from `workspace/didChangeConfiguration`. Nothing here is global;
//! two server instances carry two independent sessions.

use lsp_types::DiagnosticSeverity;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use wordlib_tokenizer::TokenizerConfig;

/// Relative location of a dictionary below its root directory.
const DICTIONARY_RELATIVE_PATH: &str = ".wordlib/dictionary.txt";

/// The `wordlib` settings section.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Severity attached to unknown-word diagnostics.
    pub diagnostic_severity: DiagnosticSeverity,
    /// Whether the engine compares words without ASCII folding. Fixed once
    /// the engine exists; later changes are logged and ignored.
    pub case_sensitive: bool,
    /// Maximum edit distance for suggestion queries, clamped to 1..=5.
    pub max_suggestion_distance: u32,
    /// Override for the global dictionary path.
    pub dictionary_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            diagnostic_severity: DiagnosticSeverity::INFORMATION,
            case_sensitive: false,
            max_suggestion_distance: 2,
            dictionary_path: None,
        }
    }
}

impl Settings {
    /// Apply a `wordlib` settings object from the client.
    ///
    /// Unknown keys are ignored; recognized keys with unusable values keep
    /// their previous setting. `maxSuggestionDistance` is clamped to its
    /// documented range.
    pub fn update_from_value(&mut self, settings: &serde_json::Value) {
        if let Some(severity) = settings.get("diagnosticSeverity").and_then(|v| v.as_str()) {
            match severity {
                "error" => self.diagnostic_severity = DiagnosticSeverity::ERROR,
                "warning" => self.diagnostic_severity = DiagnosticSeverity::WARNING,
                "information" => self.diagnostic_severity = DiagnosticSeverity::INFORMATION,
                "hint" => self.diagnostic_severity = DiagnosticSeverity::HINT,
                other => {
                    eprintln!("wordlib-lsp: unknown diagnosticSeverity {other:?}, keeping current");
                }
            }
        }
        if let Some(case_sensitive) = settings.get("caseSensitive").and_then(|v| v.as_bool()) {
            self.case_sensitive = case_sensitive;
        }
        if let Some(dist) = settings.get("maxSuggestionDistance").and_then(|v| v.as_u64()) {
            self.max_suggestion_distance = dist.clamp(1, 5) as u32;
        }
        if let Some(path) = settings.get("dictionaryPath").and_then(|v| v.as_str()) {
            self.dictionary_path =
                if path.is_empty() { None } else { Some(PathBuf::from(path)) };
        }
    }
}

/// Per-run state owned by the server instance.
pub struct SessionState {
    /// Words suppressed for this session only. Stored folded when the
    /// engine folds, so membership matches engine comparisons.
    ignore: FxHashSet<String>,
    /// Global dictionary file.
    pub global_dictionary: PathBuf,
    /// Workspace dictionary file, when a workspace root is known.
    pub workspace_dictionary: Option<PathBuf>,
    /// Current settings block.
    pub settings: Settings,
    /// Word extraction options for the diagnostic and completion paths.
    pub tokenizer: TokenizerConfig,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Create a session with default settings and the default global
    /// dictionary under the user's home directory.
    pub fn new() -> Self {
        Self {
            ignore: FxHashSet::default(),
            global_dictionary: default_global_dictionary(),
            workspace_dictionary: None,
            settings: Settings::default(),
            tokenizer: TokenizerConfig::default(),
        }
    }

    /// Record the workspace root and derive its dictionary path.
    pub fn set_workspace_root(&mut self, root: &Path) {
        self.workspace_dictionary = Some(root.join(DICTIONARY_RELATIVE_PATH));
    }

    /// Replace the global dictionary path (settings override).
    pub fn set_global_dictionary(&mut self, path: PathBuf) {
        self.global_dictionary = path;
    }

    /// Where `wordlib.addWord` persists: the workspace dictionary when one
    /// is known, the global dictionary otherwise.
    pub fn save_target(&self) -> &Path {
        self.workspace_dictionary.as_deref().unwrap_or(&self.global_dictionary)
    }

    fn fold_key(&self, word: &str) -> String {
        if self.settings.case_sensitive {
            word.to_string()
        } else {
            word.to_ascii_lowercase()
        }
    }

    /// Suppress a word for the rest of the session.
    pub fn ignore_word(&mut self, word: &str) {
        let key = self.fold_key(word);
        self.ignore.insert(key);
    }

    /// Whether a word is session-ignored.
    pub fn is_ignored(&self, word: &str) -> bool {
        self.ignore.contains(self.fold_key(word).as_str())
    }

    /// Number of session-ignored words.
    pub fn ignored_count(&self) -> usize {
        self.ignore.len()
    }
}

/// `$HOME/.wordlib/dictionary.txt`, falling back to a relative path when no
/// home directory can be resolved.
fn default_global_dictionary() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DICTIONARY_RELATIVE_PATH),
        None => PathBuf::from(DICTIONARY_RELATIVE_PATH),
    }
}
