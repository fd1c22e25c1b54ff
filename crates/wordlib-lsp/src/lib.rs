//! wordlib language server.
//!
//! Publishes unknown-word diagnostics from a user-curated dictionary,
//! serves prefix completions, and offers add/ignore quick fixes, speaking
//! LSP 3.17 over stdio.
//!
//! # Architecture
//!
//! - [`server`] - server state, lifecycle, and the read/dispatch/write loop
//! - [`dispatch`] - method routing and the individual handlers
//! - [`state`] - open documents and session configuration
//! - [`features`] - diagnostics, completion, and code-action providers
//! - [`execute_command`] - the `wordlib.addWord` / `wordlib.ignoreWord`
//!   commands
//!
//! The engine itself (interning, indices, persistence) lives in
//! `wordlib-engine`; this crate adapts it to the protocol.
//!
//! # Usage
//!
//! ```no_run
//! # fn main() -> std::io::Result<()> {
//! let status = wordlib_lsp::run_stdio()?;
//! std::process::exit(status);
//! # }
//! ```

#![deny(unsafe_code)]

mod dispatch;
pub mod execute_command;
pub mod features;
pub mod server;
pub mod state;
pub mod util;

pub use server::{Lifecycle, LspServer};
pub use wordlib_lsp_protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

use std::io::{self, BufReader};

/// Run the language server over stdin/stdout until `exit` or EOF.
///
/// Returns the process exit status: 0 when `exit` followed `shutdown` (or
/// on clean EOF), 1 when the client exited without shutting down.
pub fn run_stdio() -> io::Result<i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = BufReader::new(stdin.lock());
    let mut writer = stdout.lock();
    let mut server = LspServer::new();
    server.run(&mut reader, &mut writer)
}
