//! wordlib language server binary.
//!
//! Speaks LSP 3.17 over stdio and can be wired into any LSP-capable
//! editor.
//!
//! Usage:
//!   wordlib-lsp [options]
//!
//! Options:
//!   --stdio      Use stdio for communication (default)
//!   --log        Enable verbose logging to stderr
//!   --version    Show version information
//!   --help       Show this help message

use std::env;
use std::io::{self, BufReader};
use std::process;
use wordlib_lsp::LspServer;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut enable_logging = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            // stdio is the only transport; the flag exists so editor
            // configurations that pass it keep working.
            "--stdio" => {}
            "--log" => enable_logging = true,
            "--version" => {
                println!("wordlib-lsp {}", env!("CARGO_PKG_VERSION"));
                process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if enable_logging {
        eprintln!("wordlib-lsp {} starting (stdio)", env!("CARGO_PKG_VERSION"));
    }

    let mut server = LspServer::new();
    server.set_trace(enable_logging);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = BufReader::new(stdin.lock());
    let mut writer = stdout.lock();

    match server.run(&mut reader, &mut writer) {
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("wordlib-lsp: I/O error: {e}");
            process::exit(1);
        }
    }
}

fn print_help() {
    eprintln!("wordlib language server");
    eprintln!();
    eprintln!("Usage: wordlib-lsp [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --stdio      Use stdio for communication (default)");
    eprintln!("  --log        Enable verbose logging to stderr");
    eprintln!("  --version    Show version information");
    eprintln!("  --help       Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  # Run under an editor (VS Code, Neovim, ...)");
    eprintln!("  wordlib-lsp --stdio");
    eprintln!();
    eprintln!("  # Run with logging enabled");
    eprintln!("  wordlib-lsp --stdio --log");
}
