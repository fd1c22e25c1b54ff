//! Content-Length message framing.

use std::io::{self, BufRead, Write};
use wordlib_lsp_protocol::{JsonRpcRequest, JsonRpcResponse};

/// Read the next JSON-RPC message from a buffered reader.
///
/// Returns `Ok(None)` on EOF. Frames with a malformed body are logged and
/// skipped, and reading continues with the next frame, so a single bad
/// client message cannot end the session. Only I/O errors propagate.
pub fn read_message<R: BufRead>(reader: &mut R) -> io::Result<Option<JsonRpcRequest>> {
    loop {
        let mut content_length: Option<usize> = None;

        // Headers terminate at the first empty line.
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Ok(None); // EOF
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                break;
            }
            if let Some((key, value)) = line.split_once(':') {
                if key.trim().eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse::<usize>().ok();
                }
                // Other headers are tolerated and ignored.
            }
        }

        let Some(length) = content_length else {
            eprintln!("wordlib-lsp: frame without Content-Length header, skipping");
            continue;
        };

        let mut content = vec![0u8; length];
        if let Err(e) = reader.read_exact(&mut content) {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                return Ok(None);
            }
            return Err(e);
        }

        match serde_json::from_slice(&content) {
            Ok(request) => return Ok(Some(request)),
            Err(e) => {
                // No id can be recovered from a frame that does not parse,
                // so there is nothing to reply to. Log and move on.
                eprintln!("wordlib-lsp: JSON parse error: {e}");
                let body = String::from_utf8_lossy(&content);
                if body.len() > 100 {
                    eprintln!("wordlib-lsp: malformed frame (truncated): {}...", &body[..100]);
                } else {
                    eprintln!("wordlib-lsp: malformed frame: {body}");
                }
            }
        }
    }
}

/// Write a response with Content-Length framing and flush.
pub fn write_message<W: Write>(writer: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
    let content = serde_json::to_string(response)?;
    write!(writer, "Content-Length: {}\r\n\r\n{}", content.len(), content)?;
    writer.flush()
}

/// Write a server-to-client notification with Content-Length framing.
pub fn write_notification<W: Write>(
    writer: &mut W,
    method: &str,
    params: serde_json::Value,
) -> io::Result<()> {
    let notification = serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params
    });
    let content = serde_json::to_string(&notification)?;
    write!(writer, "Content-Length: {}\r\n\r\n{}", content.len(), content)?;
    writer.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn frame(body: &str) -> Vec<u8> {
        format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
    }

    #[test]
    fn reads_a_framed_request() {
        let mut input = Cursor::new(frame(r#"{"jsonrpc":"2.0","id":1,"method":"shutdown"}"#));
        let req = read_message(&mut input).expect("io").expect("message");
        assert_eq!(req.method, "shutdown");
        assert_eq!(req.id, Some(serde_json::json!(1)));
    }

    #[test]
    fn eof_yields_none() {
        let mut input = Cursor::new(Vec::new());
        assert!(read_message(&mut input).expect("io").is_none());
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let body = r#"{"jsonrpc":"2.0","method":"initialized"}"#;
        let raw = format!("content-length: {}\r\n\r\n{}", body.len(), body);
        let mut input = Cursor::new(raw.into_bytes());
        let req = read_message(&mut input).expect("io").expect("message");
        assert_eq!(req.method, "initialized");
    }

    #[test]
    fn extra_headers_are_ignored() {
        let body = r#"{"jsonrpc":"2.0","method":"initialized"}"#;
        let raw = format!(
            "Content-Type: application/vscode-jsonrpc\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let mut input = Cursor::new(raw.into_bytes());
        let req = read_message(&mut input).expect("io").expect("message");
        assert_eq!(req.method, "initialized");
    }

    #[test]
    fn malformed_body_is_skipped_and_reading_continues() {
        let mut raw = frame("{not json");
        raw.extend(frame(r#"{"jsonrpc":"2.0","method":"exit"}"#));
        let mut input = Cursor::new(raw);
        let req = read_message(&mut input).expect("io").expect("message");
        assert_eq!(req.method, "exit");
    }

    #[test]
    fn truncated_body_yields_none() {
        let mut input =
            Cursor::new(b"Content-Length: 100\r\n\r\n{\"jsonrpc\":\"2.0\"".to_vec());
        assert!(read_message(&mut input).expect("io").is_none());
    }

    #[test]
    fn response_round_trips_through_framing() {
        let mut out = Vec::new();
        let response = JsonRpcResponse::null(Some(serde_json::json!(3)));
        write_message(&mut out, &response).expect("write");

        let text = String::from_utf8(out).expect("utf8");
        let body = r#"{"jsonrpc":"2.0","id":3,"result":null}"#;
        assert_eq!(text, format!("Content-Length: {}\r\n\r\n{}", body.len(), body));
    }

    #[test]
    fn notification_is_framed() {
        let mut out = Vec::new();
        write_notification(
            &mut out,
            "textDocument/publishDiagnostics",
            serde_json::json!({"uri": "file:///a.txt", "diagnostics": []}),
        )
        .expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("Content-Length: "));
        assert!(text.contains("textDocument/publishDiagnostics"));
    }
}
