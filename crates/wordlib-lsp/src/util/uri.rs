//! File URI handling.

use std::path::PathBuf;
use url::Url;

/// Convert a `file://` URI to a filesystem path.
///
/// Delegates to the `url` crate, which handles percent-encoding (`%20` and
/// friends), non-ASCII paths, and both authority forms a file URI may carry
/// (`file:///p` and the RFC 8089 `file://localhost/p`). Returns `None` for
/// non-file schemes, remote hosts, and URIs that do not parse.
pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}
