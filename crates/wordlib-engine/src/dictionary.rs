//! Dictionary file load/save.
//!
//! Format v1 is one UTF-8 word per line. The first line of a written file is
//! always the header `# wordlib dictionary v1`; on read the header is just
//! another comment. Lines that are empty or start with `#` are comments.
//!
//! Saves are atomic against power loss: the new content goes to a temp file
//! in the same directory, is forced to stable storage, and is then renamed
//! over the destination. Readers therefore observe either the old file or
//! the new one, never a partial write.

use crate::engine::Engine;
use crate::error::EngineError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Header written as the first line of every saved dictionary.
pub const DICTIONARY_HEADER: &str = "# wordlib dictionary v1";

fn io_err(path: &Path, source: std::io::Error) -> EngineError {
    EngineError::Io { path: path.to_path_buf(), source }
}

/// Load a dictionary file into the engine, merging with its current words.
///
/// Returns the number of words added. A missing file is an empty load, not
/// an error. Lines the engine refuses to store are skipped with a warning.
/// Leftover temp files from an interrupted earlier save are removed.
pub fn load(engine: &mut Engine, path: &Path) -> Result<usize, EngineError> {
    remove_stale_temp_files(path);

    let raw = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(io_err(path, e)),
    };
    // Tolerate a UTF-8 BOM on read; we never write one.
    let raw = raw.strip_prefix(b"\xef\xbb\xbf").unwrap_or(&raw);
    let text = String::from_utf8_lossy(raw);

    let mut added = 0;
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match engine.add(line) {
            Ok(crate::engine::AddOutcome::Added) => added += 1,
            Ok(crate::engine::AddOutcome::AlreadyPresent) => {}
            Err(EngineError::InvalidInput(reason)) => {
                eprintln!("wordlib: skipping dictionary line in {}: {reason}", path.display());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(added)
}

/// Atomically save the engine's word set to `path`.
///
/// Words are written in lexicographic byte order so repeated saves of the
/// same set produce identical files. The parent directory is created if
/// missing. On any failure the temp file is unlinked and the destination is
/// untouched.
pub fn save(engine: &Engine, path: &Path) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_err(path, e))?;
        }
    }

    let tmp = temp_path(path);
    let result = write_words(engine, &tmp).and_then(|()| {
        fs::rename(&tmp, path).map_err(|e| io_err(path, e))
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Write the sorted word list to the temp file and force it to disk.
fn write_words(engine: &Engine, tmp: &Path) -> Result<(), EngineError> {
    let mut words: Vec<&str> = engine.words().collect();
    words.sort_unstable();

    let file = File::create(tmp).map_err(|e| io_err(tmp, e))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{DICTIONARY_HEADER}").map_err(|e| io_err(tmp, e))?;
    for word in words {
        writeln!(writer, "{word}").map_err(|e| io_err(tmp, e))?;
    }
    writer.flush().map_err(|e| io_err(tmp, e))?;
    // flush() drained user-space buffers; sync_all forces the data to the
    // device before the rename can make it visible.
    writer
        .into_inner()
        .map_err(|e| io_err(tmp, e.into_error()))?
        .sync_all()
        .map_err(|e| io_err(tmp, e))?;
    Ok(())
}

/// Temp file sibling of `path`, distinguished by pid so concurrent saves
/// from different processes cannot collide.
fn temp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".tmp.{}", std::process::id()));
    path.with_file_name(name)
}

/// Remove `<name>.tmp*` siblings left behind by an interrupted save.
fn remove_stale_temp_files(path: &Path) {
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return;
    };
    let Some(name) = name.to_str() else {
        return;
    };
    let prefix = format!("{name}.tmp");
    let Ok(entries) = fs::read_dir(parent) else {
        return;
    };
    for entry in entries.flatten() {
        if let Some(entry_name) = entry.file_name().to_str() {
            if entry_name.starts_with(&prefix) {
                let _ = fs::remove_file(entry.path());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn word_set(engine: &Engine) -> BTreeSet<String> {
        engine.words().map(str::to_string).collect()
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dictionary.txt");

        let mut engine = Engine::new(false);
        for w in ["hello", "world", "café"] {
            engine.add(w).expect("add");
        }
        save(&engine, &path).expect("save");

        let mut restored = Engine::new(false);
        let added = load(&mut restored, &path).expect("load");
        assert_eq!(added, 3);
        assert_eq!(word_set(&restored), word_set(&engine));
    }

    #[test]
    fn written_file_is_sorted_with_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dictionary.txt");

        let mut engine = Engine::new(true);
        for w in ["zebra", "apple", "mango"] {
            engine.add(w).expect("add");
        }
        save(&engine, &path).expect("save");

        let content = fs::read_to_string(&path).expect("read");
        assert_eq!(content, "# wordlib dictionary v1\napple\nmango\nzebra\n");
    }

    #[test]
    fn load_of_missing_file_is_empty_success() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut engine = Engine::new(true);
        let added = load(&mut engine, &dir.path().join("nope.txt")).expect("load");
        assert_eq!(added, 0);
        assert_eq!(engine.count(), 0);
    }

    #[test]
    fn comments_blank_lines_and_bom_are_tolerated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dictionary.txt");
        fs::write(&path, "\u{feff}# a comment\n\nhello\n# another\nworld\n").expect("write");

        let mut engine = Engine::new(true);
        let added = load(&mut engine, &path).expect("load");
        assert_eq!(added, 2);
        assert!(engine.contains("hello"));
        assert!(engine.contains("world"));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dictionary.txt");
        fs::write(&path, "hello\r\nworld\r\n").expect("write");

        let mut engine = Engine::new(true);
        assert_eq!(load(&mut engine, &path).expect("load"), 2);
        assert!(engine.contains("hello"));
    }

    #[test]
    fn load_merges_into_existing_words() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dictionary.txt");
        fs::write(&path, "shared\nfresh\n").expect("write");

        let mut engine = Engine::new(true);
        engine.add("shared").expect("add");
        engine.add("existing").expect("add");
        let added = load(&mut engine, &path).expect("load");
        assert_eq!(added, 1);
        assert_eq!(engine.count(), 3);
    }

    #[test]
    fn stale_temp_file_is_removed_on_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("dictionary.txt");
        let stale = dir.path().join("dictionary.txt.tmp.12345");
        fs::write(&path, "hello\n").expect("write");
        fs::write(&stale, "partial").expect("write");

        let mut engine = Engine::new(true);
        load(&mut engine, &path).expect("load");
        assert!(!stale.exists());
        assert!(path.exists());
    }

    #[test]
    fn save_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(".wordlib").join("dictionary.txt");

        let mut engine = Engine::new(true);
        engine.add("hello").expect("add");
        save(&engine, &path).expect("save");
        assert!(path.exists());
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory at the destination makes the final rename fail.
        let path = dir.path().join("dictionary.txt");
        fs::create_dir(&path).expect("mkdir");

        let mut engine = Engine::new(true);
        engine.add("hello").expect("add");
        assert!(save(&engine, &path).is_err());

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("read_dir")
            .flatten()
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp file not cleaned up: {leftovers:?}");
    }

    #[test]
    fn repeated_saves_are_byte_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");

        let mut engine = Engine::new(true);
        for w in ["gamma", "alpha", "beta"] {
            engine.add(w).expect("add");
        }
        save(&engine, &a).expect("save");
        save(&engine, &b).expect("save");
        assert_eq!(fs::read(&a).expect("read"), fs::read(&b).expect("read"));
    }
}
