use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{BuildError, BuildResult};
use crate::model::AddressBook;

/// Render the book as pretty JSON (2-space indent, insertion order, trailing newline).
pub fn render_address_book(book: &AddressBook) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(book)?;
    json.push('\n');
    Ok(json)
}

/// Write the book to `path`, replacing any previous artifact atomically.
///
/// The JSON goes to a temp file next to `path` first and is renamed into
/// place, so readers never observe a half-written artifact. Returns the
/// number of entries written.
pub fn write_address_book(book: &AddressBook, path: &Path) -> BuildResult<usize> {
    let serialize_err = |message: String| BuildError::Serialize { path: path.to_path_buf(), message };
    let json = render_address_book(book).map_err(|e| serialize_err(e.to_string()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| BuildError::Io {
        action: "create build directory",
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| serialize_err(e.to_string()))?;
    tmp.write_all(json.as_bytes()).map_err(|e| serialize_err(e.to_string()))?;
    tmp.as_file().sync_all().map_err(|e| serialize_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| serialize_err(e.error.to_string()))?;

    tracing::info!("Wrote {} entries to {}", book.len(), path.display());
    Ok(book.len())
}
