//! Source loading: directory listing, concurrent reads, YAML document splitting.
//!
//! Reads are issued concurrently (one scoped thread per file) but collected in
//! listing order, so everything downstream sees files in a fixed order no
//! matter which read finishes first.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use serde::Deserialize;

use crate::error::{BuildError, BuildResult};
use crate::model::{value_kind, SourceEntry};

/// Suffix a file must carry to be treated as an address source.
pub const SOURCE_SUFFIX: &str = ".yaml";

/// Full text of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub filename: String,
    pub text: String,
}

/// List `.yaml` files in `dir`, sorted by file name.
pub fn list_source_files(dir: &Path) -> BuildResult<Vec<PathBuf>> {
    let read_dir = fs::read_dir(dir).map_err(|source| BuildError::Io {
        action: "list source directory",
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| BuildError::Io {
            action: "list source directory",
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        // `Path::is_file` follows symlinks; a linked source counts.
        if name.ends_with(SOURCE_SUFFIX) && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read every source file in `dir`. The result preserves listing order.
pub fn load_sources(dir: &Path) -> BuildResult<Vec<SourceFile>> {
    let paths = list_source_files(dir)?;

    thread::scope(|scope| {
        // Fire all reads first, then await them in listing order.
        let pending: Vec<_> = paths
            .iter()
            .map(|path| scope.spawn(move || read_source(path)))
            .collect();

        pending
            .into_iter()
            .zip(&paths)
            .map(|(handle, path)| {
                handle.join().unwrap_or_else(|_| {
                    Err(BuildError::Io {
                        action: "read source file",
                        path: path.clone(),
                        source: std::io::Error::other("reader thread panicked"),
                    })
                })
            })
            .collect()
    })
}

fn read_source(path: &Path) -> BuildResult<SourceFile> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::Io {
        action: "read source file",
        path: path.to_path_buf(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::debug!("Loaded {} ({} bytes)", filename, text.len());
    Ok(SourceFile { filename, text })
}

/// Split a multi-document YAML file into entries, in document order.
///
/// A document may hold a single mapping, a sequence of mappings (flattened),
/// or nothing at all (skipped).
pub fn parse_entries(file: &SourceFile) -> BuildResult<Vec<SourceEntry>> {
    let parse_error = |message: String| BuildError::Parse {
        filename: file.filename.clone(),
        message,
    };

    let mut entries = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&file.text) {
        let value = serde_yaml::Value::deserialize(document).map_err(|e| parse_error(e.to_string()))?;
        match value {
            serde_yaml::Value::Null => {}
            serde_yaml::Value::Sequence(items) => {
                for item in items {
                    entries.push(entry_from_value(item).map_err(|e| parse_error(e.to_string()))?);
                }
            }
            serde_yaml::Value::Mapping(_) => {
                entries.push(entry_from_value(value).map_err(|e| parse_error(e.to_string()))?);
            }
            other => {
                return Err(parse_error(format!(
                    "expected a mapping or a list of mappings, found {}",
                    value_kind(&other)
                )));
            }
        }
    }

    for entry in &mut entries {
        entry.filename.clone_from(&file.filename);
    }
    Ok(entries)
}

fn entry_from_value(value: serde_yaml::Value) -> Result<SourceEntry, serde_yaml::Error> {
    serde_yaml::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(text: &str) -> SourceFile {
        SourceFile { filename: "people.yaml".into(), text: text.into() }
    }

    #[test]
    fn splits_documents_and_flattens_sequences() {
        let text = "address: A1\nname: First\n---\n- address: A2\n  name: Second\n- address: A3\n  name: Third\n---\n";
        let entries = parse_entries(&file(text)).unwrap();
        let addresses: Vec<_> = entries.iter().map(|e| e.address.as_deref().unwrap()).collect();
        assert_eq!(addresses, ["A1", "A2", "A3"]);
        assert!(entries.iter().all(|e| e.filename == "people.yaml"));
    }

    #[test]
    fn empty_file_has_no_entries() {
        assert!(parse_entries(&file("")).unwrap().is_empty());
        assert!(parse_entries(&file("---\n---\n")).unwrap().is_empty());
    }

    #[test]
    fn scalar_document_is_a_parse_error() {
        let err = parse_entries(&file("just text\n")).unwrap_err();
        assert!(matches!(err, BuildError::Parse { ref filename, .. } if filename == "people.yaml"));
        assert!(err.to_string().contains("found a string"), "unexpected error: {err}");
    }

    #[test]
    fn listing_is_sorted_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b.yaml", "a.yaml", "notes.txt", "c.yml"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }
        fs::create_dir(tmp.path().join("dir.yaml")).unwrap();

        let names: Vec<_> = list_source_files(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.yaml", "b.yaml"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_sources_are_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        let source_dir = tmp.path().join("source");
        fs::create_dir(&source_dir).unwrap();
        fs::write(tmp.path().join("real.yaml"), "address: A1
name: Linked
").unwrap();
        std::os::unix::fs::symlink("../real.yaml", source_dir.join("linked.yaml")).unwrap();

        let files = load_sources(&source_dir).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "linked.yaml");
        let entries = parse_entries(&files[0]).unwrap();
        assert_eq!(entries[0].name.as_deref(), Some("Linked"));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let err = parse_entries(&file("address: [unterminated\n")).unwrap_err();
        assert!(err.to_string().starts_with("[people.yaml] Failed to parse YAML"));
    }
}
