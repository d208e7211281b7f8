use std::path::{Path, PathBuf};

use super::BuildConfig;

/// Name of the address book artifact inside the build directory.
pub const ADDRESS_BOOK_FILENAME: &str = "addresses.json";

/// Name of the avatar output directory inside the build directory.
pub const AVATAR_OUTPUT_DIRNAME: &str = "avatars";

/// Logical layout of a build on disk.
///
/// Derived from a root path and a config. It does *not* perform any IO
/// itself; the pipeline creates output directories when it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// Root directory of the address book repository.
    pub root: PathBuf,
    /// Directory holding the YAML sources.
    pub source_dir: PathBuf,
    /// Directory for build artifacts.
    pub build_dir: PathBuf,
    /// Path of the address book JSON artifact.
    pub address_book_path: PathBuf,
    /// Directory holding avatar images named by address.
    pub avatars_dir: PathBuf,
    /// Directory receiving resized avatar variants.
    pub avatars_output_dir: PathBuf,
}

impl BuildLayout {
    /// Default layout for `root` (`source/`, `build/`, `avatars/`).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_config(root, &BuildConfig::default())
    }

    /// Layout for `root` with directory names taken from `config`.
    pub fn with_config(root: impl AsRef<Path>, config: &BuildConfig) -> Self {
        let root = root.as_ref().to_path_buf();
        let source_dir = resolve(&root, &config.source_dir);
        let build_dir = resolve(&root, &config.build_dir);
        let address_book_path = build_dir.join(ADDRESS_BOOK_FILENAME);
        let avatars_dir = resolve(&root, &config.avatars_dir);
        let avatars_output_dir = build_dir.join(AVATAR_OUTPUT_DIRNAME);

        Self { root, source_dir, build_dir, address_book_path, avatars_dir, avatars_output_dir }
    }
}

fn resolve(root: &Path, dir: &str) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
