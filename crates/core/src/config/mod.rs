//! Build configuration and on-disk layout.
//!
//! - `BuildConfig`: optional `addrbook.json` at the root, every field defaulted.
//! - `BuildLayout`: concrete paths resolved from a root and a config.

mod layout;

pub use layout::{BuildLayout, ADDRESS_BOOK_FILENAME, AVATAR_OUTPUT_DIRNAME};

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the optional config file, relative to the root.
pub const CONFIG_FILENAME: &str = "addrbook.json";

fn default_source_dir() -> String {
    "source".to_string()
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_avatars_dir() -> String {
    "avatars".to_string()
}

fn default_true() -> bool {
    true
}

/// Serializable build configuration.
///
/// Directory fields are relative to the root unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding the `.yaml` sources.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    /// Directory receiving `addresses.json` and the `avatars/` output.
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
    /// Directory holding avatar images named by address.
    #[serde(default = "default_avatars_dir")]
    pub avatars_dir: String,
    /// Avatar worker threads; `0` lets rayon pick.
    #[serde(default)]
    pub avatar_workers: usize,
    /// Also publish wallets under their bounceable spelling.
    #[serde(default = "default_true")]
    pub wallet_aliases: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            build_dir: default_build_dir(),
            avatars_dir: default_avatars_dir(),
            avatar_workers: 0,
            wallet_aliases: true,
        }
    }
}

/// Load `<root>/addrbook.json`, or defaults when the file does not exist.
pub fn load_build_config(root: &Path) -> Result<BuildConfig> {
    let path = root.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(BuildConfig::default());
    }
    let body = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read build config at {}", path.display()))?;
    let config: BuildConfig =
        serde_json::from_str(&body).context("Failed to parse build config JSON")?;
    Ok(config)
}
