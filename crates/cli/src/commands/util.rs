use addrbook_core::config::{load_build_config, BuildConfig, BuildLayout};
use anyhow::Result;

use crate::canonicalize_or_current;

/// Resolve `root`, load its optional config, and compute the layout.
pub fn load_layout(root: &str) -> Result<(BuildConfig, BuildLayout)> {
    let root_path = canonicalize_or_current(root)?;
    let config = load_build_config(&root_path)?;
    let layout = BuildLayout::with_config(&root_path, &config);
    Ok((config, layout))
}

/// Print a serializable summary as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value)?;
    println!("{}", serialized);
    Ok(())
}
