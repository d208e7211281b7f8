use addrbook_core::pipeline::{check_sources, PipelineOptions};
use anyhow::Result;

use crate::commands::{load_layout, print_json};

/// Validate every source file without writing anything.
pub fn validate_command(root: &str, json: bool) -> Result<()> {
    let (config, layout) = load_layout(root)?;
    let summary = check_sources(&layout, PipelineOptions::from(&config))?;

    if json {
        return print_json(&summary);
    }

    println!("Success: all yaml files are valid, checked {} addresses", summary.entries);
    Ok(())
}
