use addrbook_core::pipeline::run_build;
use anyhow::Result;

use crate::commands::{load_layout, print_json};

/// Validate, write `addresses.json`, and run the avatar pass unless skipped.
pub fn build_command(root: &str, skip_avatars: bool, json: bool) -> Result<()> {
    let (config, layout) = load_layout(root)?;
    let summary = run_build(&layout, &config, !skip_avatars)?;

    if json {
        return print_json(&summary);
    }

    println!("Successfully created addressbook with {} addresses", summary.entries);
    if let Some(avatars) = summary.avatars {
        println!(
            "Avatars: {} processed, {} skipped, {} files written",
            avatars.processed, avatars.skipped, avatars.written
        );
    }
    Ok(())
}
