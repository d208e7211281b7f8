use addrbook_core::avatars::generate_avatars;
use anyhow::Result;

use crate::commands::{load_layout, print_json};

/// Run only the avatar pass. Never fails on per-file problems.
pub fn avatars_command(root: &str, json: bool) -> Result<()> {
    let (config, layout) = load_layout(root)?;
    let report =
        generate_avatars(&layout.avatars_dir, &layout.avatars_output_dir, config.avatar_workers);

    if json {
        return print_json(&report);
    }

    println!("Avatars:");
    println!("- processed: {}", report.processed);
    println!("- skipped: {}", report.skipped);
    println!("- files written: {} ({})", report.written, layout.avatars_output_dir.display());
    Ok(())
}
