use addrbook::commands::{avatars_command, build_command, validate_command};
use addrbook::verbosity_level;
use anyhow::Result;
use clap::{Parser, Subcommand};

/// Address book build CLI.
///
/// This CLI is a thin wrapper around `addrbook-core` (exposed in code as
/// `addrbook_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "addrbook",
    version,
    about = "Validate and build the curated TON address book",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every source file without writing anything (default).
    Validate {
        /// Repository root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit a JSON summary instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Validate, write `build/addresses.json`, and generate avatar variants.
    ///
    /// Nothing is written if any source entry fails validation.
    Build {
        /// Repository root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Skip the avatar pass.
        #[arg(long, default_value_t = false)]
        skip_avatars: bool,

        /// Emit a JSON summary instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Generate avatar variants only.
    Avatars {
        /// Repository root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Emit a JSON summary instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(verbosity_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    // Default to validation if no command is provided.
    match cli.command.unwrap_or(Command::Validate { root: ".".to_string(), json: false }) {
        Command::Validate { root, json } => validate_command(&root, json)?,
        Command::Build { root, skip_avatars, json } => build_command(&root, skip_avatars, json)?,
        Command::Avatars { root, json } => avatars_command(&root, json)?,
    }

    Ok(())
}
