//! The address book pipeline: load → parse → validate → canonicalize →
//! dedup/assemble → serialize.
//!
//! Everything after loading is sequential. Duplicate detection depends on the
//! order entries are seen, and that order is the sorted file listing followed
//! by document order inside each file.

pub mod assemble;
pub mod canonical;
pub mod serialize;
pub mod validate;

use std::path::Path;

use serde::Serialize;

use crate::avatars::{generate_avatars, AvatarReport};
use crate::config::{BuildConfig, BuildLayout};
use crate::error::BuildResult;
use crate::model::AddressBook;
use crate::source::{load_sources, parse_entries, SourceFile};

pub use assemble::AddressBookBuilder;
pub use serialize::{render_address_book, write_address_book};
pub use validate::validate_entry;

/// Options for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub wallet_aliases: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { wallet_aliases: true }
    }
}

impl From<&BuildConfig> for PipelineOptions {
    fn from(config: &BuildConfig) -> Self {
        Self { wallet_aliases: config.wallet_aliases }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    /// Files read from the source directory.
    pub files: usize,
    /// Distinct addresses validated.
    pub unique_addresses: usize,
    /// Keys in the address book (wallet aliases included).
    pub entries: usize,
    /// Where the artifact was written, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatars: Option<AvatarReport>,
}

/// Assemble an address book from already-loaded files, in the given order.
pub fn assemble_sources(
    files: &[SourceFile],
    options: PipelineOptions,
) -> BuildResult<(AddressBook, usize)> {
    let mut builder = AddressBookBuilder::new().with_wallet_aliases(options.wallet_aliases);
    for file in files {
        let entries = parse_entries(file)?;
        tracing::debug!("{}: {} entries", file.filename, entries.len());
        for entry in &entries {
            let validated = validate_entry(entry)?;
            builder.insert(&validated)?;
        }
    }
    let unique = builder.unique_addresses();
    Ok((builder.finish(), unique))
}

/// Load every source in `source_dir` and assemble the address book.
pub fn build_address_book(source_dir: &Path, options: PipelineOptions) -> BuildResult<AddressBook> {
    let files = load_sources(source_dir)?;
    assemble_sources(&files, options).map(|(book, _)| book)
}

/// Validate-only mode: nothing is written.
pub fn check_sources(layout: &BuildLayout, options: PipelineOptions) -> BuildResult<BuildSummary> {
    let files = load_sources(&layout.source_dir)?;
    let (book, unique_addresses) = assemble_sources(&files, options)?;
    tracing::info!("Validated {} files, {} addresses", files.len(), unique_addresses);
    Ok(BuildSummary {
        files: files.len(),
        unique_addresses,
        entries: book.len(),
        output: None,
        avatars: None,
    })
}

/// Build mode: validate, write the artifact, and optionally run the avatar pass.
///
/// The artifact is only written once the whole book has been assembled, so a
/// fatal error leaves any previous artifact untouched.
pub fn run_build(
    layout: &BuildLayout,
    config: &BuildConfig,
    with_avatars: bool,
) -> BuildResult<BuildSummary> {
    let files = load_sources(&layout.source_dir)?;
    let (book, unique_addresses) = assemble_sources(&files, PipelineOptions::from(config))?;
    let entries = write_address_book(&book, &layout.address_book_path)?;

    let avatars = with_avatars.then(|| {
        generate_avatars(&layout.avatars_dir, &layout.avatars_output_dir, config.avatar_workers)
    });

    Ok(BuildSummary {
        files: files.len(),
        unique_addresses,
        entries,
        output: Some(layout.address_book_path.display().to_string()),
        avatars,
    })
}
