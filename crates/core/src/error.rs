use std::path::PathBuf;

use thiserror::Error;

use crate::address::AddressError;
use crate::model::CONTRACT_TYPE_NAMES;

/// Fatal build errors. Any of these aborts the whole invocation.
///
/// Every variant names the source file (or output path) so authoring mistakes
/// can be located without re-running anything.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("[{filename}] Invalid address: {address}")]
    InvalidAddress { filename: String, address: String },

    #[error(
        "[{filename}] Name for {address} must be at least 3 symbols length, given name: {}",
        .name.as_deref().unwrap_or("undefined")
    )]
    NameTooShort { filename: String, address: String, name: Option<String> },

    #[error(
        "[{filename}] Contract type for {address} must be either undefined or one of: {}, given: {given}",
        CONTRACT_TYPE_NAMES.join(", ")
    )]
    UnknownContractType { filename: String, address: String, given: String },

    #[error("[{filename}] Address {address} is already defined in {first_defined_in}")]
    DuplicateAddress { filename: String, address: String, first_defined_in: String },

    #[error("[{filename}] Failed to parse YAML: {message}")]
    Parse { filename: String, message: String },

    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write address book to {}: {message}", .path.display())]
    Serialize { path: PathBuf, message: String },
}

impl BuildError {
    /// Source file the error is attributed to, when there is one.
    pub fn filename(&self) -> Option<&str> {
        match self {
            BuildError::InvalidAddress { filename, .. }
            | BuildError::NameTooShort { filename, .. }
            | BuildError::UnknownContractType { filename, .. }
            | BuildError::DuplicateAddress { filename, .. }
            | BuildError::Parse { filename, .. } => Some(filename),
            BuildError::Io { .. } | BuildError::Serialize { .. } => None,
        }
    }
}

/// Convenience result type for pipeline operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Per-file avatar failures. These are logged and the file is skipped.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("file name {stem:?} is not an address: {source}")]
    InvalidStem {
        stem: String,
        #[source]
        source: AddressError,
    },

    #[error("image error for {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("io error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("panicked while processing {}: {message}", .path.display())]
    Panic { path: PathBuf, message: String },
}
