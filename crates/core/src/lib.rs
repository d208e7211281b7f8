//! addrbook-core
//!
//! Core library for building the curated TON address book.
//!
//! This crate holds the address codec, the data model, source loading, the
//! validation/canonicalization/dedup pipeline, artifact serialization, and the
//! avatar variant pass.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from the CLI or any other frontend.

pub mod address;
pub mod avatars;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod source;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
