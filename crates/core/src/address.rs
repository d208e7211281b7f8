//! TON account address handling.
//!
//! Parsing and rendering are delegated to `tonlib_core::TonAddress`, which
//! accepts the raw spelling (`<workchain>:<64 hex chars>`) and both base64
//! alphabets of the friendly spelling, checksum included. This module only
//! narrows the accepted workchains and fixes the rendering flags the address
//! book publishes with (url-safe, mainnet).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tonlib_core::TonAddress;

/// Workchains an address book entry may live in: basechain and masterchain.
const WORKCHAINS: [i32; 2] = [0, -1];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("{0}")]
    Parse(String),
    #[error("unsupported workchain {0}")]
    Workchain(i32),
}

/// A parsed account address. Equality ignores how the address was spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(TonAddress);

impl Address {
    /// Parse any spelling: raw, url-safe friendly or standard friendly.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let inner =
            TonAddress::from_str(input).map_err(|e| AddressError::Parse(e.to_string()))?;
        if !WORKCHAINS.contains(&inner.workchain) {
            return Err(AddressError::Workchain(inner.workchain));
        }
        Ok(Self(inner))
    }

    /// `<workchain>:<lowercase hex>`.
    pub fn to_raw(&self) -> String {
        self.0.to_hex()
    }

    /// Url-safe mainnet friendly spelling with the given bounceable flag.
    pub fn to_friendly(&self, bounceable: bool) -> String {
        self.0.to_base64_url_flags(!bounceable, false)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw())
    }
}
