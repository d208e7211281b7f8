use crate::address::Address;
use crate::model::ValidatedEntry;

/// Identity key used for duplicate detection: the raw spelling.
pub fn dedup_key(address: &Address) -> String {
    address.to_raw()
}

/// Published spelling of an entry's address.
///
/// Wallets are shown non-bounceable; every other contract (and untyped
/// entries) bounceable. Always url-safe and mainnet.
pub fn canonical_address(entry: &ValidatedEntry) -> String {
    entry.address.to_friendly(!entry.is_wallet())
}

/// The friendly spelling with the opposite bounceable flag to
/// [`canonical_address`].
pub fn alias_address(entry: &ValidatedEntry) -> String {
    entry.address.to_friendly(entry.is_wallet())
}
