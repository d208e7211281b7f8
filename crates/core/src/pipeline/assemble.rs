use std::collections::HashMap;

use crate::error::{BuildError, BuildResult};
use crate::model::{AddressBook, AddressBookEntry, ValidatedEntry};
use crate::pipeline::canonical::{alias_address, canonical_address, dedup_key};

/// Accumulates the address book for one run.
///
/// Owns the dedup-key → first-defining-file map, so two builders never share
/// state and each run starts clean.
#[derive(Debug)]
pub struct AddressBookBuilder {
    first_defined_in: HashMap<String, String>,
    book: AddressBook,
    wallet_aliases: bool,
}

impl Default for AddressBookBuilder {
    fn default() -> Self {
        Self { first_defined_in: HashMap::new(), book: AddressBook::new(), wallet_aliases: true }
    }
}

impl AddressBookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the wallet alias step (enabled by default).
    pub fn with_wallet_aliases(mut self, enabled: bool) -> Self {
        self.wallet_aliases = enabled;
        self
    }

    /// Insert one validated entry, failing if its address was already defined.
    ///
    /// Returns the canonical address the entry was published under.
    pub fn insert(&mut self, entry: &ValidatedEntry) -> BuildResult<String> {
        let key = dedup_key(&entry.address);
        let canonical = canonical_address(entry);

        if let Some(first) = self.first_defined_in.get(&key) {
            return Err(BuildError::DuplicateAddress {
                filename: entry.filename.clone(),
                address: canonical,
                first_defined_in: first.clone(),
            });
        }
        self.first_defined_in.insert(key, entry.filename.clone());

        let book_entry = AddressBookEntry {
            name: entry.name.clone(),
            ton_icon: entry.ton_icon.clone(),
            is_scam: entry.is_scam_list() || entry.is_scam.unwrap_or(false),
        };
        self.book.insert(canonical.clone(), book_entry);

        if self.wallet_aliases {
            self.insert_wallet_alias(entry, &canonical);
        }
        Ok(canonical)
    }

    /// Compatibility shim: wallets were historically published bounceable, so
    /// they are also listed under that spelling. Skips the dedup check; the
    /// primary insert already claimed the address.
    fn insert_wallet_alias(&mut self, entry: &ValidatedEntry, canonical: &str) {
        if !entry.is_wallet() {
            return;
        }
        if let Some(book_entry) = self.book.get(canonical).cloned() {
            self.book.insert(alias_address(entry), book_entry);
        }
    }

    /// Number of distinct addresses inserted (aliases not counted).
    pub fn unique_addresses(&self) -> usize {
        self.first_defined_in.len()
    }

    pub fn finish(self) -> AddressBook {
        self.book
    }
}
