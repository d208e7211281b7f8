//! Data model for the address book pipeline.
//!
//! - `SourceEntry`: one raw record as authored in a source file (untrusted).
//! - `ValidatedEntry`: a `SourceEntry` that passed validation, with the
//!   address already parsed and the contract type typed.
//! - `AddressBookEntry` / `AddressBook`: the published artifact.
//! - `AvatarVariantSet`: the three spellings an avatar is published under.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::address::Address;

/// File whose entries are always flagged as scams and may carry short names.
pub const SCAM_FILENAME: &str = "scam.yaml";

/// Accepted spellings of [`ContractType`], in declaration order.
pub const CONTRACT_TYPE_NAMES: [&str; 4] = ["wallet", "nft_collection", "jetton", "pool"];

/// Kind of contract an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    Wallet,
    NftCollection,
    Jetton,
    Pool,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Wallet => "wallet",
            ContractType::NftCollection => "nft_collection",
            ContractType::Jetton => "jetton",
            ContractType::Pool => "pool",
        }
    }
}

impl FromStr for ContractType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wallet" => Ok(ContractType::Wallet),
            "nft_collection" => Ok(ContractType::NftCollection),
            "jetton" => Ok(ContractType::Jetton),
            "pool" => Ok(ContractType::Pool),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry as parsed from a YAML document. Every field is optional here;
/// the validator decides what is acceptable.
///
/// Text fields take any scalar (`name: 2048` reads as `"2048"`) so a
/// mistyped value reaches the validator instead of failing the parse. `type`
/// is kept as written: an explicit `type: ~` is present, not absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEntry {
    /// Source file name (not part of the document; attached by the loader).
    #[serde(skip)]
    pub filename: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub ton_icon: Option<String>,
    #[serde(default)]
    pub is_scam: Option<bool>,
    #[serde(default, rename = "type", deserialize_with = "present_value")]
    pub kind: Option<Value>,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Number(number) => Ok(Some(number.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a scalar value, found {}",
            value_kind(&other)
        ))),
    }
}

// Only called when the key exists, so a YAML null becomes `Some(Value::Null)`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Short description of a YAML value's kind, for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// A YAML value as it should read in an error message: scalars verbatim,
/// `null` for null, collections rendered as YAML.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_else(|_| value_kind(other).to_string()),
    }
}

impl SourceEntry {
    pub fn new(filename: impl Into<String>, address: impl Into<String>) -> Self {
        Self { filename: filename.into(), address: Some(address.into()), ..Self::default() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(Value::String(kind.into()));
        self
    }

    /// The address as written, or `undefined` when the field is missing.
    pub fn address_display(&self) -> &str {
        self.address.as_deref().unwrap_or("undefined")
    }

    pub fn is_scam_list(&self) -> bool {
        self.filename == SCAM_FILENAME
    }
}

/// A source entry that passed every validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub filename: String,
    pub address: Address,
    pub name: Option<String>,
    pub ton_icon: Option<String>,
    pub is_scam: Option<bool>,
    pub kind: Option<ContractType>,
}

impl ValidatedEntry {
    pub fn is_wallet(&self) -> bool {
        self.kind == Some(ContractType::Wallet)
    }

    pub fn is_scam_list(&self) -> bool {
        self.filename == SCAM_FILENAME
    }
}

/// Published metadata for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBookEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ton_icon: Option<String>,
    pub is_scam: bool,
}

/// Friendly address → metadata, in insertion order.
pub type AddressBook = IndexMap<String, AddressBookEntry>;

/// The three spellings an avatar image is published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarVariantSet {
    pub raw: String,
    pub bounceable: String,
    pub non_bounceable: String,
}

impl AvatarVariantSet {
    pub fn from_address(address: &Address) -> Self {
        Self {
            raw: address.to_raw(),
            bounceable: address.to_friendly(true),
            non_bounceable: address.to_friendly(false),
        }
    }

    /// Spellings in output order: raw, bounceable, non-bounceable.
    pub fn spellings(&self) -> [&str; 3] {
        [&self.raw, &self.bounceable, &self.non_bounceable]
    }
}
