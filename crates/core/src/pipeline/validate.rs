use crate::address::Address;
use crate::error::{BuildError, BuildResult};
use crate::model::{value_text, ContractType, SourceEntry, ValidatedEntry};

/// Names shorter than this (in Unicode scalar values) are rejected outside
/// the scam list.
pub const MIN_NAME_CHARS: usize = 3;

/// Check one raw entry. Rules run in order and the first failure wins:
/// address, then name, then contract type.
pub fn validate_entry(entry: &SourceEntry) -> BuildResult<ValidatedEntry> {
    let address_text = entry.address_display().to_string();

    let address = match entry.address.as_deref().map(Address::parse) {
        Some(Ok(address)) => address,
        parsed => {
            if let Some(Err(err)) = parsed {
                tracing::debug!("[{}] {}: {}", entry.filename, address_text, err);
            }
            return Err(BuildError::InvalidAddress {
                filename: entry.filename.clone(),
                address: address_text,
            });
        }
    };

    if !entry.is_scam_list() {
        let long_enough =
            entry.name.as_deref().is_some_and(|name| name.chars().count() >= MIN_NAME_CHARS);
        if !long_enough {
            return Err(BuildError::NameTooShort {
                filename: entry.filename.clone(),
                address: address_text,
                name: entry.name.clone(),
            });
        }
    }

    // Only a missing key means "untyped"; an explicit null is checked like
    // any other value.
    let kind = match &entry.kind {
        None => None,
        Some(given) => Some(
            given.as_str().and_then(|text| text.parse::<ContractType>().ok()).ok_or_else(|| {
                BuildError::UnknownContractType {
                    filename: entry.filename.clone(),
                    address: address_text.clone(),
                    given: value_text(given),
                }
            })?,
        ),
    };

    Ok(ValidatedEntry {
        filename: entry.filename.clone(),
        address,
        name: entry.name.clone(),
        ton_icon: entry.ton_icon.clone(),
        is_scam: entry.is_scam,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SCAM_FILENAME;

    const ADDR: &str = "EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2N";

    #[test]
    fn accepts_well_formed_entry() {
        let entry = SourceEntry::new("a.yaml", ADDR).with_name("Test").with_kind("jetton");
        let validated = validate_entry(&entry).unwrap();
        assert_eq!(validated.kind, Some(ContractType::Jetton));
        assert_eq!(validated.address.to_friendly(true), ADDR);
    }

    #[test]
    fn rejects_bad_address_before_anything_else() {
        let entry = SourceEntry::new("a.yaml", "garbage").with_kind("bogus");
        let err = validate_entry(&entry).unwrap_err();
        assert_eq!(err.to_string(), "[a.yaml] Invalid address: garbage");
    }

    #[test]
    fn missing_address_is_invalid() {
        let entry = SourceEntry { filename: "a.yaml".into(), ..SourceEntry::default() };
        let err = validate_entry(&entry).unwrap_err();
        assert_eq!(err.to_string(), "[a.yaml] Invalid address: undefined");
    }

    #[test]
    fn short_name_rejected_outside_scam_list() {
        let err = validate_entry(&SourceEntry::new("a.yaml", ADDR).with_name("x")).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("[a.yaml] Name for {ADDR} must be at least 3 symbols length, given name: x")
        );

        let err = validate_entry(&SourceEntry::new("a.yaml", ADDR)).unwrap_err();
        assert!(err.to_string().ends_with("given name: undefined"));
    }

    #[test]
    fn short_name_accepted_in_scam_list() {
        assert!(validate_entry(&SourceEntry::new(SCAM_FILENAME, ADDR).with_name("x")).is_ok());
        assert!(validate_entry(&SourceEntry::new(SCAM_FILENAME, ADDR)).is_ok());
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // Two characters, four bytes.
        assert!(validate_entry(&SourceEntry::new("a.yaml", ADDR).with_name("ёж")).is_err());
        assert!(validate_entry(&SourceEntry::new("a.yaml", ADDR).with_name("ёжи")).is_ok());
    }

    #[test]
    fn unknown_contract_type_rejected() {
        let entry = SourceEntry::new("a.yaml", ADDR).with_name("Test").with_kind("exchange");
        let err = validate_entry(&entry).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "[a.yaml] Contract type for {ADDR} must be either undefined or one of: \
                 wallet, nft_collection, jetton, pool, given: exchange"
            )
        );
    }

    #[test]
    fn explicit_null_type_is_rejected() {
        let mut entry = SourceEntry::new("a.yaml", ADDR).with_name("Test");
        entry.kind = Some(serde_yaml::Value::Null);
        let err = validate_entry(&entry).unwrap_err();
        assert!(matches!(err, BuildError::UnknownContractType { ref given, .. } if given == "null"));
        assert!(err.to_string().ends_with("given: null"));
    }

    #[test]
    fn numeric_name_is_checked_as_text() {
        let entry: SourceEntry = serde_yaml::from_str(&format!("address: {ADDR}\nname: 7\n")).unwrap();
        let err = validate_entry(&SourceEntry { filename: "a.yaml".into(), ..entry }).unwrap_err();
        assert!(err.to_string().ends_with("given name: 7"), "unexpected error: {err}");

        let entry: SourceEntry =
            serde_yaml::from_str(&format!("address: {ADDR}\nname: 2048\n")).unwrap();
        assert_eq!(validate_entry(&entry).unwrap().name.as_deref(), Some("2048"));
    }
}
