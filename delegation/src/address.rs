use std::str::FromStr;

use alloy_primitives::Address;

use crate::error::{Eip712Error, Result};

/// Parse a textual account address.
///
/// All-lowercase and all-uppercase hex is accepted as is. Mixed-case input must
/// carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());

    let parsed = if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{digits}"), None).map_err(|e| e.to_string())
    } else {
        Address::from_str(digits).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| Eip712Error::MalformedAddress(format!("{input}: {e}")))
}

/// Reject the zero address where a real signer is required.
pub fn ensure_signer(address: Address) -> Result<Address> {
    if address.is_zero() {
        return Err(Eip712Error::InvalidAddress);
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const VITALIK: Address = address!("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

    #[test]
    fn accepts_any_single_case() {
        let lower = parse_address("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap();
        let upper = parse_address("0xD8DA6BF26964AF9D7EED9E03E53415D37AA96045").unwrap();
        assert_eq!(lower, VITALIK);
        assert_eq!(upper, VITALIK);
    }

    #[test]
    fn accepts_valid_checksum() {
        let parsed = parse_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap();
        assert_eq!(parsed, VITALIK);
    }

    #[test]
    fn rejects_bad_checksum() {
        let err = parse_address("0xD8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap_err();
        assert!(matches!(err, Eip712Error::MalformedAddress(_)));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = parse_address("0xd8da6bf26964af9d7eed9e03e53415d37aa960").unwrap_err();
        assert!(matches!(err, Eip712Error::MalformedAddress(_)));
        assert!(parse_address("not an address").is_err());
    }

    #[test]
    fn zero_is_never_a_signer() {
        assert_eq!(ensure_signer(Address::ZERO), Err(Eip712Error::InvalidAddress));
        assert_eq!(ensure_signer(VITALIK), Ok(VITALIK));
    }
}
