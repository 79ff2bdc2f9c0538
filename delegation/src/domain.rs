//! Domain separator binding.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::{Eip712Domain, SolValue};
use serde::{Deserialize, Serialize};

use crate::address::parse_address;
use crate::error::{Eip712Error, Result};
use crate::types::EIP712_DOMAIN;

/// Compute an EIP-712 domain separator.
///
/// `keccak256(abi.encode(keccak256(typeSig), keccak256(name), keccak256(version), chainId, verifyingContract))`
pub fn compute_domain_separator(
    domain_type_signature: &str,
    contract_name: &str,
    version: &str,
    chain_id: U256,
    verifying_address: Address,
) -> B256 {
    let encoded = (
        keccak256(domain_type_signature.as_bytes()),
        keccak256(contract_name.as_bytes()),
        keccak256(version.as_bytes()),
        chain_id,
        verifying_address,
    )
        .abi_encode();
    keccak256(encoded)
}

/// The signing context of one contract deployment on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainContext {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl DomainContext {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Result<Self> {
        if chain_id == 0 {
            return Err(Eip712Error::InvalidDomainInput("chain id must be non-zero".into()));
        }
        if verifying_contract.is_zero() {
            return Err(Eip712Error::InvalidDomainInput(
                "verifying contract cannot be the zero address".into(),
            ));
        }
        Ok(Self { name: name.into(), version: version.into(), chain_id, verifying_contract })
    }

    /// Same as [`DomainContext::new`], with a textual verifying contract address.
    pub fn parse(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: &str,
    ) -> Result<Self> {
        let address = parse_address(verifying_contract)
            .map_err(|e| Eip712Error::InvalidDomainInput(e.to_string()))?;
        Self::new(name, version, chain_id, address)
    }

    pub fn separator(&self) -> B256 {
        compute_domain_separator(
            EIP712_DOMAIN,
            &self.name,
            &self.version,
            U256::from(self.chain_id),
            self.verifying_contract,
        )
    }

    /// The alloy representation, as used in JSON typed data.
    pub fn eip712_domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(self.name.clone().into()),
            Some(self.version.clone().into()),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    fn eas_domain() -> DomainContext {
        DomainContext::new("EAS", "1.3.0", 901, address!("0x1111111111111111111111111111111111111111"))
            .unwrap()
    }

    #[test]
    fn separator_matches_reference() {
        assert_eq!(
            eas_domain().separator(),
            b256!("0x5ea5b0ee1526ee43885b7575cf2c574de51d6c2541352f6a7597647d4ae03a11")
        );
    }

    #[test]
    fn separator_matches_alloy() {
        let domain = eas_domain();
        assert_eq!(domain.separator(), domain.eip712_domain().separator());
    }

    #[test]
    fn every_component_changes_the_separator() {
        let base = eas_domain();
        let variants = [
            DomainContext { name: "EAS2".into(), ..base.clone() },
            DomainContext { version: "1.4.0".into(), ..base.clone() },
            DomainContext { chain_id: 1, ..base.clone() },
            DomainContext {
                verifying_contract: address!("0x2222222222222222222222222222222222222222"),
                ..base.clone()
            },
        ];
        for variant in variants {
            assert_ne!(variant.separator(), base.separator(), "{variant:?}");
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            DomainContext::parse("EAS", "1.3.0", 901, "0x1234"),
            Err(Eip712Error::InvalidDomainInput(_))
        ));
        assert!(matches!(
            DomainContext::new("EAS", "1.3.0", 0, address!("0x1111111111111111111111111111111111111111")),
            Err(Eip712Error::InvalidDomainInput(_))
        ));
        assert!(matches!(
            DomainContext::new("EAS", "1.3.0", 901, Address::ZERO),
            Err(Eip712Error::InvalidDomainInput(_))
        ));
    }
}
