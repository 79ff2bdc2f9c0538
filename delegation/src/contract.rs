//! The verifying contract as seen from off-chain tooling.

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::error::Result;

/// Read-only metadata a verifying contract exposes for its EIP-712 domain.
///
/// Any on-chain adapter (an attestation service, a test verifier, a cached
/// snapshot) is interchangeable behind this trait.
#[async_trait]
pub trait VerifyingContract: Send + Sync {
    /// The deployment address, used as `verifyingContract`.
    async fn address(&self) -> Result<Address>;

    async fn contract_name(&self) -> Result<String>;

    async fn contract_version(&self) -> Result<String>;
}

#[async_trait]
impl<T: VerifyingContract + ?Sized> VerifyingContract for Box<T> {
    async fn address(&self) -> Result<Address> {
        (**self).address().await
    }

    async fn contract_name(&self) -> Result<String> {
        (**self).contract_name().await
    }

    async fn contract_version(&self) -> Result<String> {
        (**self).contract_version().await
    }
}

/// Contract metadata known ahead of time, for offline signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVerifier {
    pub address: Address,
    pub name: String,
    pub version: String,
}

impl StaticVerifier {
    pub fn new(address: Address, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self { address, name: name.into(), version: version.into() }
    }
}

#[async_trait]
impl VerifyingContract for StaticVerifier {
    async fn address(&self) -> Result<Address> {
        Ok(self.address)
    }

    async fn contract_name(&self) -> Result<String> {
        Ok(self.name.clone())
    }

    async fn contract_version(&self) -> Result<String> {
        Ok(self.version.clone())
    }
}
