//! Signing, hashing and verification of delegated requests against one
//! verifying contract deployment.

use std::future::Future;

use alloy_dyn_abi::TypedData;
use alloy_primitives::{Address, B256};
use alloy_signer::Signer;
use serde::Serialize;
use tracing::{debug, info};

use crate::address::parse_address;
use crate::config::ClientConfig;
use crate::contract::VerifyingContract;
use crate::domain::DomainContext;
use crate::error::{Eip712Error, Result};
use crate::hasher::{hash_message, TypedMessage};
use crate::params::{
    AttestationParams, AttestationRequest, RevocationParams, RevocationRequest, SignedRequest,
};
use crate::signing::sign_digest;
use crate::typed_data;
use crate::verifier::verify;

/// Whether the domain of the target contract has been captured yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DomainState {
    #[default]
    Uninitialized,
    Ready(DomainContext),
}

/// A party to a delegated message, given either by address or by the key
/// that acts for it.
#[derive(Clone, Copy)]
pub enum Party<'a> {
    Address(Address),
    Key(&'a dyn Signer),
}

impl Party<'_> {
    /// Parse a textual address into [`Party::Address`].
    pub fn parse(address: &str) -> Result<Self> {
        parse_address(address).map(Party::Address)
    }

    pub fn address(&self) -> Address {
        match self {
            Party::Address(address) => *address,
            Party::Key(signer) => signer.address(),
        }
    }
}

impl From<Address> for Party<'_> {
    fn from(address: Address) -> Self {
        Party::Address(address)
    }
}

impl std::fmt::Debug for Party<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Party::Address(address) => f.debug_tuple("Address").field(address).finish(),
            Party::Key(signer) => f.debug_tuple("Key").field(&signer.address()).finish(),
        }
    }
}

/// Delegated attestation and revocation helper bound to one contract.
///
/// The domain is read from the contract once and cached. Call
/// [`Eip712Client::refresh`] after an upgrade may have changed it.
#[derive(Debug)]
pub struct Eip712Client<V> {
    verifier: V,
    config: ClientConfig,
    state: DomainState,
}

impl<V: VerifyingContract> Eip712Client<V> {
    /// Create a client without querying the contract yet.
    pub fn new(verifier: V, config: ClientConfig) -> Self {
        Self { verifier, config, state: DomainState::Uninitialized }
    }

    /// Create a client and capture its domain.
    pub async fn from_verifier(verifier: V, config: ClientConfig) -> Result<Self> {
        let mut client = Self::new(verifier, config);
        client.init().await?;
        Ok(client)
    }

    /// Query the contract and capture its domain.
    pub async fn init(&mut self) -> Result<&DomainContext> {
        let domain = self.fetch_domain().await?;
        debug!(
            name = %domain.name,
            version = %domain.version,
            chain_id = domain.chain_id,
            verifying_contract = %domain.verifying_contract,
            "captured EIP-712 domain"
        );
        self.state = DomainState::Ready(domain);
        self.domain()
    }

    /// Re-query the contract; returns `true` when the cached domain was replaced.
    pub async fn refresh(&mut self) -> Result<bool> {
        let fresh = self.fetch_domain().await?;
        let changed = match &self.state {
            DomainState::Ready(current) => *current != fresh,
            DomainState::Uninitialized => true,
        };
        if changed {
            info!(
                name = %fresh.name,
                version = %fresh.version,
                verifying_contract = %fresh.verifying_contract,
                "EIP-712 domain changed, replacing cached context"
            );
            self.state = DomainState::Ready(fresh);
        }
        Ok(changed)
    }

    /// Drop the cached domain.
    pub fn invalidate(&mut self) {
        self.state = DomainState::Uninitialized;
    }

    pub fn state(&self) -> &DomainState {
        &self.state
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn domain(&self) -> Result<&DomainContext> {
        match &self.state {
            DomainState::Ready(domain) => Ok(domain),
            DomainState::Uninitialized => Err(Eip712Error::UninitializedContext),
        }
    }

    pub fn domain_separator(&self) -> Result<B256> {
        Ok(self.domain()?.separator())
    }

    /// The typed-data payload a wallet would be asked to sign for `message`.
    pub fn typed_data<M: TypedMessage + Serialize>(&self, message: &M) -> Result<TypedData> {
        typed_data::typed_data(self.domain()?, message)
    }

    pub async fn sign_delegated_attestation<S>(
        &self,
        attester: &S,
        request: AttestationRequest,
    ) -> Result<SignedRequest<AttestationParams>>
    where
        S: Signer + ?Sized,
    {
        self.sign_message(attester, request.with_attester(attester.address())).await
    }

    pub fn verify_delegated_attestation_signature(
        &self,
        attester: Party<'_>,
        request: &SignedRequest<AttestationParams>,
    ) -> Result<bool> {
        verify(attester.address(), self.domain()?, &request.params, &request.signature)
    }

    pub fn hash_delegated_attestation(
        &self,
        attester: Party<'_>,
        request: AttestationRequest,
    ) -> Result<B256> {
        hash_message(self.domain_separator()?, &request.with_attester(attester.address()))
    }

    pub async fn sign_delegated_revocation<S>(
        &self,
        revoker: &S,
        request: RevocationRequest,
    ) -> Result<SignedRequest<RevocationParams>>
    where
        S: Signer + ?Sized,
    {
        self.sign_message(revoker, request.with_revoker(revoker.address())).await
    }

    pub fn verify_delegated_revocation_signature(
        &self,
        revoker: Party<'_>,
        request: &SignedRequest<RevocationParams>,
    ) -> Result<bool> {
        verify(revoker.address(), self.domain()?, &request.params, &request.signature)
    }

    pub fn hash_delegated_revocation(
        &self,
        revoker: Party<'_>,
        request: RevocationRequest,
    ) -> Result<B256> {
        hash_message(self.domain_separator()?, &request.with_revoker(revoker.address()))
    }

    async fn sign_message<S, M>(&self, signer: &S, params: M) -> Result<SignedRequest<M>>
    where
        S: Signer + ?Sized,
        M: TypedMessage,
    {
        let digest = hash_message(self.domain_separator()?, &params)?;
        let signature = self.bounded(sign_digest(signer, &digest)).await?;
        Ok(SignedRequest { params, signature })
    }

    async fn fetch_domain(&self) -> Result<DomainContext> {
        let address = self.bounded(self.verifier.address()).await?;
        let name = self.bounded(self.verifier.contract_name()).await?;
        let version = self.bounded(self.verifier.contract_version()).await?;
        DomainContext::new(name, version, self.config.chain_id, address)
    }

    /// Apply the configured timeout to a call on an external collaborator.
    async fn bounded<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match self.config.request_timeout() {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| Eip712Error::Timeout(limit))?,
            None => fut.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::StaticVerifier;
    use alloy_primitives::address;
    use alloy_signer_local::PrivateKeySigner;

    fn verifier() -> StaticVerifier {
        StaticVerifier::new(address!("0x1111111111111111111111111111111111111111"), "EAS", "1.3.0")
    }

    #[tokio::test]
    async fn uninitialized_client_fails_fast() {
        let client = Eip712Client::new(verifier(), ClientConfig::new(901));
        assert_eq!(client.state(), &DomainState::Uninitialized);
        assert_eq!(client.domain_separator(), Err(Eip712Error::UninitializedContext));

        let signer = PrivateKeySigner::random();
        let err = client
            .sign_delegated_revocation(&signer, RevocationRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, Eip712Error::UninitializedContext);
        assert_eq!(
            client.hash_delegated_attestation(Party::Key(&signer), AttestationRequest::default()),
            Err(Eip712Error::UninitializedContext)
        );
    }

    #[tokio::test]
    async fn init_captures_contract_metadata() {
        let client = Eip712Client::from_verifier(verifier(), ClientConfig::new(901)).await.unwrap();
        let domain = client.domain().unwrap();
        assert_eq!(domain.name, "EAS");
        assert_eq!(domain.version, "1.3.0");
        assert_eq!(domain.chain_id, 901);
    }

    #[tokio::test]
    async fn invalid_chain_id_is_rejected_at_init() {
        let err = Eip712Client::from_verifier(verifier(), ClientConfig::new(0)).await.unwrap_err();
        assert!(matches!(err, Eip712Error::InvalidDomainInput(_)));
    }

    #[tokio::test]
    async fn invalidate_forgets_the_domain() {
        let mut client =
            Eip712Client::from_verifier(verifier(), ClientConfig::new(901)).await.unwrap();
        client.invalidate();
        assert_eq!(client.domain().unwrap_err(), Eip712Error::UninitializedContext);
        assert!(client.refresh().await.unwrap());
        assert!(client.domain().is_ok());
    }

    #[test]
    fn party_parses_and_resolves() {
        let party = Party::parse("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap();
        assert_eq!(party.address(), address!("0xd8da6bf26964af9d7eed9e03e53415d37aa96045"));
        assert!(Party::parse("0x12").is_err());

        let signer = PrivateKeySigner::random();
        assert_eq!(Party::Key(&signer).address(), signer.address());
    }
}
