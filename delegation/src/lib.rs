//! EIP-712 signing and verification of delegated attestations and revocations.
//!
//! A delegator signs an `Attest` or `Revoke` message off-chain; a relayer
//! submits it, and the verifying contract recomputes the same digest to recover
//! the signer. Everything here must hash byte for byte like that contract.

pub mod address;
pub mod client;
pub mod config;
pub mod contract;
pub mod domain;
pub mod error;
pub mod hasher;
pub mod params;
pub mod signing;
pub mod typed_data;
pub mod types;
pub mod verifier;

pub use address::{ensure_signer, parse_address};
pub use client::{DomainState, Eip712Client, Party};
pub use config::ClientConfig;
pub use contract::{StaticVerifier, VerifyingContract};
pub use domain::{compute_domain_separator, DomainContext};
pub use error::{Eip712Error, Result};
pub use hasher::{
    eip712_digest, encode_field, hash_message, hash_struct, hash_typed_data, FieldValue,
    TypedMessage,
};
pub use params::{
    AttestationParams, AttestationRequest, RevocationParams, RevocationRequest, SignedRequest,
};
pub use signing::{sign_digest, Eip712Signature};
pub use types::{MessageKind, MessageTypeDeclaration, PrimitiveType, TypedField};
pub use verifier::{recover_signer, verify, verify_fields};
