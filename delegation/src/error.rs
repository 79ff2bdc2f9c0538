use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by domain binding, hashing, signing and verification.
///
/// A verification mismatch is not an error: [`crate::verifier::verify`] returns
/// `Ok(false)` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Eip712Error {
    /// An operation needing a domain context ran before the context was captured.
    #[error("EIP-712 domain context has not been initialized")]
    UninitializedContext,

    /// The zero address was supplied where a real signer address is required.
    #[error("Invalid address")]
    InvalidAddress,

    /// An address string could not be parsed.
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// Domain metadata that cannot produce a usable separator.
    #[error("Invalid domain input: {0}")]
    InvalidDomainInput(String),

    /// The external signer could not produce a signature.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Signature components are out of range or have the wrong length.
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    #[error("Field `{field}` expects a value of type {expected}")]
    FieldTypeMismatch { field: &'static str, expected: String },

    #[error("Field `{field}` does not fit in {bits} bits")]
    ValueOutOfRange { field: &'static str, bits: u16 },

    #[error("Expected {expected} field values, got {actual}")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("Invalid typed data: {0}")]
    InvalidTypedData(String),

    /// The verifying contract collaborator failed to answer a metadata query.
    #[error("Verifying contract query failed: {0}")]
    ContractQuery(String),

    #[error("Timed out after {0:?} waiting on an external collaborator")]
    Timeout(Duration),
}

pub type Result<T, E = Eip712Error> = std::result::Result<T, E>;
