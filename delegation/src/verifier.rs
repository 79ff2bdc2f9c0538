use alloy_primitives::{Address, B256};
use tracing::warn;

use crate::address::ensure_signer;
use crate::domain::DomainContext;
use crate::error::{Eip712Error, Result};
use crate::hasher::{hash_message, hash_typed_data, FieldValue, TypedMessage};
use crate::signing::Eip712Signature;
use crate::types::MessageTypeDeclaration;

/// Recover the address that produced `signature` over `digest`.
pub fn recover_signer(digest: &B256, signature: &Eip712Signature) -> Result<Address> {
    signature
        .to_recoverable()?
        .recover_address_from_prehash(digest)
        .map_err(|e| Eip712Error::MalformedSignature(format!("recovery failed: {e}")))
}

/// Check a signature over raw field values.
///
/// The digest is always recomputed from `values`; callers never pass one in.
/// Returns `Ok(false)` when the recovered signer differs from `claimed`.
pub fn verify_fields(
    claimed: Address,
    declaration: &MessageTypeDeclaration,
    domain: &DomainContext,
    values: &[FieldValue],
    signature: &Eip712Signature,
) -> Result<bool> {
    let claimed = ensure_signer(claimed)?;
    let digest = hash_typed_data(domain.separator(), declaration, values)?;
    compare(claimed, &digest, signature)
}

/// Check that `claimed` signed `message` under `domain`.
pub fn verify<M: TypedMessage>(
    claimed: Address,
    domain: &DomainContext,
    message: &M,
    signature: &Eip712Signature,
) -> Result<bool> {
    let claimed = ensure_signer(claimed)?;
    let digest = hash_message(domain.separator(), message)?;
    compare(claimed, &digest, signature)
}

fn compare(claimed: Address, digest: &B256, signature: &Eip712Signature) -> Result<bool> {
    let recovered = recover_signer(digest, signature)?;
    if recovered != claimed {
        warn!(%claimed, %recovered, %digest, "signature does not match claimed signer");
        return Ok(false);
    }
    Ok(true)
}
