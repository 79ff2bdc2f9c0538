//! Delegated attestation and revocation messages.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::hasher::{FieldValue, TypedMessage};
use crate::signing::Eip712Signature;
use crate::types::{MessageTypeDeclaration, ATTEST_TYPE, REVOKE_TYPE};

/// Message fields of a delegated attestation, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationParams {
    pub attester: Address,
    pub schema: B256,
    pub recipient: Address,
    /// Zero means the attestation never expires.
    pub expiration_time: u64,
    pub revocable: bool,
    /// Zero means no referenced attestation.
    #[serde(rename = "refUID")]
    pub ref_uid: B256,
    pub data: Bytes,
    pub value: U256,
    /// Supplied by the caller; the contract owns the counter.
    pub nonce: U256,
    /// Zero means no deadline.
    pub deadline: u64,
}

impl TypedMessage for AttestationParams {
    const DECLARATION: &'static MessageTypeDeclaration = &ATTEST_TYPE;

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Address(self.attester),
            FieldValue::Bytes32(self.schema),
            FieldValue::Address(self.recipient),
            FieldValue::Uint(U256::from(self.expiration_time)),
            FieldValue::Bool(self.revocable),
            FieldValue::Bytes32(self.ref_uid),
            FieldValue::Bytes(self.data.clone()),
            FieldValue::Uint(self.value),
            FieldValue::Uint(self.nonce),
            FieldValue::Uint(U256::from(self.deadline)),
        ]
    }

    fn signer(&self) -> Address {
        self.attester
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevocationParams {
    pub revoker: Address,
    pub schema: B256,
    pub uid: B256,
    pub value: U256,
    pub nonce: U256,
    pub deadline: u64,
}

impl TypedMessage for RevocationParams {
    const DECLARATION: &'static MessageTypeDeclaration = &REVOKE_TYPE;

    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Address(self.revoker),
            FieldValue::Bytes32(self.schema),
            FieldValue::Bytes32(self.uid),
            FieldValue::Uint(self.value),
            FieldValue::Uint(self.nonce),
            FieldValue::Uint(U256::from(self.deadline)),
        ]
    }

    fn signer(&self) -> Address {
        self.revoker
    }
}

/// What a caller asks to attest, before the attester is bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationRequest {
    pub schema: B256,
    pub recipient: Address,
    pub expiration_time: u64,
    pub revocable: bool,
    #[serde(rename = "refUID")]
    pub ref_uid: B256,
    pub data: Bytes,
    pub value: U256,
    pub nonce: U256,
    pub deadline: u64,
}

impl AttestationRequest {
    pub fn with_attester(self, attester: Address) -> AttestationParams {
        AttestationParams {
            attester,
            schema: self.schema,
            recipient: self.recipient,
            expiration_time: self.expiration_time,
            revocable: self.revocable,
            ref_uid: self.ref_uid,
            data: self.data,
            value: self.value,
            nonce: self.nonce,
            deadline: self.deadline,
        }
    }
}

/// What a caller asks to revoke, before the revoker is bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevocationRequest {
    pub schema: B256,
    pub uid: B256,
    pub value: U256,
    pub nonce: U256,
    pub deadline: u64,
}

impl RevocationRequest {
    pub fn with_revoker(self, revoker: Address) -> RevocationParams {
        RevocationParams {
            revoker,
            schema: self.schema,
            uid: self.uid,
            value: self.value,
            nonce: self.nonce,
            deadline: self.deadline,
        }
    }
}

/// Message params together with the signature computed over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRequest<P> {
    pub params: P,
    pub signature: Eip712Signature,
}
