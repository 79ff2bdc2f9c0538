//! Canonical declarations of the EIP-712 domain and the two delegated message shapes.
//!
//! Field order is part of the hash. The declarations below must match the
//! verifying contract byte for byte.

use std::fmt;

use alloy_primitives::{keccak256, B256};

pub const EIP712_DOMAIN: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

pub const ATTEST_TYPED_SIGNATURE: &str = "Attest(address attester,bytes32 schema,address recipient,uint64 expirationTime,bool revocable,bytes32 refUID,bytes data,uint256 value,uint256 nonce,uint64 deadline)";

pub const REVOKE_TYPED_SIGNATURE: &str =
    "Revoke(address revoker,bytes32 schema,bytes32 uid,uint256 value,uint256 nonce,uint64 deadline)";

pub const ATTEST_PRIMARY_TYPE: &str = "Attest";
pub const REVOKE_PRIMARY_TYPE: &str = "Revoke";

/// The primitive types a delegated message field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    /// Unsigned integer of the given bit width (8..=256, multiple of 8).
    Uint(u16),
    Address,
    String,
    Bytes,
    Bytes32,
}

impl PrimitiveType {
    /// Whether the type is hashed before being placed in its 32-byte slot.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::String | Self::Bytes)
    }

    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Uint(bits) => (8..=256).contains(bits) && bits % 8 == 0,
            _ => true,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Address => f.write_str("address"),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::Bytes32 => f.write_str("bytes32"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedField {
    pub name: &'static str,
    pub ty: PrimitiveType,
}

impl TypedField {
    pub const fn new(name: &'static str, ty: PrimitiveType) -> Self {
        Self { name, ty }
    }
}

/// A named, ordered list of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTypeDeclaration {
    pub primary_type: &'static str,
    pub fields: &'static [TypedField],
}

impl MessageTypeDeclaration {
    /// The canonical type signature, e.g. `Revoke(address revoker,bytes32 schema,...)`.
    pub fn type_signature(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|field| format!("{} {}", field.ty, field.name))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({fields})", self.primary_type)
    }

    pub fn type_hash(&self) -> B256 {
        keccak256(self.type_signature().as_bytes())
    }
}

pub const EIP712_DOMAIN_TYPE: MessageTypeDeclaration = MessageTypeDeclaration {
    primary_type: "EIP712Domain",
    fields: &[
        TypedField::new("name", PrimitiveType::String),
        TypedField::new("version", PrimitiveType::String),
        TypedField::new("chainId", PrimitiveType::Uint(256)),
        TypedField::new("verifyingContract", PrimitiveType::Address),
    ],
};

pub const ATTEST_TYPE: MessageTypeDeclaration = MessageTypeDeclaration {
    primary_type: ATTEST_PRIMARY_TYPE,
    fields: &[
        TypedField::new("attester", PrimitiveType::Address),
        TypedField::new("schema", PrimitiveType::Bytes32),
        TypedField::new("recipient", PrimitiveType::Address),
        TypedField::new("expirationTime", PrimitiveType::Uint(64)),
        TypedField::new("revocable", PrimitiveType::Bool),
        TypedField::new("refUID", PrimitiveType::Bytes32),
        TypedField::new("data", PrimitiveType::Bytes),
        TypedField::new("value", PrimitiveType::Uint(256)),
        TypedField::new("nonce", PrimitiveType::Uint(256)),
        TypedField::new("deadline", PrimitiveType::Uint(64)),
    ],
};

pub const REVOKE_TYPE: MessageTypeDeclaration = MessageTypeDeclaration {
    primary_type: REVOKE_PRIMARY_TYPE,
    fields: &[
        TypedField::new("revoker", PrimitiveType::Address),
        TypedField::new("schema", PrimitiveType::Bytes32),
        TypedField::new("uid", PrimitiveType::Bytes32),
        TypedField::new("value", PrimitiveType::Uint(256)),
        TypedField::new("nonce", PrimitiveType::Uint(256)),
        TypedField::new("deadline", PrimitiveType::Uint(64)),
    ],
};

/// The closed set of supported delegated messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Attest,
    Revoke,
}

impl MessageKind {
    pub fn declaration(&self) -> &'static MessageTypeDeclaration {
        match self {
            Self::Attest => &ATTEST_TYPE,
            Self::Revoke => &REVOKE_TYPE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn declarations_render_canonical_signatures() {
        assert_eq!(EIP712_DOMAIN_TYPE.type_signature(), EIP712_DOMAIN);
        assert_eq!(ATTEST_TYPE.type_signature(), ATTEST_TYPED_SIGNATURE);
        assert_eq!(REVOKE_TYPE.type_signature(), REVOKE_TYPED_SIGNATURE);
    }

    #[test]
    fn type_hashes_match_contract_constants() {
        assert_eq!(
            EIP712_DOMAIN_TYPE.type_hash(),
            b256!("0x8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f")
        );
        assert_eq!(
            ATTEST_TYPE.type_hash(),
            b256!("0xfeb2925a02bae3dae48d424a0437a2b6ac939aa9230ddc55a1a76f065d988076")
        );
        assert_eq!(
            REVOKE_TYPE.type_hash(),
            b256!("0xb5d556f07587ec0f08cf386545cc4362c702a001650c2058002615ee5c9d1e75")
        );
    }

    #[test]
    fn all_declared_fields_are_well_formed() {
        for decl in [EIP712_DOMAIN_TYPE, ATTEST_TYPE, REVOKE_TYPE] {
            assert!(decl.fields.iter().all(|f| f.ty.is_well_formed()), "{}", decl.primary_type);
        }
        assert!(!PrimitiveType::Uint(0).is_well_formed());
        assert!(!PrimitiveType::Uint(12).is_well_formed());
        assert!(!PrimitiveType::Uint(264).is_well_formed());
    }

    #[test]
    fn kinds_map_to_declarations() {
        assert_eq!(MessageKind::Attest.declaration().primary_type, ATTEST_PRIMARY_TYPE);
        assert_eq!(MessageKind::Revoke.declaration().primary_type, REVOKE_PRIMARY_TYPE);
    }
}
