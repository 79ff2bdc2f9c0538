//! Struct hashing and the final EIP-712 digest.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};

use crate::error::{Eip712Error, Result};
use crate::types::{MessageTypeDeclaration, PrimitiveType, TypedField};

/// Prefix of the two-step digest: `"\x19\x01" || domainSeparator || structHash`.
pub const EIP712_PREFIX: [u8; 2] = [0x19, 0x01];

/// A concrete value for one declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Uint(U256),
    Address(Address),
    String(String),
    Bytes(Bytes),
    Bytes32(B256),
}

/// A message with a canonical declaration.
pub trait TypedMessage {
    const DECLARATION: &'static MessageTypeDeclaration;

    /// Field values in declaration order.
    fn field_values(&self) -> Vec<FieldValue>;

    /// The party whose signature authorizes the message.
    fn signer(&self) -> Address;

    fn struct_hash(&self) -> Result<B256> {
        hash_struct(Self::DECLARATION, &self.field_values())
    }
}

/// Encode one field into its 32-byte slot.
///
/// Dynamic values are replaced by their keccak256 hash.
pub fn encode_field(field: &TypedField, value: &FieldValue) -> Result<B256> {
    let word = match (field.ty, value) {
        (PrimitiveType::Bool, FieldValue::Bool(b)) => B256::with_last_byte(u8::from(*b)),
        (PrimitiveType::Uint(bits), FieldValue::Uint(v)) => {
            if v.bit_len() > usize::from(bits) {
                return Err(Eip712Error::ValueOutOfRange { field: field.name, bits });
            }
            B256::from(v.to_be_bytes::<32>())
        }
        (PrimitiveType::Address, FieldValue::Address(a)) => a.into_word(),
        (PrimitiveType::String, FieldValue::String(s)) => keccak256(s.as_bytes()),
        (PrimitiveType::Bytes, FieldValue::Bytes(b)) => keccak256(b),
        (PrimitiveType::Bytes32, FieldValue::Bytes32(h)) => *h,
        (ty, _) => {
            return Err(Eip712Error::FieldTypeMismatch { field: field.name, expected: ty.to_string() })
        }
    };
    Ok(word)
}

/// `keccak256(typeHash || enc(field_1) || ... || enc(field_n))`
pub fn hash_struct(declaration: &MessageTypeDeclaration, values: &[FieldValue]) -> Result<B256> {
    if values.len() != declaration.fields.len() {
        return Err(Eip712Error::FieldCountMismatch {
            expected: declaration.fields.len(),
            actual: values.len(),
        });
    }

    if let Some(field) = declaration.fields.iter().find(|f| !f.ty.is_well_formed()) {
        return Err(Eip712Error::InvalidTypedData(format!(
            "{}.{} has malformed type {}",
            declaration.primary_type, field.name, field.ty
        )));
    }

    let mut buf = Vec::with_capacity((1 + values.len()) * 32);
    buf.extend_from_slice(declaration.type_hash().as_slice());
    for (field, value) in declaration.fields.iter().zip(values) {
        buf.extend_from_slice(encode_field(field, value)?.as_slice());
    }
    Ok(keccak256(&buf))
}

/// `keccak256("\x19\x01" || domainSeparator || structHash)`
pub fn eip712_digest(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut buf = [0u8; 66];
    buf[..2].copy_from_slice(&EIP712_PREFIX);
    buf[2..34].copy_from_slice(domain_separator.as_slice());
    buf[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(buf)
}

/// Hash a message under a domain separator.
pub fn hash_typed_data(
    domain_separator: B256,
    declaration: &MessageTypeDeclaration,
    values: &[FieldValue],
) -> Result<B256> {
    let struct_hash = hash_struct(declaration, values)?;
    Ok(eip712_digest(domain_separator, struct_hash))
}

/// [`hash_typed_data`] for a [`TypedMessage`].
pub fn hash_message<M: TypedMessage>(domain_separator: B256, message: &M) -> Result<B256> {
    Ok(eip712_digest(domain_separator, message.struct_hash()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::REVOKE_TYPE;
    use alloy_primitives::{address, b256, bytes};

    const FLAG: TypedField = TypedField::new("flag", PrimitiveType::Bool);
    const SMALL: TypedField = TypedField::new("small", PrimitiveType::Uint(64));

    #[test]
    fn scalars_fill_one_word() {
        assert_eq!(encode_field(&FLAG, &FieldValue::Bool(true)).unwrap(), B256::with_last_byte(1));
        assert_eq!(encode_field(&FLAG, &FieldValue::Bool(false)).unwrap(), B256::ZERO);

        let word = encode_field(&SMALL, &FieldValue::Uint(U256::from(0x0102u64))).unwrap();
        assert_eq!(&word[30..], &[0x01, 0x02]);
        assert!(word[..30].iter().all(|b| *b == 0));

        let who = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let field = TypedField::new("who", PrimitiveType::Address);
        let word = encode_field(&field, &FieldValue::Address(who)).unwrap();
        assert_eq!(&word[12..], who.as_slice());
        assert!(word[..12].iter().all(|b| *b == 0));
    }

    #[test]
    fn dynamic_values_are_hashed() {
        let data = TypedField::new("data", PrimitiveType::Bytes);
        let payload = bytes!("deadbeef");
        assert_eq!(encode_field(&data, &FieldValue::Bytes(payload.clone())).unwrap(), keccak256(&payload));

        let label = TypedField::new("label", PrimitiveType::String);
        assert_eq!(
            encode_field(&label, &FieldValue::String("EAS".into())).unwrap(),
            keccak256(b"EAS")
        );
    }

    #[test]
    fn rejects_values_wider_than_declared() {
        let too_big = U256::from(u64::MAX) + U256::from(1);
        assert_eq!(
            encode_field(&SMALL, &FieldValue::Uint(too_big)),
            Err(Eip712Error::ValueOutOfRange { field: "small", bits: 64 })
        );
        assert!(encode_field(&SMALL, &FieldValue::Uint(U256::from(u64::MAX))).is_ok());
    }

    #[test]
    fn rejects_mismatched_types() {
        let err = encode_field(&FLAG, &FieldValue::Uint(U256::from(1))).unwrap_err();
        assert_eq!(err, Eip712Error::FieldTypeMismatch { field: "flag", expected: "bool".into() });
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = hash_struct(&REVOKE_TYPE, &[FieldValue::Bool(true)]).unwrap_err();
        assert_eq!(err, Eip712Error::FieldCountMismatch { expected: 6, actual: 1 });
    }

    #[test]
    fn rejects_malformed_declarations() {
        const ODD: MessageTypeDeclaration = MessageTypeDeclaration {
            primary_type: "Odd",
            fields: &[TypedField::new("width", PrimitiveType::Uint(12))],
        };
        let err = hash_struct(&ODD, &[FieldValue::Uint(U256::from(1))]).unwrap_err();
        assert_eq!(err, Eip712Error::InvalidTypedData("Odd.width has malformed type uint12".into()));
    }

    #[test]
    fn digest_binds_the_domain() {
        let struct_hash = b256!("0x71174f5718d24da5c1ac94bdebc21f73e040434b8cb31a7d1b728d645601105f");
        let a = eip712_digest(B256::repeat_byte(1), struct_hash);
        let b = eip712_digest(B256::repeat_byte(2), struct_hash);
        assert_ne!(a, b);
        assert_eq!(a, eip712_digest(B256::repeat_byte(1), struct_hash));
    }
}
