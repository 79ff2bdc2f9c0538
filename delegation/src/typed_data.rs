//! Standard EIP-712 JSON typed data (the `eth_signTypedData_v4` payload).

use alloy_dyn_abi::TypedData;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::domain::DomainContext;
use crate::error::{Eip712Error, Result};
use crate::hasher::TypedMessage;
use crate::types::{MessageTypeDeclaration, EIP712_DOMAIN_TYPE};

fn fields_json(declaration: &MessageTypeDeclaration) -> Value {
    declaration
        .fields
        .iter()
        .map(|field| json!({ "name": field.name, "type": field.ty.to_string() }))
        .collect()
}

/// Render a message and its domain as a typed-data JSON document.
pub fn typed_data_json<M>(domain: &DomainContext, message: &M) -> Result<Value>
where
    M: TypedMessage + Serialize,
{
    let declaration = M::DECLARATION;
    let invalid = |e: serde_json::Error| Eip712Error::InvalidTypedData(e.to_string());

    let mut types = Map::new();
    types.insert(EIP712_DOMAIN_TYPE.primary_type.to_string(), fields_json(&EIP712_DOMAIN_TYPE));
    types.insert(declaration.primary_type.to_string(), fields_json(declaration));

    let mut doc = Map::new();
    doc.insert("types".into(), Value::Object(types));
    doc.insert("primaryType".into(), Value::String(declaration.primary_type.to_string()));
    doc.insert("domain".into(), serde_json::to_value(domain.eip712_domain()).map_err(invalid)?);
    doc.insert("message".into(), serde_json::to_value(message).map_err(invalid)?);
    Ok(Value::Object(doc))
}

/// Same as [`typed_data_json`], parsed into alloy's dynamic representation.
pub fn typed_data<M>(domain: &DomainContext, message: &M) -> Result<TypedData>
where
    M: TypedMessage + Serialize,
{
    serde_json::from_value(typed_data_json(domain, message)?)
        .map_err(|e| Eip712Error::InvalidTypedData(e.to_string()))
}
