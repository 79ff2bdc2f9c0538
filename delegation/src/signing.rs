use alloy_primitives::{hex, Signature, B256, U256};
use alloy_signer::Signer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Eip712Error, Result};

/// Order of the secp256k1 group.
const SECP256K1_ORDER: U256 = U256::from_limbs([
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
]);

/// A recoverable ECDSA signature in the (r, s, v) form contracts consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Eip712Signature {
    pub r: B256,
    pub s: B256,
    /// 27 or 28 when produced by [`sign_digest`]; 0 or 1 are accepted on input.
    pub v: u8,
}

impl Eip712Signature {
    pub fn new(r: B256, s: B256, v: u8) -> Self {
        Self { r, s, v }
    }

    /// Build from separately encoded components, checking their lengths.
    pub fn from_parts(r: &[u8], s: &[u8], v: u8) -> Result<Self> {
        if r.len() != 32 || s.len() != 32 {
            return Err(Eip712Error::MalformedSignature(format!(
                "r and s must be 32 bytes, got {} and {}",
                r.len(),
                s.len()
            )));
        }
        Ok(Self::new(B256::from_slice(r), B256::from_slice(s), v))
    }

    /// Parse a 65-byte `r || s || v` signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 65 {
            return Err(Eip712Error::MalformedSignature(format!(
                "expected 65 bytes, got {}",
                bytes.len()
            )));
        }
        Self::from_parts(&bytes[..32], &bytes[32..64], bytes[64])
    }

    pub fn as_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v;
        out
    }

    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.as_bytes())
    }

    /// Validate the components and convert to a signature recovery can run on.
    pub fn to_recoverable(&self) -> Result<Signature> {
        let y_parity = match self.v {
            0 | 27 => false,
            1 | 28 => true,
            v => return Err(Eip712Error::MalformedSignature(format!("invalid v value {v}"))),
        };

        let r = U256::from_be_bytes(self.r.0);
        let s = U256::from_be_bytes(self.s.0);
        if r.is_zero() || r >= SECP256K1_ORDER {
            return Err(Eip712Error::MalformedSignature("r is out of range".into()));
        }
        if s.is_zero() || s >= SECP256K1_ORDER {
            return Err(Eip712Error::MalformedSignature("s is out of range".into()));
        }
        Ok(Signature::new(r, s, y_parity))
    }
}

impl From<Signature> for Eip712Signature {
    fn from(signature: Signature) -> Self {
        Self {
            r: B256::from(signature.r().to_be_bytes::<32>()),
            s: B256::from(signature.s().to_be_bytes::<32>()),
            v: 27 + u8::from(signature.v()),
        }
    }
}

/// Sign a digest with an external key holder.
///
/// Works with any alloy signer (local key, keystore, hardware or remote
/// custody); the result is normalized to `v` in {27, 28}.
pub async fn sign_digest<S>(signer: &S, digest: &B256) -> Result<Eip712Signature>
where
    S: Signer + ?Sized,
{
    let signature = signer
        .sign_hash(digest)
        .await
        .map_err(|e| Eip712Error::SigningFailed(e.to_string()))?;
    debug!(signer = %signer.address(), %digest, "signed EIP-712 digest");
    Ok(signature.into())
}
