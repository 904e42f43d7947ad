//! HMAC-SHA-256 secure hash

use super::canonical::SignedParams;
use crate::types::constants::fields;
use crate::{OnePayError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies canonical strings with the merchant's shared secret
#[derive(Clone)]
pub struct HmacSigner {
    key: Vec<u8>,
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner").field("key", &"<redacted>").finish()
    }
}

impl HmacSigner {
    /// Create a signer from the hex-encoded secret
    pub fn from_hex(secret_hex: &str) -> Result<Self> {
        let key = hex::decode(secret_hex)?;
        if key.is_empty() {
            return Err(OnePayError::config("Secure secret cannot be empty"));
        }
        Ok(Self { key })
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|_| OnePayError::config("Invalid HMAC key length"))
    }

    /// Uppercase hex HMAC-SHA-256 of the canonical string
    pub fn sign(&self, canonical: &str) -> Result<String> {
        let mut mac = self.mac()?;
        mac.update(canonical.as_bytes());
        Ok(hex::encode_upper(mac.finalize().into_bytes()))
    }

    /// Check a claimed signature against the canonical string
    ///
    /// The digest comparison is constant-time. A claimed value that is not hex
    /// simply fails verification.
    pub fn verify(&self, canonical: &str, claimed_hex: &str) -> Result<bool> {
        let Ok(claimed) = hex::decode(claimed_hex.trim()) else {
            return Ok(false);
        };
        let mut mac = self.mac()?;
        mac.update(canonical.as_bytes());
        Ok(mac.verify_slice(&claimed).is_ok())
    }

    /// Sign a parameter set and store the result under `vpc_SecureHash`
    pub fn sign_params(&self, params: &mut SignedParams) -> Result<String> {
        let signature = self.sign(&params.canonicalize()?)?;
        params.insert(fields::SECURE_HASH, signature.clone());
        Ok(signature)
    }

    /// Verify the `vpc_SecureHash` carried by a parameter set
    pub fn verify_params(&self, params: &SignedParams) -> Result<bool> {
        match params.secure_hash() {
            Some(claimed) => self.verify(&params.canonicalize()?, claimed),
            None => Ok(false),
        }
    }
}

/// Sign a canonical string with a hex-encoded secret
pub fn sign(canonical: &str, secret_hex: &str) -> Result<String> {
    HmacSigner::from_hex(secret_hex)?.sign(canonical)
}

/// Verify a claimed signature over a canonical string
pub fn verify(canonical: &str, secret_hex: &str, claimed_hex: &str) -> Result<bool> {
    HmacSigner::from_hex(secret_hex)?.verify(canonical, claimed_hex)
}
