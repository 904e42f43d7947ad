//! Verification and decoding of gateway callbacks
//!
//! The gateway sends the shopper back to the merchant's return URL with the
//! transaction outcome in the query string. Those parameters are untrusted until
//! their `vpc_SecureHash` has been recomputed and matched.
//!
//! # Flow
//!
//! 1. [`CallbackVerifier::verify`] checks the signature and yields [`VerifiedParams`];
//!    a mismatch is an [`OnePayError::Authentication`] and nothing is decoded.
//! 2. [`VerifiedParams::decode`] maps known gateway fields onto a typed response.
//! 3. The response is post-processed: the amount goes back to major units and the
//!    response code is translated into a bilingual message.
//!
//! # Examples
//!
//! ```no_run
//! use rust_onepay::callback::CallbackVerifier;
//! use rust_onepay::crypto::SignedParams;
//! use rust_onepay::types::InternationalResponse;
//!
//! # fn example(query: &str) -> rust_onepay::Result<()> {
//! let verifier = CallbackVerifier::new("6D0870CDE5F24F34F3915FB0045120DB")?;
//! let response: InternationalResponse = verifier.handle(&SignedParams::from_query(query))?;
//!
//! if response.transaction.is_approved() {
//!     println!("Paid {} VND", response.transaction.amount);
//! }
//! # Ok(())
//! # }
//! ```

use crate::crypto::{HmacSigner, SignedParams};
use crate::types::CallbackResponse;
use crate::{OnePayError, Result};

#[cfg(test)]
mod tests;

/// Checks callback signatures with the merchant's shared secret
#[derive(Debug, Clone)]
pub struct CallbackVerifier {
    signer: HmacSigner,
}

/// Parameters whose signature has been checked
///
/// Only [`CallbackVerifier::verify`] can produce this type, so decoding is never
/// reachable for unverified data.
#[derive(Debug)]
pub struct VerifiedParams<'a> {
    params: &'a SignedParams,
}

impl CallbackVerifier {
    /// Create a verifier from the hex-encoded shared secret
    pub fn new(secret_hex: &str) -> Result<Self> {
        Ok(Self {
            signer: HmacSigner::from_hex(secret_hex)?,
        })
    }

    /// Create a verifier from an existing signer
    pub fn from_signer(signer: HmacSigner) -> Self {
        Self { signer }
    }

    /// Check the signature carried by the parameters
    pub fn verify<'a>(&self, params: &'a SignedParams) -> Result<VerifiedParams<'a>> {
        let merch_txn_ref = params
            .get(crate::types::fields::MERCH_TXN_REF)
            .unwrap_or_default();

        if params.secure_hash().is_none() {
            tracing::warn!(merch_txn_ref, "Rejected callback without secure hash");
            return Err(OnePayError::authentication("Missing vpc_SecureHash"));
        }

        if !self.signer.verify_params(params)? {
            tracing::warn!(merch_txn_ref, "Rejected callback with invalid secure hash");
            return Err(OnePayError::authentication("Invalid vpc_SecureHash"));
        }

        tracing::debug!(merch_txn_ref, fields = params.len(), "Callback signature verified");
        Ok(VerifiedParams { params })
    }

    /// Verify, decode and post-process a callback in one step
    pub fn handle<R: CallbackResponse>(&self, params: &SignedParams) -> Result<R> {
        let response: R = self.verify(params)?.decode()?;
        tracing::info!(
            merch_txn_ref = %response.transaction().merch_txn_ref,
            response_code = %response.transaction().txn_response_code,
            "Accepted gateway callback"
        );
        Ok(response)
    }
}

impl VerifiedParams<'_> {
    /// The verified parameters
    pub fn params(&self) -> &SignedParams {
        self.params
    }

    /// Decode into a typed response and post-process it
    ///
    /// Unknown keys are ignored and missing ones keep their defaults.
    pub fn decode<R: CallbackResponse>(&self) -> Result<R> {
        let mut response = R::default();
        for (key, value) in self.params.iter() {
            response.assign(key, value)?;
        }
        response.post_process();
        Ok(response)
    }
}

/// Verify and decode a callback with a hex-encoded secret
pub fn handle_callback<R: CallbackResponse>(params: &SignedParams, secret_hex: &str) -> Result<R> {
    CallbackVerifier::new(secret_hex)?.handle(params)
}
