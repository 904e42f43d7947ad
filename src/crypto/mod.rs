//! Secure hash utilities for OnePay parameter sets
//!
//! Every request to and from the gateway is authenticated with an HMAC-SHA-256
//! digest over a canonical string built from the `vpc_`-prefixed parameters.
//!
//! # Architecture
//!
//! - [`canonical`] - [`SignedParams`] and the canonical signing string
//! - [`signature`] - [`HmacSigner`], keyed with the hex-decoded merchant secret
//!
//! # Examples
//!
//! ```
//! use rust_onepay::crypto::{HmacSigner, SignedParams};
//!
//! # fn example() -> rust_onepay::Result<()> {
//! let mut params = SignedParams::new()
//!     .with("vpc_Version", "2")
//!     .with("vpc_Command", "pay")
//!     .with("Title", "not signed");
//!
//! assert_eq!(params.canonicalize()?, "vpc_Command=pay&vpc_Version=2");
//!
//! let signer = HmacSigner::from_hex("A3EFDFABA8653DF2342E8DAC29B51AF0")?;
//! signer.sign_params(&mut params)?;
//! assert!(signer.verify_params(&params)?);
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod signature;


// Re-export commonly used items
pub use canonical::{canonicalize, SignedParams};
pub use signature::{sign, verify, HmacSigner};
