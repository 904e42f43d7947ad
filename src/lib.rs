//! # OnePay Rust Client
//!
//! A type-safe client for the OnePay card payment gateway (domestic ATM cards and
//! international credit cards).
//!
//! ## Features
//!
//! - **Checkout URLs**: Build signed redirect URLs for the hosted payment page
//! - **Callback verification**: Check `vpc_SecureHash` before anything is decoded
//! - **Typed responses**: Domestic and international callback payloads with bilingual messages
//! - **Status queries**: Ask the gateway for the outcome of an earlier transaction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rust_onepay::{CheckoutRequest, OnePay, SignedParams};
//!
//! # fn example(callback_query: &str) -> rust_onepay::Result<()> {
//! let onepay = OnePay::sandbox_domestic("https://shop.example/payment/callback")?;
//!
//! // Send the shopper to the gateway
//! let url = onepay.build_checkout_url(&CheckoutRequest::new(100_000, "Order 42", "TXN-42"))?;
//! println!("Redirect to {}", url);
//!
//! // Later, on the return URL
//! let response = onepay.handle_domestic_callback(&SignedParams::from_query(callback_query))?;
//! println!("{}", response.transaction.txn_response_message.en);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Merchant config, requests, responses and protocol constants
//! - **`crypto`**: Canonical string and HMAC-SHA256 secure hash
//! - **`checkout`**: Signed checkout URL builder
//! - **`callback`**: Callback verification and decoding
//! - **`query`**: QueryDR status client
//! - **`error_codes`**: Response code to message table
//! - **`client`**: The [`OnePay`] facade tying everything together
//! - **`error`**: Error handling

pub mod callback;
pub mod checkout;
pub mod client;
pub mod crypto;
pub mod error;
pub mod error_codes;
pub mod query;
pub mod types;

// Re-exports for convenience
pub use callback::{handle_callback, CallbackVerifier, VerifiedParams};
pub use checkout::{build_checkout_url, CheckoutUrlBuilder};
pub use client::{OnePay, PaymentKind};
pub use crypto::{HmacSigner, SignedParams};
pub use error::{FieldViolation, OnePayError, Result};
pub use error_codes::LocalizedMessage;
pub use query::StatusQueryClient;
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
