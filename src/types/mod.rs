//! Core types for the OnePay integration
//!
//! # Architecture
//!
//! - [`config`] - Merchant account and gateway endpoint settings
//! - [`checkout`] - Order data for a checkout redirect
//! - [`response`] - Typed callback payloads (domestic and international)
//! - [`query`] - Status query request and response
//! - [`constants`] - Field names, protocol defaults, limits and sandbox settings
//!
//! # Examples
//!
//! ```
//! use rust_onepay::types::{CheckoutRequest, MerchantConfig};
//!
//! # fn example() -> rust_onepay::Result<()> {
//! let config = MerchantConfig::sandbox_domestic("https://shop.example/payment/callback");
//! config.validate()?;
//!
//! let request = CheckoutRequest::new(100_000, "Order 42", "TXN-42")
//!     .with_ticket_no("203.0.113.7");
//! assert!(request.violations().is_empty());
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod config;
pub mod constants;
pub mod query;
pub mod response;

// Re-export commonly used types
pub use checkout::CheckoutRequest;
pub use config::MerchantConfig;
pub use constants::{defaults, fields, limits, sandbox};
pub use query::{QueryDrRequest, QueryDrResponse};
pub use response::{CallbackResponse, DomesticResponse, InternationalResponse, TransactionResult};
