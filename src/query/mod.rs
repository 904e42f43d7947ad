//! Status query (QueryDR) client
//!
//! A signed GET asking the gateway for the outcome of an earlier checkout. The
//! gateway recommends waiting 15 minutes after checkout before querying.
//!
//! Each call performs exactly one request. Nothing is retried here; callers that
//! poll several transactions fan the calls out themselves.
//!
//! The client is async. Synchronous callers need a Tokio runtime and can drive a
//! query with `Runtime::block_on`.
//!
//! # Examples
//!
//! ```no_run
//! use rust_onepay::query::StatusQueryClient;
//! use rust_onepay::types::{MerchantConfig, QueryDrRequest};
//! use std::time::Duration;
//!
//! # async fn example() -> rust_onepay::Result<()> {
//! let config = MerchantConfig::sandbox_domestic("https://shop.example/payment/callback")
//!     .with_query_timeout(Duration::from_secs(10));
//! let client = StatusQueryClient::new(config)?;
//!
//! let status = client
//!     .query(&QueryDrRequest::new("TXN-42", "op01", "op123456"))
//!     .await?;
//! if status.is_approved() {
//!     println!("Transaction TXN-42 was paid");
//! }
//! # Ok(())
//! # }
//! ```

use crate::crypto::{HmacSigner, SignedParams};
use crate::types::constants::fields;
use crate::types::{MerchantConfig, QueryDrRequest, QueryDrResponse};
use crate::{OnePayError, Result};
use reqwest::Client;
use url::Url;

#[cfg(test)]
mod tests;

/// Client for the gateway's status query endpoint
#[derive(Clone)]
pub struct StatusQueryClient {
    /// Gateway origin, `https://<host>` unless overridden
    base_url: Url,
    /// Merchant settings, read-only
    config: MerchantConfig,
    /// Signer keyed with the merchant secret
    signer: HmacSigner,
    /// HTTP client
    client: Client,
}

impl std::fmt::Debug for StatusQueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusQueryClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .finish()
    }
}

impl StatusQueryClient {
    /// Create a client talking to `https://<payment_gateway_host>`
    pub fn new(config: MerchantConfig) -> Result<Self> {
        let base_url = Url::parse(&format!("https://{}", config.payment_gateway_host))?;
        Self::with_base_url(config, base_url)
    }

    /// Create a client talking to an explicit origin, e.g. a local mock
    pub fn with_base_url(config: MerchantConfig, base_url: Url) -> Result<Self> {
        // Validate configuration first
        config.validate()?;
        let signer = HmacSigner::from_hex(&config.secure_secret)?;

        let mut client_builder = Client::builder();

        if let Some(timeout) = config.query_timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| OnePayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            config,
            signer,
            client,
        })
    }

    /// The merchant config this client signs with
    pub fn config(&self) -> &MerchantConfig {
        &self.config
    }

    /// Build the signed query parameters for a request
    pub fn signed_params(&self, request: &QueryDrRequest) -> Result<SignedParams> {
        if request.merch_txn_ref.is_empty() {
            return Err(OnePayError::validation(vec![
                crate::error::FieldViolation::new("merch_txn_ref", "must not be empty"),
            ]));
        }

        let mut params = SignedParams::new()
            .with(fields::COMMAND, request.command.as_str())
            .with(fields::VERSION, request.version.as_str())
            .with(fields::MERCH_TXN_REF, request.merch_txn_ref.as_str())
            .with(fields::MERCHANT, self.config.merchant.as_str())
            .with(fields::ACCESS_CODE, self.config.access_code.as_str())
            .with(fields::USER, request.user.as_str())
            .with(fields::PASSWORD, request.password.as_str());

        self.signer.sign_params(&mut params)?;
        Ok(params)
    }

    /// Build the full signed request URL
    pub fn request_url(&self, request: &QueryDrRequest) -> Result<Url> {
        let params = self.signed_params(request)?;
        let mut url = self.base_url.clone();
        url.set_path(&self.config.query_dr_path);
        url.set_query(Some(&params.to_query_string()));
        Ok(url)
    }

    /// Ask the gateway for the status of a transaction
    pub async fn query(&self, request: &QueryDrRequest) -> Result<QueryDrResponse> {
        let url = self.request_url(request)?;
        tracing::debug!(
            merch_txn_ref = %request.merch_txn_ref,
            path = %url.path(),
            "Sending status query"
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!(merch_txn_ref = %request.merch_txn_ref, "Status query failed: {}", e);
            OnePayError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                merch_txn_ref = %request.merch_txn_ref,
                "Status query failed with status: {}",
                status
            );
            return Err(OnePayError::http_status(status.as_u16(), body));
        }

        let query_response: QueryDrResponse = serde_json::from_str(&body)?;
        Ok(query_response)
    }
}
