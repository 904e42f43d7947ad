//! OnePay gateway facade
//!
//! Bundles a [`MerchantConfig`] with the protocol defaults of one gateway variant
//! and exposes checkout, callback handling and status queries through one value.

use crate::callback::CallbackVerifier;
use crate::checkout::CheckoutUrlBuilder;
use crate::crypto::SignedParams;
use crate::query::StatusQueryClient;
use crate::types::{
    CheckoutRequest, DomesticResponse, InternationalResponse, MerchantConfig, QueryDrRequest,
    QueryDrResponse,
};
use crate::Result;
use url::Url;

/// Which card gateway a merchant account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentKind {
    /// Domestic ATM cards
    Domestic,
    /// International credit and debit cards
    International,
}

impl PaymentKind {
    /// Short name used in routes and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Domestic => "domestic",
            PaymentKind::International => "international",
        }
    }
}

/// A configured OnePay integration
#[derive(Debug, Clone)]
pub struct OnePay {
    kind: PaymentKind,
    config: MerchantConfig,
    checkout: CheckoutUrlBuilder,
    verifier: CallbackVerifier,
}

impl OnePay {
    /// Create an integration for the given gateway variant
    pub fn new(kind: PaymentKind, config: MerchantConfig) -> Result<Self> {
        config.validate()?;
        let verifier = CallbackVerifier::new(&config.secure_secret)?;
        Ok(Self {
            kind,
            config,
            checkout: CheckoutUrlBuilder::default(),
            verifier,
        })
    }

    /// Domestic card integration
    pub fn domestic(config: MerchantConfig) -> Result<Self> {
        Self::new(PaymentKind::Domestic, config)
    }

    /// International card integration
    pub fn international(config: MerchantConfig) -> Result<Self> {
        Self::new(PaymentKind::International, config)
    }

    /// Domestic sandbox integration
    pub fn sandbox_domestic(return_url: impl Into<String>) -> Result<Self> {
        Self::domestic(MerchantConfig::sandbox_domestic(return_url))
    }

    /// International sandbox integration
    pub fn sandbox_international(return_url: impl Into<String>) -> Result<Self> {
        Self::international(MerchantConfig::sandbox_international(return_url))
    }

    /// Set the landing page locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.checkout = self.checkout.with_locale(locale);
        self
    }

    /// Set the checkout currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.checkout = self.checkout.with_currency(currency);
        self
    }

    /// The gateway variant
    pub fn kind(&self) -> PaymentKind {
        self.kind
    }

    /// The merchant config
    pub fn config(&self) -> &MerchantConfig {
        &self.config
    }

    /// Build a signed checkout redirect URL
    pub fn build_checkout_url(&self, request: &CheckoutRequest) -> Result<Url> {
        self.checkout.build(&self.config, request)
    }

    /// Verify and decode a domestic gateway callback
    pub fn handle_domestic_callback(&self, params: &SignedParams) -> Result<DomesticResponse> {
        self.verifier.handle(params)
    }

    /// Verify and decode an international gateway callback
    pub fn handle_international_callback(
        &self,
        params: &SignedParams,
    ) -> Result<InternationalResponse> {
        self.verifier.handle(params)
    }

    /// Query the gateway for a transaction's status
    pub async fn query_dr(&self, request: &QueryDrRequest) -> Result<QueryDrResponse> {
        StatusQueryClient::new(self.config.clone())?
            .query(request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::HmacSigner;
    use crate::OnePayError;

    #[test]
    fn test_sandbox_presets() {
        let domestic = OnePay::sandbox_domestic("https://shop.example/cb/domestic").unwrap();
        assert_eq!(domestic.kind(), PaymentKind::Domestic);
        assert_eq!(domestic.config().merchant, "ONEPAY");

        let international =
            OnePay::sandbox_international("https://shop.example/cb/international").unwrap();
        assert_eq!(international.kind().as_str(), "international");
        assert_eq!(international.config().access_code, "6BEB2546");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = OnePay::sandbox_domestic("");
        assert!(matches!(result, Err(OnePayError::Config(_))));
    }

    #[test]
    fn test_checkout_then_callback() {
        let onepay = OnePay::sandbox_international("https://shop.example/cb")
            .unwrap()
            .with_locale("en");
        let url = onepay
            .build_checkout_url(&CheckoutRequest::new(250_000, "Order 7", "TXN-7"))
            .unwrap();
        assert_eq!(url.path(), "/vpcpay/vpcpay.op");

        // Simulate the gateway echoing the order back with an outcome
        let mut callback = SignedParams::new()
            .with("vpc_MerchTxnRef", "TXN-7")
            .with("vpc_Amount", "25000000")
            .with("vpc_TxnResponseCode", "0")
            .with("vpc_AVS_Country", "VN");
        HmacSigner::from_hex(&onepay.config().secure_secret)
            .unwrap()
            .sign_params(&mut callback)
            .unwrap();

        let response = onepay.handle_international_callback(&callback).unwrap();
        assert_eq!(response.transaction.amount, 250_000);
        assert_eq!(response.avs_country, "VN");
        assert!(response.transaction.is_approved());

        let domestic_view = onepay.handle_domestic_callback(&callback).unwrap();
        assert_eq!(domestic_view.transaction.merch_txn_ref, "TXN-7");
    }
}
