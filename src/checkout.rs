//! Signed checkout redirect URLs
//!
//! Building a URL is a pure function of the merchant config and the order: no
//! network I/O happens here.

use crate::crypto::{HmacSigner, SignedParams};
use crate::types::constants::{defaults, fields};
use crate::types::{CheckoutRequest, MerchantConfig};
use crate::{OnePayError, Result};
use url::Url;

/// Builds the URL a shopper is redirected to for payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrlBuilder {
    /// Protocol version sent as `vpc_Version`
    pub version: u32,
    /// Currency sent as `vpc_Currency`
    pub currency: String,
    /// Command sent as `vpc_Command`
    pub command: String,
    /// Landing page locale sent as `vpc_Locale`
    pub locale: String,
}

impl Default for CheckoutUrlBuilder {
    fn default() -> Self {
        Self {
            version: defaults::VERSION,
            currency: defaults::CURRENCY.to_string(),
            command: defaults::COMMAND.to_string(),
            locale: defaults::LOCALE.to_string(),
        }
    }
}

impl CheckoutUrlBuilder {
    /// Create a builder with the gateway's default protocol fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the landing page locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Validate the order and produce the signed parameter set
    ///
    /// The returned set carries `vpc_SecureHash` but none of the unsigned display fields.
    pub fn signed_params(
        &self,
        config: &MerchantConfig,
        request: &CheckoutRequest,
    ) -> Result<SignedParams> {
        let violations = request.violations();
        if !violations.is_empty() {
            return Err(OnePayError::validation(violations));
        }
        config.validate()?;

        let mut params = SignedParams::new()
            .with(fields::VERSION, self.version.to_string())
            .with(fields::CURRENCY, self.currency.as_str())
            .with(fields::COMMAND, self.command.as_str())
            .with(fields::ACCESS_CODE, config.access_code.as_str())
            .with(fields::MERCHANT, config.merchant.as_str())
            .with(fields::LOCALE, self.locale.as_str())
            .with(fields::RETURN_URL, config.return_url.as_str())
            .with(fields::MERCH_TXN_REF, request.merch_txn_ref.as_str())
            .with(fields::ORDER_INFO, request.order_info.as_str())
            .with(fields::AMOUNT, request.minor_units().to_string())
            .with(
                fields::TICKET_NO,
                request.ticket_no.as_deref().unwrap_or_default(),
            );

        HmacSigner::from_hex(&config.secure_secret)?.sign_params(&mut params)?;
        Ok(params)
    }

    /// Build the absolute checkout URL
    pub fn build(&self, config: &MerchantConfig, request: &CheckoutRequest) -> Result<Url> {
        let mut params = self.signed_params(config, request)?;

        if let Some(title) = &request.title {
            params.insert(fields::TITLE, title.as_str());
        }
        if let Some(again_link) = &request.again_link {
            params.insert(fields::AGAIN_LINK, again_link.as_str());
        }

        let mut url = Url::parse(&format!("https://{}", config.payment_gateway_host))?;
        url.set_path(&config.payment_gateway_path);
        url.set_query(Some(&params.to_query_string()));

        tracing::info!(
            merch_txn_ref = %request.merch_txn_ref,
            amount = request.amount,
            host = %config.payment_gateway_host,
            "Issued checkout URL"
        );

        Ok(url)
    }
}

/// Build a checkout URL with the default protocol fields
pub fn build_checkout_url(config: &MerchantConfig, request: &CheckoutRequest) -> Result<Url> {
    CheckoutUrlBuilder::default().build(config, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::verify;

    fn config() -> MerchantConfig {
        MerchantConfig::sandbox_domestic("https://shop.example/payment/callback")
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest::new(100_000, "Order 42", "TXN-42").with_ticket_no("::1")
    }

    #[test]
    fn test_url_shape() {
        let url = build_checkout_url(&config(), &request()).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("mtf.onepay.vn"));
        assert_eq!(url.path(), "/onecomm-pay/vpc.op");

        let params = SignedParams::from_query(url.query().unwrap());
        assert_eq!(params.get("vpc_Version"), Some("2"));
        assert_eq!(params.get("vpc_Currency"), Some("VND"));
        assert_eq!(params.get("vpc_Command"), Some("pay"));
        assert_eq!(params.get("vpc_AccessCode"), Some("D67342C2"));
        assert_eq!(params.get("vpc_Merchant"), Some("ONEPAY"));
        assert_eq!(params.get("vpc_Locale"), Some("vn"));
        assert_eq!(
            params.get("vpc_ReturnURL"),
            Some("https://shop.example/payment/callback")
        );
        assert_eq!(params.get("vpc_TicketNo"), Some("::1"));
        assert!(params.get("Title").is_none());
    }

    #[test]
    fn test_amount_is_sent_in_minor_units() {
        let url = build_checkout_url(&config(), &request()).unwrap();
        let params = SignedParams::from_query(url.query().unwrap());
        assert_eq!(params.get("vpc_Amount"), Some("10000000"));
    }

    #[test]
    fn test_round_trip_verification() {
        let config = config();
        let request = request()
            .with_title("Shop & Co")
            .with_again_link("https://shop.example/cart");
        let url = build_checkout_url(&config, &request).unwrap();

        let params = SignedParams::from_query(url.query().unwrap());
        assert_eq!(params.get("Title"), Some("Shop & Co"));

        let signature = params.secure_hash().unwrap();
        let canonical = params.canonicalize().unwrap();
        assert!(verify(&canonical, &config.secure_secret, signature).unwrap());
    }

    #[test]
    fn test_validation_happens_before_signing() {
        let mut config = config();
        config.secure_secret = "not-hex".to_string();
        let bad = CheckoutRequest::new(0, "", "TXN");

        let err = build_checkout_url(&config, &bad).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["amount", "order_info"]);
    }

    #[test]
    fn test_bad_secret_is_config_error() {
        let mut config = config();
        config.secure_secret = "not-hex".to_string();
        let err = build_checkout_url(&config, &request()).unwrap_err();
        assert!(matches!(err, OnePayError::Config(_)));
    }

    #[test]
    fn test_locale_override() {
        let url = CheckoutUrlBuilder::new()
            .with_locale("en")
            .build(&config(), &request())
            .unwrap();
        let params = SignedParams::from_query(url.query().unwrap());
        assert_eq!(params.get("vpc_Locale"), Some("en"));
    }
}
