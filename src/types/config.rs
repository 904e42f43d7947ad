//! Merchant configuration

use super::constants::{limits, sandbox};
use crate::{OnePayError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Merchant account and gateway endpoint settings
///
/// Treated as read-only once constructed; every signing operation borrows it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantConfig {
    /// Gateway host, e.g. `mtf.onepay.vn`
    pub payment_gateway_host: String,
    /// Checkout path on the gateway host
    pub payment_gateway_path: String,
    /// Status query (QueryDR) path on the gateway host
    pub query_dr_path: String,
    /// Merchant id issued by the gateway
    pub merchant: String,
    /// Merchant access code
    pub access_code: String,
    /// Where the gateway sends the shopper back to
    pub return_url: String,
    /// Hex-encoded shared secret
    pub secure_secret: String,
    /// Timeout applied to status queries
    #[serde(default, skip_serializing_if = "Option::is_none", with = "duration_secs")]
    pub query_timeout: Option<Duration>,
}

impl std::fmt::Debug for MerchantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantConfig")
            .field("payment_gateway_host", &self.payment_gateway_host)
            .field("payment_gateway_path", &self.payment_gateway_path)
            .field("query_dr_path", &self.query_dr_path)
            .field("merchant", &self.merchant)
            .field("access_code", &self.access_code)
            .field("return_url", &self.return_url)
            .field("secure_secret", &"<redacted>")
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

impl MerchantConfig {
    /// Create a new merchant config
    pub fn new(
        payment_gateway_host: impl Into<String>,
        payment_gateway_path: impl Into<String>,
        query_dr_path: impl Into<String>,
        merchant: impl Into<String>,
        access_code: impl Into<String>,
        return_url: impl Into<String>,
        secure_secret: impl Into<String>,
    ) -> Self {
        Self {
            payment_gateway_host: payment_gateway_host.into(),
            payment_gateway_path: payment_gateway_path.into(),
            query_dr_path: query_dr_path.into(),
            merchant: merchant.into(),
            access_code: access_code.into(),
            return_url: return_url.into(),
            secure_secret: secure_secret.into(),
            query_timeout: None,
        }
    }

    /// Sandbox settings for the domestic (ATM card) gateway
    pub fn sandbox_domestic(return_url: impl Into<String>) -> Self {
        Self::new(
            sandbox::HOST,
            sandbox::domestic::CHECKOUT_PATH,
            sandbox::domestic::QUERY_DR_PATH,
            sandbox::domestic::MERCHANT,
            sandbox::domestic::ACCESS_CODE,
            return_url,
            sandbox::domestic::SECURE_SECRET,
        )
    }

    /// Sandbox settings for the international (credit card) gateway
    pub fn sandbox_international(return_url: impl Into<String>) -> Self {
        Self::new(
            sandbox::HOST,
            sandbox::international::CHECKOUT_PATH,
            sandbox::international::QUERY_DR_PATH,
            sandbox::international::MERCHANT,
            sandbox::international::ACCESS_CODE,
            return_url,
            sandbox::international::SECURE_SECRET,
        )
    }

    /// Load the config from `ONEPAY_*` environment variables
    ///
    /// Reads `ONEPAY_GATEWAY_HOST`, `ONEPAY_GATEWAY_PATH`, `ONEPAY_QUERY_DR_PATH`,
    /// `ONEPAY_MERCHANT`, `ONEPAY_ACCESS_CODE`, `ONEPAY_RETURN_URL`,
    /// `ONEPAY_SECURE_SECRET` and the optional `ONEPAY_QUERY_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        fn required(name: &str) -> Result<String> {
            env::var(name)
                .map_err(|_| OnePayError::config(format!("{} environment variable is required", name)))
        }

        let query_timeout = match env::var("ONEPAY_QUERY_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    OnePayError::config(format!(
                        "ONEPAY_QUERY_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(OnePayError::config(
                    "ONEPAY_QUERY_TIMEOUT_SECS is not valid unicode",
                ))
            }
        };

        let config = Self {
            payment_gateway_host: required("ONEPAY_GATEWAY_HOST")?,
            payment_gateway_path: required("ONEPAY_GATEWAY_PATH")?,
            query_dr_path: required("ONEPAY_QUERY_DR_PATH")?,
            merchant: required("ONEPAY_MERCHANT")?,
            access_code: required("ONEPAY_ACCESS_CODE")?,
            return_url: required("ONEPAY_RETURN_URL")?,
            secure_secret: required("ONEPAY_SECURE_SECRET")?,
            query_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            OnePayError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            OnePayError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the merchant configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("payment_gateway_host", &self.payment_gateway_host),
            ("payment_gateway_path", &self.payment_gateway_path),
            ("query_dr_path", &self.query_dr_path),
            ("merchant", &self.merchant),
            ("access_code", &self.access_code),
            ("return_url", &self.return_url),
            ("secure_secret", &self.secure_secret),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(OnePayError::config(format!("{} cannot be empty", name)));
            }
        }

        if self.return_url.chars().count() > limits::RETURN_URL_MAX {
            return Err(OnePayError::config(format!(
                "return_url must be at most {} characters",
                limits::RETURN_URL_MAX
            )));
        }

        self.secret_bytes()?;
        Ok(())
    }

    /// Decode the hex-encoded shared secret
    pub fn secret_bytes(&self) -> Result<Vec<u8>> {
        Ok(hex::decode(&self.secure_secret)?)
    }

    /// Set the status query timeout
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Set the return URL
    pub fn with_return_url(mut self, return_url: impl Into<String>) -> Self {
        self.return_url = return_url.into();
        self
    }

    /// Set the gateway host
    pub fn with_gateway_host(mut self, host: impl Into<String>) -> Self {
        self.payment_gateway_host = host.into();
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&duration.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
