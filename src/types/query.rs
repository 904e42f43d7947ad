//! Status query (QueryDR) types

use super::constants::defaults;
use crate::error_codes::{self, LocalizedMessage};
use serde::{Deserialize, Serialize};

/// Parameters for asking the gateway about an earlier transaction
///
/// Merchant id and access code are taken from the [`MerchantConfig`](super::MerchantConfig).
#[derive(Clone, PartialEq, Eq)]
pub struct QueryDrRequest {
    /// Gateway command, `queryDR` by default
    pub command: String,
    /// Query protocol version, `1` by default
    pub version: String,
    /// Reference of the transaction being queried
    pub merch_txn_ref: String,
    /// Query API user
    pub user: String,
    /// Query API password
    pub password: String,
}

impl std::fmt::Debug for QueryDrRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryDrRequest")
            .field("command", &self.command)
            .field("version", &self.version)
            .field("merch_txn_ref", &self.merch_txn_ref)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl QueryDrRequest {
    /// Create a new status query
    pub fn new(
        merch_txn_ref: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            command: defaults::QUERY_COMMAND.to_string(),
            version: defaults::QUERY_VERSION.to_string(),
            merch_txn_ref: merch_txn_ref.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Override the query protocol version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Gateway answer to a status query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDrResponse {
    /// `Y` when the gateway has a record of the transaction
    #[serde(rename = "vpc_DRExists", default)]
    pub dr_exists: Option<String>,
    /// Response code of the recorded transaction
    #[serde(rename = "vpc_TxnResponseCodes", default)]
    pub txn_response_code: Option<String>,
}

impl QueryDrResponse {
    /// Whether the gateway knows the transaction
    pub fn exists(&self) -> bool {
        self.dr_exists.as_deref() == Some("Y")
    }

    /// Whether the recorded transaction was approved
    pub fn is_approved(&self) -> bool {
        self.exists() && self.txn_response_code.as_deref() == Some(error_codes::APPROVED)
    }

    /// Bilingual message for the recorded response code
    pub fn response_message(&self) -> Option<LocalizedMessage> {
        self.txn_response_code
            .as_deref()
            .map(error_codes::message_for)
    }
}
