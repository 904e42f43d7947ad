//! Callback response types
//!
//! Each response variant maps gateway field names onto typed fields through an
//! explicit `match`; keys that are not listed are ignored and listed keys that are
//! absent keep their default value.

use super::constants::defaults::MINOR_UNIT_FACTOR;
use crate::error_codes::{self, LocalizedMessage};
use crate::{OnePayError, Result};
use serde::Serialize;

/// A callback payload that can be decoded from verified gateway parameters
pub trait CallbackResponse: Default {
    /// Assign one verified gateway field
    fn assign(&mut self, key: &str, value: &str) -> Result<()>;

    /// Fields shared by every response variant
    fn transaction(&self) -> &TransactionResult;

    /// Mutable access to the shared fields
    fn transaction_mut(&mut self) -> &mut TransactionResult;

    /// Convert the amount to major units and attach the response message
    fn post_process(&mut self) {
        self.transaction_mut().post_process();
    }
}

/// Fields common to domestic and international callbacks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    /// Extra data echoed by the gateway
    #[serde(rename = "vpc_AdditionData")]
    pub addition_data: String,
    /// Command echoed back, normally `pay`
    #[serde(rename = "vpc_Command")]
    pub command: String,
    /// Currency of the transaction
    #[serde(rename = "vpc_CurrencyCode")]
    pub currency_code: String,
    /// Landing page locale
    #[serde(rename = "vpc_Locale")]
    pub locale: String,
    /// Merchant transaction reference from checkout
    #[serde(rename = "vpc_MerchTxnRef")]
    pub merch_txn_ref: String,
    /// Gateway transaction number
    #[serde(rename = "vpc_TransactionNo")]
    pub transaction_no: String,
    /// Protocol version
    #[serde(rename = "vpc_Version")]
    pub version: String,
    /// Signature the callback carried
    #[serde(rename = "vpc_SecureHash")]
    pub secure_hash: String,
    /// Acquirer response code
    #[serde(rename = "vpc_AcqResponseCode")]
    pub acq_response_code: String,
    /// Issuer authorization id
    #[serde(rename = "vpc_AuthorizeId")]
    pub authorize_id: String,
    /// Card scheme, e.g. `MC` or `VC`
    #[serde(rename = "vpc_Card")]
    pub card: String,
    /// Masked card number
    #[serde(rename = "vpc_CardNum")]
    pub card_num: String,
    /// Commercial card flag
    #[serde(rename = "vpc_CommercialCard")]
    pub commercial_card: String,
    /// 3-D Secure electronic commerce indicator
    #[serde(rename = "vpc_3DSECI")]
    pub three_ds_eci: String,
    /// Free-text gateway message
    #[serde(rename = "vpc_Message")]
    pub message: String,
    /// Merchant id
    #[serde(rename = "vpc_Merchant")]
    pub merchant: String,
    /// Minor units while decoding, major units once post-processed
    #[serde(rename = "vpc_Amount")]
    pub amount: u64,
    /// Order description from checkout
    #[serde(rename = "vpc_OrderInfo")]
    pub order_info: String,
    /// Gateway response code, `0` when approved
    #[serde(rename = "vpc_TxnResponseCode")]
    pub txn_response_code: String,
    /// Unsigned "pay again" link
    #[serde(rename = "AgainLink")]
    pub again_link: String,
    /// Unsigned landing page title
    #[serde(rename = "Title")]
    pub title: String,
    /// Bilingual message for `txn_response_code`, filled in by post-processing
    #[serde(rename = "txnResponseMessage")]
    pub txn_response_message: LocalizedMessage,
}

impl TransactionResult {
    /// Assign a shared field, returning `false` when the key is not one of them
    pub fn assign(&mut self, key: &str, value: &str) -> Result<bool> {
        let slot = match key {
            "vpc_AdditionData" => &mut self.addition_data,
            "vpc_Command" => &mut self.command,
            "vpc_CurrencyCode" => &mut self.currency_code,
            "vpc_Locale" => &mut self.locale,
            "vpc_MerchTxnRef" => &mut self.merch_txn_ref,
            "vpc_TransactionNo" => &mut self.transaction_no,
            "vpc_Version" => &mut self.version,
            "vpc_SecureHash" => &mut self.secure_hash,
            "vpc_AcqResponseCode" => &mut self.acq_response_code,
            "vpc_AuthorizeId" => &mut self.authorize_id,
            "vpc_Card" => &mut self.card,
            "vpc_CardNum" => &mut self.card_num,
            "vpc_CommercialCard" => &mut self.commercial_card,
            "vpc_3DSECI" => &mut self.three_ds_eci,
            "vpc_Message" => &mut self.message,
            "vpc_Merchant" => &mut self.merchant,
            "vpc_OrderInfo" => &mut self.order_info,
            "vpc_TxnResponseCode" => &mut self.txn_response_code,
            "AgainLink" => &mut self.again_link,
            "Title" => &mut self.title,
            "vpc_Amount" => {
                self.amount = parse_amount(value)?;
                return Ok(true);
            }
            _ => return Ok(false),
        };
        *slot = value.to_string();
        Ok(true)
    }

    /// Convert the amount to major units and look up the response message
    pub fn post_process(&mut self) {
        self.amount /= MINOR_UNIT_FACTOR;
        self.txn_response_message = error_codes::message_for(&self.txn_response_code);
    }

    /// Whether the gateway approved the transaction
    pub fn is_approved(&self) -> bool {
        self.txn_response_code == error_codes::APPROVED
    }
}

fn parse_amount(value: &str) -> Result<u64> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| OnePayError::decode(format!("vpc_Amount is not an integer: {:?}", value)))
}

/// Callback from the domestic (ATM card) gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomesticResponse {
    /// Fields shared with international callbacks
    #[serde(flatten)]
    pub transaction: TransactionResult,
    /// Whether the card is enrolled in 3-D Secure
    #[serde(rename = "vpc_3Dsenrolled")]
    pub three_ds_enrolled: String,
    /// 3-D Secure authentication status
    #[serde(rename = "vpc_3Dsstatus")]
    pub three_ds_status: String,
}

impl CallbackResponse for DomesticResponse {
    fn assign(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "vpc_3Dsenrolled" => self.three_ds_enrolled = value.to_string(),
            "vpc_3Dsstatus" => self.three_ds_status = value.to_string(),
            _ => {
                self.transaction.assign(key, value)?;
            }
        }
        Ok(())
    }

    fn transaction(&self) -> &TransactionResult {
        &self.transaction
    }

    fn transaction_mut(&mut self) -> &mut TransactionResult {
        &mut self.transaction
    }
}

/// Callback from the international (credit card) gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InternationalResponse {
    /// Fields shared with domestic callbacks
    #[serde(flatten)]
    pub transaction: TransactionResult,

    /// 3-D Secure transaction id
    #[serde(rename = "vpc_3DSXID")]
    pub three_ds_xid: String,
    /// Whether the card is enrolled in 3-D Secure
    #[serde(rename = "vpc_3DSenrolled")]
    pub three_ds_enrolled: String,
    /// 3-D Secure authentication status
    #[serde(rename = "vpc_3DSstatus")]
    pub three_ds_status: String,

    /// AVS billing street
    #[serde(rename = "vpc_AVS_Street01")]
    pub avs_street01: String,
    /// AVS billing country
    #[serde(rename = "vpc_AVS_Country")]
    pub avs_country: String,
    /// AVS billing state or province
    #[serde(rename = "vpc_AVS_StateProv")]
    pub avs_state_prov: String,
    /// AVS billing city
    #[serde(rename = "vpc_AVS_City")]
    pub avs_city: String,
    /// AVS billing postcode
    #[serde(rename = "vpc_AVS_PostCode")]
    pub avs_post_code: String,
    /// Address verification result
    #[serde(rename = "vpc_AVSResultCode")]
    pub avs_result_code: String,

    /// Overall fraud risk result
    #[serde(rename = "vpc_RiskOverallResult")]
    pub risk_overall_result: String,
    /// Acquirer receipt number
    #[serde(rename = "vpc_ReceiptNo")]
    pub receipt_no: String,
    /// Acquirer batch number
    #[serde(rename = "vpc_BatchNo")]
    pub batch_no: String,
    /// Card security code check result
    #[serde(rename = "vpc_CSCResultCode")]
    pub csc_result_code: String,
    /// Commercial card indicator
    #[serde(rename = "vpc_CommercialCardIndicator")]
    pub commercial_card_indicator: String,

    /// Cardholder verification type, e.g. `3DS`
    #[serde(rename = "vpc_VerType")]
    pub ver_type: String,
    /// Cardholder verification token
    #[serde(rename = "vpc_VerToken")]
    pub ver_token: String,
    /// Cardholder verification status
    #[serde(rename = "vpc_VerStatus")]
    pub ver_status: String,
    /// Cardholder verification security level
    #[serde(rename = "vpc_VerSecurityLevel")]
    pub ver_security_level: String,
}

impl CallbackResponse for InternationalResponse {
    fn assign(&mut self, key: &str, value: &str) -> Result<()> {
        let slot = match key {
            "vpc_3DSXID" => &mut self.three_ds_xid,
            "vpc_3DSenrolled" => &mut self.three_ds_enrolled,
            "vpc_3DSstatus" => &mut self.three_ds_status,
            "vpc_AVS_Street01" => &mut self.avs_street01,
            "vpc_AVS_Country" => &mut self.avs_country,
            "vpc_AVS_StateProv" => &mut self.avs_state_prov,
            "vpc_AVS_City" => &mut self.avs_city,
            "vpc_AVS_PostCode" => &mut self.avs_post_code,
            "vpc_AVSResultCode" => &mut self.avs_result_code,
            "vpc_RiskOverallResult" => &mut self.risk_overall_result,
            "vpc_ReceiptNo" => &mut self.receipt_no,
            "vpc_BatchNo" => &mut self.batch_no,
            "vpc_CSCResultCode" => &mut self.csc_result_code,
            "vpc_CommercialCardIndicator" => &mut self.commercial_card_indicator,
            "vpc_VerType" => &mut self.ver_type,
            "vpc_VerToken" => &mut self.ver_token,
            "vpc_VerStatus" => &mut self.ver_status,
            "vpc_VerSecurityLevel" => &mut self.ver_security_level,
            _ => {
                self.transaction.assign(key, value)?;
                return Ok(());
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    fn transaction(&self) -> &TransactionResult {
        &self.transaction
    }

    fn transaction_mut(&mut self) -> &mut TransactionResult {
        &mut self.transaction
    }
}
