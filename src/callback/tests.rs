//! Tests for callback verification and decoding

use super::{handle_callback, CallbackVerifier};
use crate::crypto::{HmacSigner, SignedParams};
use crate::types::{DomesticResponse, InternationalResponse};
use crate::OnePayError;

const DOMESTIC_SECRET: &str = "A3EFDFABA8653DF2342E8DAC29B51AF0";
const INTERNATIONAL_SECRET: &str = "6D0870CDE5F24F34F3915FB0045120DB";

const INTERNATIONAL_CALLBACK: &str = "vpc_OrderInfo=1569179952150041000&vpc_3DSECI=02&vpc_AVS_Street01=Tran+Quang+Khai&vpc_Merchant=TESTONEPAY&vpc_Card=MC&vpc_AcqResponseCode=00&AgainLink=https%3A%2F%2Fwww.google.com.vn%2F&vpc_AVS_Country=VN&vpc_AuthorizeId=023209&vpc_3DSenrolled=Y&vpc_ReceiptNo=926519189281&vpc_TransactionNo=011EN9&vpc_AVS_StateProv=Hanoi&vpc_Locale=vn&vpc_TxnResponseCode=0&vpc_VerToken=jHyn%2B7YFi1EUAREAAAAvNUe6Hv8%3D&vpc_Amount=10000000&vpc_BatchNo=2.0190923E7&vpc_Version=2&vpc_AVSResultCode=Y&vpc_VerStatus=M&vpc_Command=pay&vpc_Message=Transaction+Approved&Title=Tran+Duy+Thanh&vpc_3DSstatus=Y&vpc_SecureHash=B233867E915FFC67A2EA71E79E4C7FED44B589FD7AD71DD57ADA5642247EBA50&vpc_CardNum=531358xxxxxxx430&vpc_AVS_PostCode=1234&vpc_CSCResultCode=MATCH&vpc_MerchTxnRef=1569179952150041000&vpc_VerType=3DS&vpc_3DSXID=Io6FdLRj91zPA%2BYZum4s19HrNkU%3D&vpc_AVS_City=North&vpc_CommercialCardIndicator=1";

fn signed_domestic_callback(code: &str, amount: &str) -> SignedParams {
    let mut params = SignedParams::new()
        .with("vpc_Command", "pay")
        .with("vpc_Locale", "vn")
        .with("vpc_CurrencyCode", "VND")
        .with("vpc_MerchTxnRef", "TXN-42")
        .with("vpc_Merchant", "ONEPAY")
        .with("vpc_OrderInfo", "Order 42")
        .with("vpc_Amount", amount)
        .with("vpc_TxnResponseCode", code)
        .with("vpc_TransactionNo", "1618136")
        .with("vpc_Message", "Approved")
        .with("vpc_Version", "2")
        .with("vpc_3Dsenrolled", "N");
    HmacSigner::from_hex(DOMESTIC_SECRET)
        .unwrap()
        .sign_params(&mut params)
        .unwrap();
    params
}

#[test]
fn test_recorded_international_callback_decodes() {
    let params = SignedParams::from_query(INTERNATIONAL_CALLBACK);
    let response: InternationalResponse = handle_callback(&params, INTERNATIONAL_SECRET).unwrap();

    assert_eq!(response.transaction.amount, 100_000);
    assert_eq!(response.transaction.merch_txn_ref, "1569179952150041000");
    assert_eq!(response.transaction.card, "MC");
    assert_eq!(response.transaction.message, "Transaction Approved");
    assert_eq!(response.transaction.title, "Tran Duy Thanh");
    assert_eq!(response.transaction.again_link, "https://www.google.com.vn/");
    assert_eq!(response.transaction.txn_response_message.en, "Approved");
    assert_eq!(
        response.transaction.txn_response_message.vn,
        "Giao dịch thành công"
    );
    assert!(response.transaction.is_approved());

    assert_eq!(response.avs_street01, "Tran Quang Khai");
    assert_eq!(response.avs_city, "North");
    assert_eq!(response.three_ds_xid, "Io6FdLRj91zPA+YZum4s19HrNkU=");
    assert_eq!(response.ver_token, "jHyn+7YFi1EUAREAAAAvNUe6Hv8=");
    assert_eq!(response.batch_no, "2.0190923E7");
    assert_eq!(response.risk_overall_result, "");
}

#[test]
fn test_domestic_callback_decodes() {
    let params = signed_domestic_callback("0", "10000000");
    let response: DomesticResponse = handle_callback(&params, DOMESTIC_SECRET).unwrap();

    assert_eq!(response.transaction.amount, 100_000);
    assert_eq!(response.transaction.transaction_no, "1618136");
    assert_eq!(response.three_ds_enrolled, "N");
    assert_eq!(response.transaction.txn_response_message.en, "Approved");
}

#[test]
fn test_issuer_decline_message() {
    let params = signed_domestic_callback("1", "500000");
    let response: DomesticResponse = handle_callback(&params, DOMESTIC_SECRET).unwrap();

    assert!(!response.transaction.is_approved());
    assert_eq!(response.transaction.amount, 5_000);
    assert!(response
        .transaction
        .txn_response_message
        .en
        .contains("declined by issuer bank"));
}

#[test]
fn test_unknown_code_gets_fallback_message() {
    let params = signed_domestic_callback("77", "100");
    let response: DomesticResponse = handle_callback(&params, DOMESTIC_SECRET).unwrap();
    assert_eq!(
        response.transaction.txn_response_message.en,
        "Unrecognized response code"
    );
}

#[test]
fn test_tampered_amount_is_rejected() {
    let mut params = signed_domestic_callback("0", "10000000");
    params.insert("vpc_Amount", "10000001");

    let result: crate::Result<DomesticResponse> = handle_callback(&params, DOMESTIC_SECRET);
    assert!(matches!(result, Err(OnePayError::Authentication(_))));
}

#[test]
fn test_tampered_unsigned_field_is_accepted() {
    let mut params = signed_domestic_callback("0", "10000000");
    params.insert("Title", "Edited by the browser");

    let response: DomesticResponse = handle_callback(&params, DOMESTIC_SECRET).unwrap();
    assert_eq!(response.transaction.title, "Edited by the browser");
}

#[test]
fn test_wrong_secret_is_rejected() {
    let params = SignedParams::from_query(INTERNATIONAL_CALLBACK);
    let verifier = CallbackVerifier::new(DOMESTIC_SECRET).unwrap();
    assert!(matches!(
        verifier.verify(&params),
        Err(OnePayError::Authentication(_))
    ));
}

#[test]
fn test_missing_signature_is_rejected() {
    let mut params = signed_domestic_callback("0", "100");
    params.remove("vpc_SecureHash");

    let verifier = CallbackVerifier::new(DOMESTIC_SECRET).unwrap();
    let err = verifier.verify(&params).unwrap_err();
    assert!(err.to_string().contains("Missing vpc_SecureHash"));
}

#[test]
fn test_signed_garbage_amount_is_decode_error() {
    let params = signed_domestic_callback("0", "ten thousand");
    let verifier = CallbackVerifier::new(DOMESTIC_SECRET).unwrap();

    let verified = verifier.verify(&params).unwrap();
    let result: crate::Result<DomesticResponse> = verified.decode();
    assert!(matches!(result, Err(OnePayError::Decode(_))));
}

#[test]
fn test_missing_fields_keep_defaults() {
    let mut params = SignedParams::new().with("vpc_TxnResponseCode", "99");
    HmacSigner::from_hex(DOMESTIC_SECRET)
        .unwrap()
        .sign_params(&mut params)
        .unwrap();

    let response: InternationalResponse = handle_callback(&params, DOMESTIC_SECRET).unwrap();
    assert_eq!(response.transaction.amount, 0);
    assert_eq!(response.transaction.merch_txn_ref, "");
    assert_eq!(response.transaction.txn_response_message.en, "User cancel");
}

#[test]
fn test_invalid_secret_is_config_error() {
    assert!(matches!(
        CallbackVerifier::new("zz"),
        Err(OnePayError::Config(_))
    ));
}
