//! Tests for the status query client

use super::StatusQueryClient;
use crate::crypto::{verify, SignedParams};
use crate::types::{MerchantConfig, QueryDrRequest};
use crate::OnePayError;
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use url::Url;

const QUERY_PATH: &str = "/onecomm-pay/Vpcdps.op";

fn test_config() -> MerchantConfig {
    MerchantConfig::sandbox_domestic("https://shop.example/payment/callback")
}

fn test_request() -> QueryDrRequest {
    QueryDrRequest::new("TXN-42", "op01", "op123456")
}

fn client_for(server: &Server) -> StatusQueryClient {
    let base_url = Url::parse(&server.url()).unwrap();
    StatusQueryClient::with_base_url(test_config(), base_url).unwrap()
}

#[tokio::test]
async fn test_client_creation_uses_https() {
    let client = StatusQueryClient::new(test_config()).unwrap();
    let url = client.request_url(&test_request()).unwrap();

    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("mtf.onepay.vn"));
    assert_eq!(url.path(), QUERY_PATH);
}

#[tokio::test]
async fn test_request_is_signed() {
    let client = StatusQueryClient::new(test_config()).unwrap();
    let url = client.request_url(&test_request()).unwrap();
    let params = SignedParams::from_query(url.query().unwrap());

    assert_eq!(params.get("vpc_Command"), Some("queryDR"));
    assert_eq!(params.get("vpc_Version"), Some("1"));
    assert_eq!(params.get("vpc_MerchTxnRef"), Some("TXN-42"));
    assert_eq!(params.get("vpc_Merchant"), Some("ONEPAY"));
    assert_eq!(params.get("vpc_AccessCode"), Some("D67342C2"));
    assert_eq!(params.get("vpc_User"), Some("op01"));
    assert_eq!(params.get("vpc_Password"), Some("op123456"));
    assert!(params.get("vpc_Amount").is_none());

    let canonical = params.canonicalize().unwrap();
    let signature = params.secure_hash().unwrap();
    assert!(verify(&canonical, &test_config().secure_secret, signature).unwrap());
}

#[tokio::test]
async fn test_query_success() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("vpc_Command".to_string(), "queryDR".to_string()),
            Matcher::UrlEncoded("vpc_MerchTxnRef".to_string(), "TXN-42".to_string()),
            Matcher::Regex("vpc_SecureHash=[0-9A-F]{64}".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "vpc_DRExists": "Y",
                "vpc_TxnResponseCodes": "0"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client.query(&test_request()).await.unwrap();

    assert!(response.exists());
    assert!(response.is_approved());
    assert_eq!(response.response_message().unwrap().en, "Approved");
}

#[tokio::test]
async fn test_query_unknown_transaction() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "vpc_DRExists": "N" }).to_string())
        .create_async()
        .await;

    let response = client_for(&server).query(&test_request()).await.unwrap();
    assert!(!response.exists());
    assert_eq!(response.txn_response_code, None);
}

#[tokio::test]
async fn test_query_http_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let err = client_for(&server)
        .query(&test_request())
        .await
        .unwrap_err();

    match err {
        OnePayError::HttpStatus { status, ref body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_query_malformed_json() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("vpc_DRExists=Y&vpc_TxnResponseCode=0")
        .create_async()
        .await;

    let err = client_for(&server)
        .query(&test_request())
        .await
        .unwrap_err();
    assert!(matches!(err, OnePayError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_query_transport_error() {
    // Nothing listens on the discard port
    let base_url = Url::parse("http://127.0.0.1:9").unwrap();
    let config = test_config().with_query_timeout(Duration::from_secs(2));
    let client = StatusQueryClient::with_base_url(config, base_url).unwrap();

    let err = client.query(&test_request()).await.unwrap_err();
    assert!(matches!(err, OnePayError::Transport(_)));
}

#[tokio::test]
async fn test_empty_reference_is_rejected() {
    let client = StatusQueryClient::new(test_config()).unwrap();
    let err = client
        .query(&QueryDrRequest::new("", "op01", "op123456"))
        .await
        .unwrap_err();
    assert_eq!(err.violations()[0].field, "merch_txn_ref");
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let mut config = test_config();
    config.secure_secret = "nope".to_string();
    assert!(matches!(
        StatusQueryClient::new(config),
        Err(OnePayError::Config(_))
    ));
}

#[test]
fn test_query_from_blocking_caller() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", QUERY_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "vpc_DRExists": "Y", "vpc_TxnResponseCodes": "99" }).to_string())
        .create();

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let response = runtime
        .block_on(client_for(&server).query(&test_request()))
        .unwrap();

    assert!(response.exists());
    assert!(!response.is_approved());
    assert_eq!(response.response_message().unwrap().en, "User cancel");
}
