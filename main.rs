//! OnePay Demo Server
//!
//! A small merchant site showing the full checkout round trip against the OnePay
//! sandbox: redirect the shopper to the gateway, then verify and decode the
//! callback the gateway sends back.

use axum::{
    extract::{ConnectInfo, Query, RawQuery, State},
    http::StatusCode,
    response::{Json, Redirect},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use rust_onepay::{
    limits, CheckoutRequest, DomesticResponse, InternationalResponse, OnePay, OnePayError,
    PaymentKind, SignedParams,
};

/// Both sandbox integrations, shared across handlers
#[derive(Debug)]
struct AppState {
    domestic: OnePay,
    international: OnePay,
}

impl AppState {
    fn gateway(&self, kind: PaymentKind) -> &OnePay {
        match kind {
            PaymentKind::Domestic => &self.domestic,
            PaymentKind::International => &self.international,
        }
    }
}

type SharedState = Arc<AppState>;

/// Order details accepted on the checkout routes
#[derive(Debug, Deserialize)]
struct CheckoutQuery {
    #[serde(default = "default_amount")]
    amount: u64,
    #[serde(default)]
    order_info: Option<String>,
}

fn default_amount() -> u64 {
    100_000
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let public_url = env::var("PUBLIC_URL").unwrap_or_else(|_| format!("http://{}", bind_address));
    let public_url = public_url.trim_end_matches('/');

    let state = Arc::new(AppState {
        domestic: OnePay::sandbox_domestic(format!("{}/payment/callback/domestic", public_url))?,
        international: OnePay::sandbox_international(format!(
            "{}/payment/callback/international",
            public_url
        ))?,
    });

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/payment/checkout/domestic", get(domestic_checkout_handler))
        .route(
            "/payment/checkout/international",
            get(international_checkout_handler),
        )
        .route("/payment/callback/domestic", get(domestic_callback_handler))
        .route(
            "/payment/callback/international",
            get(international_callback_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("OnePay demo server running on http://{}", bind_address);
    println!("Available endpoints:");
    println!("   GET /payment/checkout/domestic?amount=100000 - Pay with a domestic card");
    println!("   GET /payment/checkout/international?amount=100000 - Pay with an international card");
    println!("   GET /payment/callback/{{domestic,international}} - Gateway return URLs");
    println!("   GET / - Service info");
    println!("\nEnvironment variables:");
    println!("   BIND_ADDRESS - Server bind address (default: 0.0.0.0:3000)");
    println!("   PUBLIC_URL - Base URL the gateway redirects back to (default: http://BIND_ADDRESS)");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Service info
async fn index_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": rust_onepay::VERSION,
        "gateways": {
            "domestic": state.domestic.config().merchant,
            "international": state.international.config().merchant,
        },
    }))
}

async fn domestic_checkout_handler(
    State(state): State<SharedState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Query(query): Query<CheckoutQuery>,
) -> std::result::Result<Redirect, (StatusCode, Json<serde_json::Value>)> {
    checkout(&state, PaymentKind::Domestic, peer.ip(), query)
}

async fn international_checkout_handler(
    State(state): State<SharedState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Query(query): Query<CheckoutQuery>,
) -> std::result::Result<Redirect, (StatusCode, Json<serde_json::Value>)> {
    checkout(&state, PaymentKind::International, peer.ip(), query)
}

/// The shopper's address as sent in `vpc_TicketNo`
///
/// IPv4-mapped peers are shown as plain IPv4. Addresses longer than the field
/// allows are left out.
fn ticket_no(peer: IpAddr) -> Option<String> {
    let ip = match peer {
        IpAddr::V6(v6) => v6
            .to_ipv4_mapped()
            .map(IpAddr::V4)
            .unwrap_or(IpAddr::V6(v6)),
        v4 => v4,
    };
    let ticket = ip.to_string();
    (ticket.chars().count() <= limits::TICKET_NO_MAX).then_some(ticket)
}

/// Sign a fresh order and send the shopper to the gateway
fn checkout(
    state: &AppState,
    kind: PaymentKind,
    peer: IpAddr,
    query: CheckoutQuery,
) -> std::result::Result<Redirect, (StatusCode, Json<serde_json::Value>)> {
    let merch_txn_ref = chrono::Utc::now().format("%Y%m%d%H%M%S%f").to_string();
    let order_info = query
        .order_info
        .unwrap_or_else(|| format!("Order {}", merch_txn_ref));
    let mut request = CheckoutRequest::new(query.amount, order_info, merch_txn_ref);
    if let Some(ticket) = ticket_no(peer) {
        request = request.with_ticket_no(ticket);
    }

    let url = state
        .gateway(kind)
        .build_checkout_url(&request)
        .map_err(error_response)?;
    Ok(Redirect::to(url.as_str()))
}

async fn domestic_callback_handler(
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
) -> std::result::Result<Json<DomesticResponse>, (StatusCode, Json<serde_json::Value>)> {
    let params = SignedParams::from_query(query.as_deref().unwrap_or_default());
    let response = state
        .domestic
        .handle_domestic_callback(&params)
        .map_err(error_response)?;
    Ok(Json(response))
}

async fn international_callback_handler(
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
) -> std::result::Result<Json<InternationalResponse>, (StatusCode, Json<serde_json::Value>)> {
    let params = SignedParams::from_query(query.as_deref().unwrap_or_default());
    let response = state
        .international
        .handle_international_callback(&params)
        .map_err(error_response)?;
    Ok(Json(response))
}

/// Map a library error onto an HTTP error response
fn error_response(err: OnePayError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &err {
        OnePayError::Validation(_)
        | OnePayError::Authentication(_)
        | OnePayError::Decode(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!(%status, "Request rejected: {}", err);
    (
        status,
        Json(serde_json::json!({
            "error": err.to_string(),
            "violations": err
                .violations()
                .iter()
                .map(|v| serde_json::json!({ "field": v.field, "message": v.message }))
                .collect::<Vec<_>>(),
        })),
    )
}
