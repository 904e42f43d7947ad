//! Checkout request types

use super::constants::limits;
use crate::error::FieldViolation;
use serde::{Deserialize, Serialize};

/// Order data supplied by the merchant for one checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Order amount in major units (multiplied by 100 on the wire)
    pub amount: u64,
    /// Order description shown to the shopper
    pub order_info: String,
    /// Merchant transaction reference, unique per attempt
    pub merch_txn_ref: String,
    /// Ticket or session identifier, usually the shopper's IP address
    #[serde(default)]
    pub ticket_no: Option<String>,
    /// Unsigned landing page title
    #[serde(default)]
    pub title: Option<String>,
    /// Unsigned link the landing page offers for paying again
    #[serde(default)]
    pub again_link: Option<String>,
}

impl CheckoutRequest {
    /// Create a new checkout request
    pub fn new(amount: u64, order_info: impl Into<String>, merch_txn_ref: impl Into<String>) -> Self {
        Self {
            amount,
            order_info: order_info.into(),
            merch_txn_ref: merch_txn_ref.into(),
            ticket_no: None,
            title: None,
            again_link: None,
        }
    }

    /// Set the ticket number
    pub fn with_ticket_no(mut self, ticket_no: impl Into<String>) -> Self {
        self.ticket_no = Some(ticket_no.into());
        self
    }

    /// Set the landing page title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the "pay again" link
    pub fn with_again_link(mut self, again_link: impl Into<String>) -> Self {
        self.again_link = Some(again_link.into());
        self
    }

    /// Amount as sent on the wire, in minor units
    ///
    /// Saturates at `u64::MAX`; amounts that large never pass [`violations`](Self::violations).
    pub fn minor_units(&self) -> u64 {
        self.amount
            .saturating_mul(super::constants::defaults::MINOR_UNIT_FACTOR)
    }

    /// Check every field and collect all violations
    ///
    /// Returns an empty vector when the request is valid.
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if self.amount == 0 {
            violations.push(FieldViolation::new("amount", "must be greater than 0"));
        } else if self.amount > limits::MAX_AMOUNT {
            violations.push(FieldViolation::new(
                "amount",
                format!("must be at most {}", limits::MAX_AMOUNT),
            ));
        }

        check_required(&mut violations, "order_info", &self.order_info, limits::ORDER_INFO_MAX);
        check_required(
            &mut violations,
            "merch_txn_ref",
            &self.merch_txn_ref,
            limits::MERCH_TXN_REF_MAX,
        );
        check_optional(&mut violations, "ticket_no", &self.ticket_no, limits::TICKET_NO_MAX);
        check_optional(&mut violations, "title", &self.title, limits::TITLE_MAX);
        check_optional(&mut violations, "again_link", &self.again_link, limits::AGAIN_LINK_MAX);

        violations
    }
}

fn check_required(violations: &mut Vec<FieldViolation>, field: &'static str, value: &str, max: usize) {
    if value.is_empty() {
        violations.push(FieldViolation::new(field, "must not be empty"));
    } else {
        check_length(violations, field, value, max);
    }
}

fn check_optional(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: &Option<String>,
    max: usize,
) {
    if let Some(value) = value {
        check_length(violations, field, value, max);
    }
}

// Limits count characters, not bytes; Vietnamese descriptions are multi-byte.
fn check_length(violations: &mut Vec<FieldViolation>, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        violations.push(FieldViolation::new(
            field,
            format!("must be at most {} characters", max),
        ));
    }
}
