//! Payment domain — gateway order creation and verification.
//!
//! Wraps the backend's payment endpoints. The gateway's own UI runs in the
//! embedding app; this module covers everything before and after it:
//! creating the gateway order, verifying the signed result, and polling
//! status. A user abandoning the gateway flow is modeled as
//! [`PaymentError::Cancelled`](crate::error::PaymentError::Cancelled) and is
//! non-fatal — the order stays created and payable later.

pub mod client;

use crate::shared::OrderId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the user pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay now through the gateway.
    Online,
    /// Cash on delivery — no gateway round-trip.
    Cod,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Cod => "cod",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `POST payments/create-order` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentOrderRequest {
    pub order_id: OrderId,
    pub payment_method: PaymentMethod,
}

/// Gateway order descriptor the app hands to the gateway SDK.
///
/// `amount` is in currency minor units (paise); `amount_display` is the
/// human-readable figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub order_id: OrderId,
    pub payment_id: String,
    pub gateway_order_id: String,
    pub key_id: String,
    pub amount: u64,
    pub amount_display: Decimal,
    pub currency: String,
}

/// `POST payments/verify` request body: the signed result returned by the
/// gateway after a completed payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
}

/// `POST payments/verify` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub payment_id: String,
    pub status: String,
    pub order_id: OrderId,
}

/// `GET payments/{order}/status` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub status: String,
    pub payment_method: PaymentMethod,
}
