//! Wire types for cart endpoints (REST).

use crate::domain::catalog::wire::ProductResponse;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw cart line from the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineResponse {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub product: ProductResponse,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `GET cart` response: the full line list plus the server-computed total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub items: Vec<CartLineResponse>,
    #[serde(default)]
    pub total: Decimal,
}

/// `POST cart` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartLineRequest {
    pub product_id: String,
    pub quantity: u32,
}

/// `PUT cart/{id}` request body. Quantity must be ≥ 1; zero routes to the
/// delete endpoint instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartLineRequest {
    pub quantity: u32,
}
