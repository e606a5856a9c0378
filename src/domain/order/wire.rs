//! Wire types for order endpoints (REST).

use super::OrderStatus;
use crate::domain::catalog::wire::ProductResponse;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw order item from the REST API. `price` is the unit price at order
/// time, as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub price: Decimal,
    pub product: ProductResponse,
}

/// Raw order from the REST API. `order_items` is present on detail
/// responses and omitted from listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub delivery_address: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order_items: Option<Vec<OrderItemResponse>>,
}

/// `POST orders` request body. The cart on the server becomes the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub delivery_address: String,
}
