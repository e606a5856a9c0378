//! Order domain — placed orders and their delivery lifecycle.
//!
//! The client only ever *reads* order status to drive a progress indicator;
//! all transitions happen server-side.

pub mod client;
mod convert;
pub mod wire;

use crate::domain::catalog::Product;
use crate::shared::{OrderId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Delivery lifecycle: `placed → confirmed → preparing → out_for_delivery →
/// delivered`, with `cancelled` reachable from any point.
///
/// Status values this SDK version does not know about deserialize as
/// [`Unknown`](Self::Unknown) and render as the earliest step rather than
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// 0-based position on the linear progress track. `Cancelled` is a side
    /// branch, not a step; it reports the earliest position and
    /// [`is_cancelled`](Self::is_cancelled) distinguishes it.
    pub fn progress_step(&self) -> usize {
        match self {
            Self::Placed | Self::Cancelled | Self::Unknown => 0,
            Self::Confirmed => 1,
            Self::Preparing => 2,
            Self::OutForDelivery => 3,
            Self::Delivered => 4,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Placed => "placed",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// A line item captured at order time: product snapshot, quantity, and the
/// price the product had when the order was placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
    pub product: Product,
}

/// A placed order. The delivery address is a flattened string snapshot, not
/// a reference to a saved address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub delivery_address: String,
    pub created_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_degrades_to_earliest_step() {
        let status: OrderStatus = serde_json::from_str("\"drone_dispatched\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
        assert_eq!(status.progress_step(), 0);
    }

    #[test]
    fn test_known_statuses_deserialize() {
        let status: OrderStatus = serde_json::from_str("\"out_for_delivery\"").unwrap();
        assert_eq!(status, OrderStatus::OutForDelivery);
        assert_eq!(status.progress_step(), 3);
    }

    #[test]
    fn test_cancelled_is_side_branch() {
        assert!(OrderStatus::Cancelled.is_cancelled());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert_eq!(OrderStatus::Cancelled.progress_step(), 0);
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }
}
