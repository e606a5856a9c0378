//! Cart domain — the authoritative view of the remote cart.
//!
//! The server owns the cart; this module owns the client-side projection of
//! it. Every mutation round-trips through the backend and is followed by a
//! full refetch, so the projection never shows an optimistic guess.

pub mod client;
mod convert;
pub mod state;
pub mod wire;

pub use state::CartState;

use crate::domain::catalog::Product;
use crate::shared::{CartLineId, ProductId};
use serde::{Deserialize, Serialize};

/// One product-and-quantity entry in the user's cart.
///
/// Carries a denormalized product snapshot for display. Quantity is at least
/// 1 while the line exists; a line driven to zero is deleted server-side,
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub product: Product,
}

impl CartLine {
    /// Line subtotal: unit price × quantity. Display-only; the server total
    /// stays authoritative for checkout.
    pub fn line_total(&self) -> rust_decimal::Decimal {
        self.product.price * rust_decimal::Decimal::from(self.quantity)
    }
}
