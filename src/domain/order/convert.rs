//! Conversion: order wire types → domain types.

use super::wire;
use super::{Order, OrderItem};
use crate::domain::catalog::{Product, ValidationError};
use crate::shared::{OrderId, ProductId};

impl TryFrom<wire::OrderItemResponse> for OrderItem {
    type Error = ValidationError;

    fn try_from(source: wire::OrderItemResponse) -> Result<Self, Self::Error> {
        let product = Product::try_from(source.product)?;
        Ok(OrderItem {
            product_id: ProductId::from(source.product_id),
            quantity: source.quantity,
            price: source.price,
            product,
        })
    }
}

impl TryFrom<wire::OrderResponse> for Order {
    type Error = ValidationError;

    fn try_from(source: wire::OrderResponse) -> Result<Self, Self::Error> {
        let items = source
            .order_items
            .unwrap_or_default()
            .into_iter()
            .map(OrderItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Order {
            id: OrderId::from(source.id),
            status: source.status,
            total_amount: source.total_amount,
            delivery_address: source.delivery_address,
            created_at: source.created_at,
            items,
        })
    }
}
