//! Conversion: cart wire types → domain types.

use super::wire;
use super::CartLine;
use crate::domain::catalog::{Product, ValidationError};
use crate::shared::{CartLineId, ProductId};

impl TryFrom<wire::CartLineResponse> for CartLine {
    type Error = ValidationError;

    fn try_from(source: wire::CartLineResponse) -> Result<Self, Self::Error> {
        let product = Product::try_from(source.product)?;
        Ok(CartLine {
            id: CartLineId::from(source.id),
            product_id: ProductId::from(source.product_id),
            quantity: source.quantity,
            product,
        })
    }
}
