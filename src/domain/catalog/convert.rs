//! Conversion: catalog wire types → domain types.

use super::wire;
use super::{Category, Product, SubSubcategory, Subcategory};
use crate::shared::{CategoryId, ProductId};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("product {id} has a negative price")]
    NegativePrice { id: String },
}

impl TryFrom<wire::ProductResponse> for Product {
    type Error = ValidationError;

    fn try_from(source: wire::ProductResponse) -> Result<Self, Self::Error> {
        if source.price.is_sign_negative() {
            return Err(ValidationError::NegativePrice { id: source.id });
        }
        Ok(Product {
            id: ProductId::from(source.id),
            sub_category_id: CategoryId::from(source.sub_category_id),
            name: source.name,
            description: source.description,
            price: source.price,
            stock_quantity: source.stock_quantity,
            image_url: source.image_url,
        })
    }
}

/// The category endpoint returns the full tree in one response; levels below
/// the third are not part of the data model and are dropped if they ever
/// appear.
impl From<wire::CategoryResponse> for Category {
    fn from(source: wire::CategoryResponse) -> Self {
        Category {
            id: CategoryId::from(source.id),
            name: source.name,
            description: source.description,
            subcategories: source
                .subcategories
                .into_iter()
                .map(Subcategory::from)
                .collect(),
        }
    }
}

impl From<wire::CategoryResponse> for Subcategory {
    fn from(source: wire::CategoryResponse) -> Self {
        Subcategory {
            id: CategoryId::from(source.id),
            name: source.name,
            description: source.description,
            subcategories: source
                .subcategories
                .into_iter()
                .map(SubSubcategory::from)
                .collect(),
        }
    }
}

impl From<wire::CategoryResponse> for SubSubcategory {
    fn from(source: wire::CategoryResponse) -> Self {
        SubSubcategory {
            id: CategoryId::from(source.id),
            name: source.name,
            description: source.description,
        }
    }
}
