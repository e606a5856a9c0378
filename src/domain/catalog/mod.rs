//! Catalog domain — the three-level category tree and products.
//!
//! Categories nest exactly three levels deep: category → subcategory →
//! sub-subcategory. Products attach at the leaf level; that is the level
//! product listings are filtered by.

pub mod client;
mod convert;
pub mod wire;

pub use convert::ValidationError;

use crate::shared::{CategoryId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Category tree ───────────────────────────────────────────────────────────

/// Leaf level of the category tree. Products are filtered at this level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubSubcategory {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

/// Middle level, e.g. "Fruits & Vegetables".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subcategory {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub subcategories: Vec<SubSubcategory>,
}

/// Top level, e.g. "Grocery & Kitchen".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub subcategories: Vec<Subcategory>,
}

// ─── Product ─────────────────────────────────────────────────────────────────

/// A catalog product. Remote-owned; read-only to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub sub_category_id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    /// Unit price as the backend reports it.
    pub price: Decimal,
    pub stock_quantity: u32,
    pub image_url: Option<String>,
}

impl Product {
    /// A product with zero stock is unorderable.
    pub fn is_orderable(&self) -> bool {
        self.stock_quantity > 0
    }
}

// ─── Product listing query ───────────────────────────────────────────────────

/// Filters for the product listing endpoint. All fields optional; filters
/// combine server-side.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub sub_category_id: Option<CategoryId>,
    pub sub_sub_category_id: Option<CategoryId>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProductQuery {
    pub fn by_sub_category(id: CategoryId) -> Self {
        Self {
            sub_category_id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_sub_sub_category(id: CategoryId) -> Self {
        Self {
            sub_sub_category_id: Some(id),
            ..Self::default()
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Render as query-string pairs. Search terms are percent-encoded.
    pub(crate) fn to_params(&self) -> Vec<String> {
        let mut params = Vec::new();
        if let Some(id) = &self.sub_category_id {
            params.push(format!("sub_category_id={}", id));
        }
        if let Some(id) = &self.sub_sub_category_id {
            params.push(format!("sub_sub_category_id={}", id));
        }
        if let Some(term) = &self.search {
            params.push(format!("search={}", urlencoding::encode(term)));
        }
        if let Some(p) = self.page {
            params.push(format!("page={}", p));
        }
        if let Some(pp) = self.per_page {
            params.push(format!("per_page={}", pp));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId::from("p1"),
            sub_category_id: CategoryId::from("c1"),
            name: "Fresh Bananas".to_string(),
            description: None,
            price: dec!(45),
            stock_quantity: stock,
            image_url: None,
        }
    }

    #[test]
    fn test_zero_stock_is_unorderable() {
        assert!(product(3).is_orderable());
        assert!(!product(0).is_orderable());
    }

    #[test]
    fn test_query_params_encode_search() {
        let params = ProductQuery::search("brown eggs").per_page(20).to_params();
        assert_eq!(params, vec!["search=brown%20eggs", "per_page=20"]);
    }
}
