//! Catalog sub-client — category tree and product listings.

use std::time::Instant;

use super::{Category, Product, ProductQuery};
use crate::client::StorefrontClient;
use crate::error::SdkError;
use crate::shared::Paginated;

/// Sub-client for catalog reads. Public data — no session required.
pub struct Catalog<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl Catalog<'_> {
    /// The full three-level category tree. Served from a TTL cache; the
    /// tree changes rarely and every screen needs it.
    pub async fn categories(&self) -> Result<Vec<Category>, SdkError> {
        {
            let cache = self.client.category_cache.read().await;
            if let Some((tree, fetched_at)) = cache.as_ref() {
                if fetched_at.elapsed() < self.client.category_cache_ttl {
                    return Ok(tree.clone());
                }
            }
        }

        let response = self.client.api.categories().await?;
        let tree: Vec<Category> = response.into_iter().map(Category::from).collect();

        *self.client.category_cache.write().await = Some((tree.clone(), Instant::now()));
        Ok(tree)
    }

    /// Drop the cached tree so the next call refetches.
    pub async fn invalidate_categories(&self) {
        *self.client.category_cache.write().await = None;
    }

    /// Product listing with filters and pagination.
    pub async fn products(&self, query: &ProductQuery) -> Result<Paginated<Product>, SdkError> {
        let page = self.client.api.products(query).await?;

        let data = page
            .data
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SdkError::Validation(e.to_string()))?;

        Ok(Paginated {
            current_page: page.current_page,
            data,
            last_page: page.last_page,
            per_page: page.per_page,
            total: page.total,
            next_page_url: page.next_page_url,
        })
    }

    /// Free-text product search.
    pub async fn search(&self, term: &str) -> Result<Paginated<Product>, SdkError> {
        self.products(&ProductQuery::search(term)).await
    }
}
