//! Orders sub-client — place from cart, list, track.

use super::wire::CreateOrderRequest;
use super::Order;
use crate::client::StorefrontClient;
use crate::error::SdkError;
use crate::shared::{OrderId, PageQuery, Paginated};

/// Sub-client for order operations.
pub struct Orders<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl Orders<'_> {
    /// Place an order from the server-side cart contents.
    ///
    /// `delivery_address` is the flattened single-line snapshot (see
    /// [`Address::flattened`](crate::domain::address::Address::flattened));
    /// the order keeps it verbatim. Not retried on failure.
    pub async fn place(&self, delivery_address: &str) -> Result<Order, SdkError> {
        if delivery_address.trim().is_empty() {
            return Err(SdkError::Validation(
                "delivery address must not be empty".to_string(),
            ));
        }

        let response = self
            .client
            .api
            .create_order(&CreateOrderRequest {
                delivery_address: delivery_address.to_string(),
            })
            .await?;
        let order = Order::try_from(response).map_err(|e| SdkError::Validation(e.to_string()))?;

        // The backend consumed the cart; resync so the badge empties.
        if let Err(e) = self.client.cart().refresh().await {
            tracing::warn!("cart refresh after order placement failed: {e}");
        }

        Ok(order)
    }

    /// The user's order history, newest first.
    pub async fn list(&self, page: PageQuery) -> Result<Paginated<Order>, SdkError> {
        let response = self.client.api.orders(page).await?;

        let data = response
            .data
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SdkError::Validation(e.to_string()))?;

        Ok(Paginated {
            current_page: response.current_page,
            data,
            last_page: response.last_page,
            per_page: response.per_page,
            total: response.total,
            next_page_url: response.next_page_url,
        })
    }

    /// A single order with its line items, for the tracking screen.
    pub async fn get(&self, order_id: &OrderId) -> Result<Order, SdkError> {
        let response = self.client.api.order(order_id).await?;
        Order::try_from(response).map_err(|e| SdkError::Validation(e.to_string()))
    }
}
