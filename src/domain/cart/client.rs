//! Cart sub-client — the single writer of the cart projection.
//!
//! Every mutation is add/update/remove at the backend followed by a full
//! refetch; the local snapshot is replaced only by a successful fetch. A
//! failed mutation or refetch leaves the last-known-good snapshot visible
//! and surfaces the error to the caller. No automatic retry on any write.

use rust_decimal::Decimal;

use super::wire::{AddCartLineRequest, UpdateCartLineRequest};
use super::CartLine;
use crate::client::StorefrontClient;
use crate::error::SdkError;
use crate::shared::{CartLineId, ProductId};

/// Sub-client for cart operations.
pub struct Cart<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl Cart<'_> {
    // ── Mutations ────────────────────────────────────────────────────────

    /// Add a product to the cart.
    ///
    /// Requires a session: fails with `NotAuthenticated` before any network
    /// call, leaving the snapshot untouched (callers prompt for login).
    pub async fn add(&self, product_id: &ProductId, quantity: u32) -> Result<(), SdkError> {
        self.client.require_session().await?;
        if quantity == 0 {
            return Err(SdkError::Validation(
                "add quantity must be at least 1".to_string(),
            ));
        }

        let _guard = self.client.cart_mutation.lock().await;
        self.client
            .api
            .add_cart_line(&AddCartLineRequest {
                product_id: product_id.to_string(),
                quantity,
            })
            .await?;
        self.refetch().await
    }

    /// Set a line's quantity. Zero or negative routes to removal — a
    /// zero-quantity line is not a valid server representation.
    pub async fn set_quantity(&self, line_id: &CartLineId, quantity: i64) -> Result<(), SdkError> {
        self.client.require_session().await?;

        let _guard = self.client.cart_mutation.lock().await;
        self.mark_busy(Some(line_id.clone())).await;
        let result = self.mutate_line(line_id, quantity).await;
        self.mark_busy(None).await;
        result
    }

    /// Remove a line outright.
    pub async fn remove(&self, line_id: &CartLineId) -> Result<(), SdkError> {
        self.set_quantity(line_id, 0).await
    }

    async fn mutate_line(&self, line_id: &CartLineId, quantity: i64) -> Result<(), SdkError> {
        if quantity <= 0 {
            self.client.api.remove_cart_line(line_id).await?;
        } else {
            self.client
                .api
                .update_cart_line(
                    line_id,
                    &UpdateCartLineRequest {
                        quantity: quantity as u32,
                    },
                )
                .await?;
        }
        self.refetch().await
    }

    /// Re-fetch the cart from the backend.
    ///
    /// No-op while logged out. The snapshot is swapped only after a
    /// successful fetch and conversion; on failure the previous snapshot
    /// stays visible and the error propagates.
    pub async fn refresh(&self) -> Result<(), SdkError> {
        if self.client.session.read().await.is_none() {
            return Ok(());
        }
        self.refetch().await
    }

    async fn refetch(&self) -> Result<(), SdkError> {
        let response = self.client.api.fetch_cart().await?;

        let lines = response
            .items
            .into_iter()
            .map(CartLine::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SdkError::Validation(e.to_string()))?;

        self.client
            .cart_state
            .write()
            .await
            .apply(lines, response.total);
        Ok(())
    }

    /// Drop the local snapshot. Called on logout so no cart leaks across
    /// accounts on the same device.
    pub(crate) async fn clear_local(&self) {
        self.client.cart_state.write().await.clear();
        self.mark_busy(None).await;
    }

    // ── Snapshot reads ───────────────────────────────────────────────────

    /// Badge count: sum of line quantities, not the number of lines.
    pub async fn count(&self) -> u32 {
        self.client.cart_state.read().await.count()
    }

    /// The server-computed total. Authoritative for checkout.
    pub async fn total(&self) -> Decimal {
        self.client.cart_state.read().await.total()
    }

    pub async fn lines(&self) -> Vec<CartLine> {
        self.client.cart_state.read().await.lines().to_vec()
    }

    pub async fn is_empty(&self) -> bool {
        self.client.cart_state.read().await.is_empty()
    }

    /// Quantity of a product in the cart, 0 when absent.
    pub async fn item_quantity(&self, product_id: &ProductId) -> u32 {
        self.client.cart_state.read().await.item_quantity(product_id)
    }

    pub async fn line_for_product(&self, product_id: &ProductId) -> Option<CartLine> {
        self.client
            .cart_state
            .read()
            .await
            .line_for_product(product_id)
            .cloned()
    }

    // ── Per-line busy marker ─────────────────────────────────────────────

    /// The line a mutation is currently in flight for, if any. UIs disable
    /// the stepper for exactly this line, not the whole cart.
    pub async fn busy_line(&self) -> Option<CartLineId> {
        self.client.cart_busy.read().await.clone()
    }

    pub async fn is_line_busy(&self, line_id: &CartLineId) -> bool {
        self.client.cart_busy.read().await.as_ref() == Some(line_id)
    }

    async fn mark_busy(&self, line: Option<CartLineId>) {
        *self.client.cart_busy.write().await = line;
    }
}
