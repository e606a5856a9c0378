//! Payments sub-client — gateway order creation, verification, status.

use super::{
    CreatePaymentOrderRequest, PaymentMethod, PaymentOrder, PaymentStatus, PaymentVerification,
    VerifyPaymentRequest,
};
use crate::client::StorefrontClient;
use crate::error::SdkError;
use crate::shared::OrderId;

/// Sub-client for payment operations.
///
/// The gateway's own checkout UI runs in the embedding app. If the user
/// abandons it, report [`PaymentError::Cancelled`](crate::error::PaymentError::Cancelled)
/// upward and leave the order alone — it stays payable.
pub struct Payments<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl Payments<'_> {
    /// Create a gateway order for a placed order. For `Cod` the backend
    /// records the method and no gateway round-trip happens.
    pub async fn create_order(
        &self,
        order_id: &OrderId,
        method: PaymentMethod,
    ) -> Result<PaymentOrder, SdkError> {
        let response = self
            .client
            .api
            .create_payment_order(&CreatePaymentOrderRequest {
                order_id: order_id.clone(),
                payment_method: method,
            })
            .await?;
        Ok(response)
    }

    /// Verify the signed result the gateway handed back after payment.
    pub async fn verify(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<PaymentVerification, SdkError> {
        let verification = self.client.api.verify_payment(request).await?;
        Ok(verification)
    }

    /// Current payment status for an order.
    pub async fn status(&self, order_id: &OrderId) -> Result<PaymentStatus, SdkError> {
        let status = self.client.api.payment_status(order_id).await?;
        Ok(status)
    }
}
