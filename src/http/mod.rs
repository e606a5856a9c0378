//! HTTP API layer: the remote-API contract and its reqwest-backed client.

pub mod client;
pub mod retry;

pub use client::StorefrontHttp;
pub use retry::{RetryConfig, RetryPolicy};

use async_trait::async_trait;

use crate::auth::{LoginRequest, LoginResponse, User};
use crate::domain::address::wire::AddressResponse;
use crate::domain::address::NewAddress;
use crate::domain::cart::wire::{
    AddCartLineRequest, CartLineResponse, CartResponse, UpdateCartLineRequest,
};
use crate::domain::catalog::wire::{CategoryResponse, ProductResponse};
use crate::domain::catalog::ProductQuery;
use crate::domain::order::wire::{CreateOrderRequest, OrderResponse};
use crate::domain::payment::{
    CreatePaymentOrderRequest, PaymentOrder, PaymentStatus, PaymentVerification,
    VerifyPaymentRequest,
};
use crate::error::HttpError;
use crate::shared::{CartLineId, OrderId, PageQuery, Paginated};

/// The remote REST API contract, one method per endpoint, wire types in and
/// out.
///
/// [`StorefrontHttp`] is the production implementation. The contract is a
/// trait so the state containers depend on it rather than on a transport;
/// test suites swap in in-memory fakes.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Install or clear the bearer session token used on authenticated
    /// calls.
    async fn set_session_token(&self, token: Option<String>);

    // ── Auth ─────────────────────────────────────────────────────────────
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, HttpError>;
    async fn logout(&self) -> Result<(), HttpError>;
    async fn profile(&self) -> Result<User, HttpError>;

    // ── Cart ─────────────────────────────────────────────────────────────
    async fn fetch_cart(&self) -> Result<CartResponse, HttpError>;
    async fn add_cart_line(
        &self,
        request: &AddCartLineRequest,
    ) -> Result<CartLineResponse, HttpError>;
    async fn update_cart_line(
        &self,
        line_id: &CartLineId,
        request: &UpdateCartLineRequest,
    ) -> Result<CartLineResponse, HttpError>;
    async fn remove_cart_line(&self, line_id: &CartLineId) -> Result<(), HttpError>;

    // ── Catalog ──────────────────────────────────────────────────────────
    async fn categories(&self) -> Result<Vec<CategoryResponse>, HttpError>;
    async fn products(
        &self,
        query: &ProductQuery,
    ) -> Result<Paginated<ProductResponse>, HttpError>;

    // ── Addresses ────────────────────────────────────────────────────────
    async fn addresses(&self) -> Result<Vec<AddressResponse>, HttpError>;
    async fn default_address(&self) -> Result<AddressResponse, HttpError>;
    async fn create_address(&self, request: &NewAddress) -> Result<AddressResponse, HttpError>;

    // ── Orders ───────────────────────────────────────────────────────────
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderResponse, HttpError>;
    async fn orders(&self, page: PageQuery) -> Result<Paginated<OrderResponse>, HttpError>;
    async fn order(&self, order_id: &OrderId) -> Result<OrderResponse, HttpError>;

    // ── Payments ─────────────────────────────────────────────────────────
    async fn create_payment_order(
        &self,
        request: &CreatePaymentOrderRequest,
    ) -> Result<PaymentOrder, HttpError>;
    async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<PaymentVerification, HttpError>;
    async fn payment_status(&self, order_id: &OrderId) -> Result<PaymentStatus, HttpError>;
}
