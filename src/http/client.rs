//! Low-level HTTP client — `StorefrontHttp`.
//!
//! One method per API endpoint, wire types in and out. Unwraps the
//! backend's `{success, message, data}` envelope and passes server error
//! messages through. Mutating endpoints never retry; GETs use the
//! idempotent retry policy.

use std::sync::Arc;
use std::time::Duration;

use async_lock::RwLock;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

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
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::http::StorefrontApi;
use crate::shared::{CartLineId, OrderId, PageQuery, Paginated};

/// Every response body is wrapped in this envelope by the backend.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    #[serde(default)]
    #[allow(dead_code)]
    message: Option<String>,
    data: T,
}

/// Error bodies carry at least a message; everything else is ignored.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn error_message(body_text: &str) -> String {
    serde_json::from_str::<ErrorBody>(body_text)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body_text.to_string())
}

/// Low-level HTTP client for the storefront REST API.
pub struct StorefrontHttp {
    base_url: String,
    client: Client,
    /// Bearer session token. NEVER exposed publicly.
    session_token: Arc<RwLock<Option<String>>>,
}

impl StorefrontHttp {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session_token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, RetryPolicy::Idempotent)
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), RetryPolicy::None)
            .await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::PUT, url, Some(body), RetryPolicy::None)
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::DELETE, url, None::<&()>, RetryPolicy::None)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_request(&method, url, body).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            config.retryable_statuses.contains(&429)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");

        if let Some(token) = self.session_token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let envelope = resp.json::<Envelope<T>>().await?;
            return Ok(envelope.data);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();
        let message = error_message(&body_text);

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(message)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(message)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                message,
            }),
        }
    }
}

#[async_trait]
impl StorefrontApi for StorefrontHttp {
    async fn set_session_token(&self, token: Option<String>) {
        *self.session_token.write().await = token;
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, HttpError> {
        let url = format!("{}/auth/login", self.base_url);
        self.post(&url, request).await
    }

    async fn logout(&self) -> Result<(), HttpError> {
        let url = format!("{}/auth/logout", self.base_url);
        let _: serde_json::Value = self.post(&url, &serde_json::json!({})).await?;
        Ok(())
    }

    async fn profile(&self) -> Result<User, HttpError> {
        let url = format!("{}/profile", self.base_url);
        self.get(&url).await
    }

    // ── Cart ─────────────────────────────────────────────────────────────

    async fn fetch_cart(&self) -> Result<CartResponse, HttpError> {
        let url = format!("{}/cart", self.base_url);
        self.get(&url).await
    }

    async fn add_cart_line(
        &self,
        request: &AddCartLineRequest,
    ) -> Result<CartLineResponse, HttpError> {
        let url = format!("{}/cart", self.base_url);
        self.post(&url, request).await
    }

    async fn update_cart_line(
        &self,
        line_id: &CartLineId,
        request: &UpdateCartLineRequest,
    ) -> Result<CartLineResponse, HttpError> {
        let url = format!("{}/cart/{}", self.base_url, line_id);
        self.put(&url, request).await
    }

    async fn remove_cart_line(&self, line_id: &CartLineId) -> Result<(), HttpError> {
        let url = format!("{}/cart/{}", self.base_url, line_id);
        let _: serde_json::Value = self.delete(&url).await?;
        Ok(())
    }

    // ── Catalog ──────────────────────────────────────────────────────────

    async fn categories(&self) -> Result<Vec<CategoryResponse>, HttpError> {
        let url = format!("{}/categories", self.base_url);
        self.get(&url).await
    }

    async fn products(
        &self,
        query: &ProductQuery,
    ) -> Result<Paginated<ProductResponse>, HttpError> {
        let mut url = format!("{}/products", self.base_url);
        let params = query.to_params();
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        self.get(&url).await
    }

    // ── Addresses ────────────────────────────────────────────────────────

    async fn addresses(&self) -> Result<Vec<AddressResponse>, HttpError> {
        let url = format!("{}/addresses", self.base_url);
        self.get(&url).await
    }

    async fn default_address(&self) -> Result<AddressResponse, HttpError> {
        let url = format!("{}/addresses/default", self.base_url);
        self.get(&url).await
    }

    async fn create_address(&self, request: &NewAddress) -> Result<AddressResponse, HttpError> {
        let url = format!("{}/addresses", self.base_url);
        self.post(&url, request).await
    }

    // ── Orders ───────────────────────────────────────────────────────────

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderResponse, HttpError> {
        let url = format!("{}/orders", self.base_url);
        self.post(&url, request).await
    }

    async fn orders(&self, page: PageQuery) -> Result<Paginated<OrderResponse>, HttpError> {
        let mut url = format!("{}/orders", self.base_url);
        let params = page.to_params();
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        self.get(&url).await
    }

    async fn order(&self, order_id: &OrderId) -> Result<OrderResponse, HttpError> {
        let url = format!("{}/orders/{}", self.base_url, order_id);
        self.get(&url).await
    }

    // ── Payments ─────────────────────────────────────────────────────────

    async fn create_payment_order(
        &self,
        request: &CreatePaymentOrderRequest,
    ) -> Result<PaymentOrder, HttpError> {
        let url = format!("{}/payments/create-order", self.base_url);
        self.post(&url, request).await
    }

    async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<PaymentVerification, HttpError> {
        let url = format!("{}/payments/verify", self.base_url);
        self.post(&url, request).await
    }

    async fn payment_status(&self, order_id: &OrderId) -> Result<PaymentStatus, HttpError> {
        let url = format!("{}/payments/{}/status", self.base_url, order_id);
        self.get(&url).await
    }
}

impl Clone for StorefrontHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            session_token: self.session_token.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_envelope_message() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"Out of stock"}"#),
            "Out of stock"
        );
        assert_eq!(error_message("plain text"), "plain text");
    }

    #[test]
    fn test_envelope_unwraps_data() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"message":"ok","data":[1,2,3]}"#).unwrap();
        assert_eq!(envelope.data, vec![1, 2, 3]);
    }
}
