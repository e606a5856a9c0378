//! End-to-end tests for the auth + cart synchronization protocol, run
//! against in-memory fakes of the backend and the OTP provider.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kirana_sdk::auth::{LoginRequest, LoginResponse, User};
use kirana_sdk::domain::address::wire::AddressResponse;
use kirana_sdk::domain::address::NewAddress;
use kirana_sdk::domain::cart::wire::{
    AddCartLineRequest, CartLineResponse, CartResponse, UpdateCartLineRequest,
};
use kirana_sdk::domain::catalog::wire::{CategoryResponse, ProductResponse};
use kirana_sdk::domain::catalog::ProductQuery;
use kirana_sdk::domain::order::wire::{CreateOrderRequest, OrderResponse};
use kirana_sdk::domain::payment::{
    CreatePaymentOrderRequest, PaymentOrder, PaymentStatus, PaymentVerification,
    VerifyPaymentRequest,
};
use kirana_sdk::error::{AuthError, HttpError, OtpError, SdkError};
use kirana_sdk::http::StorefrontApi;
use kirana_sdk::otp::{IdentityProvider, IdentityToken, OtpChallenge};
use kirana_sdk::prelude::{
    CartLineId, MemorySessionStore, PageQuery, Paginated, ProductId, SessionStore,
    StorefrontClient, StoredSession,
};
use kirana_sdk::shared::OrderId;

// ─── Fake backend ────────────────────────────────────────────────────────────

#[derive(Clone)]
struct FakeLine {
    id: String,
    product_id: String,
    quantity: u32,
    price: Decimal,
}

#[derive(Default)]
struct FakeState {
    token: Option<String>,
    lines: Vec<FakeLine>,
    next_line_id: u32,
    fail_next_fetch: bool,
    fail_logout: bool,
    fetch_calls: u32,
    add_calls: u32,
    update_calls: u32,
    remove_calls: u32,
}

#[derive(Default)]
struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    fn price_for(product_id: &str) -> Decimal {
        match product_id {
            "p_bananas" => dec!(45),
            "p_milk" => dec!(65),
            _ => dec!(10),
        }
    }

    fn product_response(product_id: &str, price: Decimal) -> ProductResponse {
        ProductResponse {
            id: product_id.to_string(),
            sub_category_id: "c_fruit".to_string(),
            name: format!("product {product_id}"),
            description: None,
            price,
            stock_quantity: 50,
            image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn line_response(line: &FakeLine) -> CartLineResponse {
        CartLineResponse {
            id: line.id.clone(),
            user_id: "1".to_string(),
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            product: Self::product_response(&line.product_id, line.price),
            created_at: None,
            updated_at: None,
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    fn set_fail_next_fetch(&self) {
        self.with_state(|s| s.fail_next_fetch = true);
    }

    fn fetch_calls(&self) -> u32 {
        self.with_state(|s| s.fetch_calls)
    }

    fn counters(&self) -> (u32, u32, u32) {
        self.with_state(|s| (s.add_calls, s.update_calls, s.remove_calls))
    }
}

fn authed(state: &FakeState) -> Result<(), HttpError> {
    if state.token.is_some() {
        Ok(())
    } else {
        Err(HttpError::Unauthorized)
    }
}

#[async_trait]
impl StorefrontApi for FakeApi {
    async fn set_session_token(&self, token: Option<String>) {
        self.with_state(|s| s.token = token);
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, HttpError> {
        if request.token != "id_tok_valid" {
            return Err(HttpError::BadRequest("unknown identity token".to_string()));
        }
        Ok(LoginResponse {
            user: User {
                id: 1,
                name: "Asha".to_string(),
                phone: "+919876543210".to_string(),
                role: "customer".to_string(),
            },
            token: "sess_tok_1".to_string(),
        })
    }

    async fn logout(&self) -> Result<(), HttpError> {
        self.with_state(|s| {
            if s.fail_logout {
                Err(HttpError::ServerError {
                    status: 500,
                    message: "revoke failed".to_string(),
                })
            } else {
                Ok(())
            }
        })
    }

    async fn profile(&self) -> Result<User, HttpError> {
        self.with_state(|s| {
            authed(s)?;
            Ok(User {
                id: 1,
                name: "Asha".to_string(),
                phone: "+919876543210".to_string(),
                role: "customer".to_string(),
            })
        })
    }

    async fn fetch_cart(&self) -> Result<CartResponse, HttpError> {
        self.with_state(|s| {
            authed(s)?;
            s.fetch_calls += 1;
            if s.fail_next_fetch {
                s.fail_next_fetch = false;
                return Err(HttpError::ServerError {
                    status: 503,
                    message: "temporarily unavailable".to_string(),
                });
            }
            let total: Decimal = s
                .lines
                .iter()
                .map(|l| l.price * Decimal::from(l.quantity))
                .sum();
            Ok(CartResponse {
                items: s.lines.iter().map(FakeApi::line_response).collect(),
                total,
            })
        })
    }

    async fn add_cart_line(
        &self,
        request: &AddCartLineRequest,
    ) -> Result<CartLineResponse, HttpError> {
        self.with_state(|s| {
            authed(s)?;
            s.add_calls += 1;
            if let Some(line) = s
                .lines
                .iter_mut()
                .find(|l| l.product_id == request.product_id)
            {
                line.quantity += request.quantity;
                let line = line.clone();
                return Ok(FakeApi::line_response(&line));
            }
            s.next_line_id += 1;
            let line = FakeLine {
                id: format!("line_{}", s.next_line_id),
                product_id: request.product_id.clone(),
                quantity: request.quantity,
                price: FakeApi::price_for(&request.product_id),
            };
            s.lines.push(line.clone());
            Ok(FakeApi::line_response(&line))
        })
    }

    async fn update_cart_line(
        &self,
        line_id: &CartLineId,
        request: &UpdateCartLineRequest,
    ) -> Result<CartLineResponse, HttpError> {
        self.with_state(|s| {
            authed(s)?;
            s.update_calls += 1;
            let line = s
                .lines
                .iter_mut()
                .find(|l| l.id == line_id.as_str())
                .ok_or_else(|| HttpError::NotFound("no such line".to_string()))?;
            line.quantity = request.quantity;
            let line = line.clone();
            Ok(FakeApi::line_response(&line))
        })
    }

    async fn remove_cart_line(&self, line_id: &CartLineId) -> Result<(), HttpError> {
        self.with_state(|s| {
            authed(s)?;
            s.remove_calls += 1;
            let before = s.lines.len();
            s.lines.retain(|l| l.id != line_id.as_str());
            if s.lines.len() == before {
                return Err(HttpError::NotFound("no such line".to_string()));
            }
            Ok(())
        })
    }

    async fn categories(&self) -> Result<Vec<CategoryResponse>, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn products(
        &self,
        _query: &ProductQuery,
    ) -> Result<Paginated<ProductResponse>, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn addresses(&self) -> Result<Vec<AddressResponse>, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn default_address(&self) -> Result<AddressResponse, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn create_address(&self, _request: &NewAddress) -> Result<AddressResponse, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderResponse, HttpError> {
        self.with_state(|s| {
            authed(s)?;
            if s.lines.is_empty() {
                return Err(HttpError::BadRequest("cart is empty".to_string()));
            }
            let total: Decimal = s
                .lines
                .iter()
                .map(|l| l.price * Decimal::from(l.quantity))
                .sum();
            let items = s
                .lines
                .iter()
                .map(|l| kirana_sdk::domain::order::wire::OrderItemResponse {
                    id: format!("oi_{}", l.id),
                    order_id: "order_1".to_string(),
                    product_id: l.product_id.clone(),
                    quantity: l.quantity,
                    price: l.price,
                    product: FakeApi::product_response(&l.product_id, l.price),
                })
                .collect();
            s.lines.clear();
            Ok(OrderResponse {
                id: "order_1".to_string(),
                user_id: "1".to_string(),
                status: kirana_sdk::domain::order::OrderStatus::Placed,
                total_amount: total,
                delivery_address: request.delivery_address.clone(),
                created_at: None,
                updated_at: None,
                order_items: Some(items),
            })
        })
    }

    async fn orders(&self, _page: PageQuery) -> Result<Paginated<OrderResponse>, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn order(&self, _order_id: &OrderId) -> Result<OrderResponse, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn create_payment_order(
        &self,
        _request: &CreatePaymentOrderRequest,
    ) -> Result<PaymentOrder, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn verify_payment(
        &self,
        _request: &VerifyPaymentRequest,
    ) -> Result<PaymentVerification, HttpError> {
        unimplemented!("not used by these tests")
    }

    async fn payment_status(&self, _order_id: &OrderId) -> Result<PaymentStatus, HttpError> {
        unimplemented!("not used by these tests")
    }
}

// ─── Fake identity provider ──────────────────────────────────────────────────

struct FakeProvider;

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn challenge(&self, phone_e164: &str) -> Result<OtpChallenge, OtpError> {
        Ok(OtpChallenge {
            verification_id: "verif_1".to_string(),
            phone_e164: phone_e164.to_string(),
        })
    }

    async fn confirm(
        &self,
        _challenge: &OtpChallenge,
        code: &str,
    ) -> Result<IdentityToken, OtpError> {
        if code == "123456" {
            Ok(IdentityToken::new("id_tok_valid"))
        } else {
            Err(OtpError::InvalidCode)
        }
    }

    async fn revoke(&self) -> Result<(), OtpError> {
        Ok(())
    }
}

// ─── Harness ─────────────────────────────────────────────────────────────────

struct Harness {
    client: StorefrontClient,
    api: Arc<FakeApi>,
    store: Arc<MemorySessionStore>,
}

fn harness() -> Harness {
    let api = Arc::new(FakeApi::default());
    let store = Arc::new(MemorySessionStore::new());
    let client = StorefrontClient::builder()
        .api(api.clone())
        .identity_provider(Arc::new(FakeProvider))
        .session_store(store.clone())
        .build()
        .unwrap();
    Harness { client, api, store }
}

async fn login(harness: &Harness) {
    harness.client.auth().send_otp("9876543210").await.unwrap();
    harness
        .client
        .auth()
        .verify_and_login("123456")
        .await
        .unwrap();
}

// ─── Auth flow ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn invalid_phone_rejected_before_provider() {
    let h = harness();
    for phone in ["98765", "98765432101", "98765abc10"] {
        let err = h.client.auth().send_otp(phone).await.unwrap_err();
        assert!(matches!(err, SdkError::Auth(AuthError::InvalidPhone(_))));
    }
}

#[tokio::test]
async fn verify_without_challenge_is_rejected() {
    let h = harness();
    let err = h.client.auth().verify_and_login("123456").await.unwrap_err();
    assert!(matches!(err, SdkError::Auth(AuthError::OtpNotRequested)));
}

#[tokio::test]
async fn wrong_code_is_invalid_otp() {
    let h = harness();
    h.client.auth().send_otp("9876543210").await.unwrap();
    let err = h.client.auth().verify_and_login("000000").await.unwrap_err();
    assert!(matches!(err, SdkError::Auth(AuthError::InvalidOtp)));
    assert!(!h.client.auth().is_logged_in().await);
}

#[tokio::test]
async fn login_persists_session_and_refreshes_cart() {
    let h = harness();
    assert!(!h.client.auth().is_logged_in().await);

    login(&h).await;

    assert!(h.client.auth().is_logged_in().await);
    let user = h.client.auth().current_user().await.unwrap();
    assert_eq!(user.id, 1);

    // Token + profile persisted under the fixed keys.
    let stored = h.store.load().unwrap().unwrap();
    assert_eq!(stored.token, "sess_tok_1");
    assert_eq!(stored.user, user);

    // isLoggedIn flipping true triggered an immediate cart refresh.
    assert_eq!(h.api.fetch_calls(), 1);
}

#[tokio::test]
async fn restore_session_trusts_store_without_revalidation() {
    let h = harness();
    h.store
        .save(&StoredSession {
            token: "sess_tok_1".to_string(),
            user: User {
                id: 1,
                name: "Asha".to_string(),
                phone: "+919876543210".to_string(),
                role: "customer".to_string(),
            },
        })
        .unwrap();

    let restored = h.client.auth().restore_session().await.unwrap();
    assert_eq!(restored.unwrap().name, "Asha");
    assert!(h.client.auth().is_logged_in().await);
    // One cart fetch; no profile revalidation round-trip is implied.
    assert_eq!(h.api.fetch_calls(), 1);
}

#[tokio::test]
async fn restore_with_empty_store_stays_logged_out() {
    let h = harness();
    assert!(h.client.auth().restore_session().await.unwrap().is_none());
    assert!(!h.client.auth().is_logged_in().await);
    assert_eq!(h.api.fetch_calls(), 0);
}

// ─── Cart gating ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn logged_out_add_is_rejected_and_state_unchanged() {
    let h = harness();
    let err = h
        .client
        .cart()
        .add(&ProductId::from("p_bananas"), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Auth(AuthError::NotAuthenticated)));
    assert_eq!(h.client.cart().count().await, 0);
    // Rejected before any network call.
    let (adds, _, _) = h.api.counters();
    assert_eq!(adds, 0);
}

#[tokio::test]
async fn logged_out_refresh_is_a_noop() {
    let h = harness();
    h.client.cart().refresh().await.unwrap();
    assert_eq!(h.api.fetch_calls(), 0);
}

// ─── Cart synchronization ────────────────────────────────────────────────────

#[tokio::test]
async fn mutations_resync_from_server_truth() {
    let h = harness();
    login(&h).await;

    h.client
        .cart()
        .add(&ProductId::from("p_bananas"), 2)
        .await
        .unwrap();
    assert_eq!(h.client.cart().count().await, 2);
    assert_eq!(h.client.cart().total().await, dec!(90));

    // Same product again: the server merges into one line.
    h.client
        .cart()
        .add(&ProductId::from("p_bananas"), 1)
        .await
        .unwrap();
    assert_eq!(h.client.cart().lines().await.len(), 1);
    assert_eq!(h.client.cart().count().await, 3);

    h.client
        .cart()
        .add(&ProductId::from("p_milk"), 1)
        .await
        .unwrap();
    // Badge counts quantities, not lines.
    assert_eq!(h.client.cart().count().await, 4);
    assert_eq!(h.client.cart().lines().await.len(), 2);
    assert_eq!(h.client.cart().total().await, dec!(200));

    assert_eq!(
        h.client
            .cart()
            .item_quantity(&ProductId::from("p_bananas"))
            .await,
        3
    );
}

#[tokio::test]
async fn zero_and_negative_quantity_both_remove_the_line() {
    let h = harness();
    login(&h).await;

    h.client
        .cart()
        .add(&ProductId::from("p_bananas"), 2)
        .await
        .unwrap();
    h.client
        .cart()
        .add(&ProductId::from("p_milk"), 1)
        .await
        .unwrap();

    let bananas_line = h
        .client
        .cart()
        .line_for_product(&ProductId::from("p_bananas"))
        .await
        .unwrap()
        .id;
    h.client.cart().set_quantity(&bananas_line, 0).await.unwrap();
    assert!(h
        .client
        .cart()
        .line_for_product(&ProductId::from("p_bananas"))
        .await
        .is_none());

    let milk_line = h
        .client
        .cart()
        .line_for_product(&ProductId::from("p_milk"))
        .await
        .unwrap()
        .id;
    h.client.cart().set_quantity(&milk_line, -1).await.unwrap();
    assert!(h.client.cart().is_empty().await);

    // Both went through the delete endpoint; no update-to-zero ever hit
    // the backend.
    let (_, updates, removes) = h.api.counters();
    assert_eq!(updates, 0);
    assert_eq!(removes, 2);
}

#[tokio::test]
async fn positive_quantity_update_goes_through_update_endpoint() {
    let h = harness();
    login(&h).await;

    h.client
        .cart()
        .add(&ProductId::from("p_bananas"), 1)
        .await
        .unwrap();
    let line = h
        .client
        .cart()
        .line_for_product(&ProductId::from("p_bananas"))
        .await
        .unwrap()
        .id;

    h.client.cart().set_quantity(&line, 4).await.unwrap();
    assert_eq!(h.client.cart().count().await, 4);

    let (_, updates, removes) = h.api.counters();
    assert_eq!(updates, 1);
    assert_eq!(removes, 0);
    assert!(h.client.cart().busy_line().await.is_none());
}

#[tokio::test]
async fn failed_refetch_keeps_prior_snapshot_and_surfaces_error() {
    let h = harness();
    login(&h).await;

    h.client
        .cart()
        .add(&ProductId::from("p_bananas"), 1)
        .await
        .unwrap();
    assert_eq!(h.client.cart().count().await, 1);

    // The add itself will succeed server-side; the follow-up refetch dies.
    h.api.set_fail_next_fetch();
    let err = h
        .client
        .cart()
        .add(&ProductId::from("p_milk"), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Http(_)));

    // Prior snapshot intact: the milk is not shown even though the server
    // has it.
    assert_eq!(h.client.cart().count().await, 1);
    assert!(h
        .client
        .cart()
        .line_for_product(&ProductId::from("p_milk"))
        .await
        .is_none());

    // The next successful refresh converges on server truth.
    h.client.cart().refresh().await.unwrap();
    assert_eq!(h.client.cart().count().await, 2);
}

// ─── Checkout ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn placing_an_order_consumes_the_cart() {
    let h = harness();
    login(&h).await;
    h.client
        .cart()
        .add(&ProductId::from("p_bananas"), 2)
        .await
        .unwrap();
    h.client
        .cart()
        .add(&ProductId::from("p_milk"), 1)
        .await
        .unwrap();

    let order = h
        .client
        .orders()
        .place("14 MG Road, Indiranagar, 560038")
        .await
        .unwrap();

    assert_eq!(order.status, kirana_sdk::domain::order::OrderStatus::Placed);
    assert_eq!(order.status.progress_step(), 0);
    assert_eq!(order.total_amount, dec!(155));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.delivery_address, "14 MG Road, Indiranagar, 560038");

    // The backend consumed the cart; the post-placement resync emptied the
    // local snapshot too.
    assert_eq!(h.client.cart().count().await, 0);
}

#[tokio::test]
async fn placing_with_blank_address_fails_locally() {
    let h = harness();
    login(&h).await;
    let err = h.client.orders().place("   ").await.unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
}

// ─── Logout ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn logout_empties_cart_and_store() {
    let h = harness();
    login(&h).await;
    h.client
        .cart()
        .add(&ProductId::from("p_bananas"), 3)
        .await
        .unwrap();
    assert_eq!(h.client.cart().count().await, 3);

    h.client.auth().logout().await;

    assert!(!h.client.auth().is_logged_in().await);
    assert_eq!(h.client.cart().count().await, 0);
    assert!(h.store.load().unwrap().is_none());
}

#[tokio::test]
async fn logout_swallows_remote_failures() {
    let h = harness();
    login(&h).await;
    h.api.with_state(|s| s.fail_logout = true);

    h.client.auth().logout().await;

    assert!(!h.client.auth().is_logged_in().await);
    assert_eq!(h.client.cart().count().await, 0);
    assert!(h.store.load().unwrap().is_none());
}
