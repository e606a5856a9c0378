//! High-level client — `StorefrontClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs` (auth in
//! `auth/client.rs`). This module keeps the builder, the shared state, and
//! the accessor methods.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_lock::{Mutex, RwLock};

use crate::auth::client::Auth;
use crate::auth::User;
use crate::domain::address::client::Addresses;
use crate::domain::cart::client::Cart;
use crate::domain::cart::CartState;
use crate::domain::catalog::client::Catalog;
use crate::domain::catalog::Category;
use crate::domain::order::client::Orders;
use crate::domain::payment::client::Payments;
use crate::error::{AuthError, SdkError};
use crate::http::{StorefrontApi, StorefrontHttp};
use crate::otp::http::HttpOtpProvider;
use crate::otp::{IdentityProvider, OtpChallenge};
use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};
use crate::shared::CartLineId;

/// The primary entry point for the Kirana SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.auth()`, `client.cart()`, `client.catalog()`, etc.
///
/// All mutable state is shared behind locks, so clones are cheap handles
/// onto one logical session — the badge count a clone reads is the same one
/// the original updated.
pub struct StorefrontClient {
    pub(crate) api: Arc<dyn StorefrontApi>,
    pub(crate) otp: Arc<dyn IdentityProvider>,
    pub(crate) store: Arc<dyn SessionStore>,
    /// Logged-in profile; `None` while logged out.
    pub(crate) session: Arc<RwLock<Option<User>>>,
    /// OTP challenge between `send_otp` and `verify_and_login`.
    pub(crate) pending_otp: Arc<RwLock<Option<OtpChallenge>>>,
    /// The cart projection. Written only by the cart sub-client and by auth
    /// transitions (refresh on login, clear on logout).
    pub(crate) cart_state: Arc<RwLock<CartState>>,
    /// Line currently being mutated, for per-line control disabling.
    pub(crate) cart_busy: Arc<RwLock<Option<CartLineId>>>,
    /// Serializes cart mutations so two rapid taps cannot race a stale
    /// line id into the backend.
    pub(crate) cart_mutation: Arc<Mutex<()>>,
    /// Category tree cache: (tree, fetched_at).
    pub(crate) category_cache: Arc<RwLock<Option<(Vec<Category>, Instant)>>>,
    pub(crate) category_cache_ttl: Duration,
    /// Prefix for E.164 formatting of national phone numbers.
    pub(crate) country_code: String,
}

impl StorefrontClient {
    pub fn builder() -> StorefrontClientBuilder {
        StorefrontClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn cart(&self) -> Cart<'_> {
        Cart { client: self }
    }

    pub fn catalog(&self) -> Catalog<'_> {
        Catalog { client: self }
    }

    pub fn addresses(&self) -> Addresses<'_> {
        Addresses { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments { client: self }
    }

    /// Error with `NotAuthenticated` unless a session is present.
    pub(crate) async fn require_session(&self) -> Result<(), AuthError> {
        if self.session.read().await.is_some() {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }
}

impl Clone for StorefrontClient {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            otp: self.otp.clone(),
            store: self.store.clone(),
            session: self.session.clone(),
            pending_otp: self.pending_otp.clone(),
            cart_state: self.cart_state.clone(),
            cart_busy: self.cart_busy.clone(),
            cart_mutation: self.cart_mutation.clone(),
            category_cache: self.category_cache.clone(),
            category_cache_ttl: self.category_cache_ttl,
            country_code: self.country_code.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct StorefrontClientBuilder {
    base_url: String,
    otp_url: String,
    otp_api_key: String,
    country_code: String,
    category_cache_ttl: Duration,
    api: Option<Arc<dyn StorefrontApi>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    session_store: Option<Arc<dyn SessionStore>>,
}

impl Default for StorefrontClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            otp_url: crate::network::DEFAULT_OTP_URL.to_string(),
            otp_api_key: String::new(),
            country_code: "+91".to_string(),
            category_cache_ttl: Duration::from_secs(60),
            api: None,
            identity_provider: None,
            session_store: None,
        }
    }
}

impl StorefrontClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn otp_url(mut self, url: &str) -> Self {
        self.otp_url = url.to_string();
        self
    }

    /// API key for the hosted OTP provider. Ignored when a custom
    /// [`identity_provider`](Self::identity_provider) is installed.
    pub fn otp_api_key(mut self, key: &str) -> Self {
        self.otp_api_key = key.to_string();
        self
    }

    /// Country-code prefix applied to validated 10-digit numbers
    /// (default `+91`).
    pub fn country_code(mut self, code: &str) -> Self {
        self.country_code = code.to_string();
        self
    }

    pub fn category_cache_ttl(mut self, ttl: Duration) -> Self {
        self.category_cache_ttl = ttl;
        self
    }

    /// Substitute the remote-API transport. Used by tests and embedders
    /// with their own HTTP stack.
    pub fn api(mut self, api: Arc<dyn StorefrontApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Substitute the phone-OTP identity provider.
    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    /// Substitute the session store (default: in-memory, nothing survives
    /// a restart).
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    /// Persist the session to a JSON file at `path`.
    pub fn session_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.session_store = Some(Arc::new(FileSessionStore::new(path)));
        self
    }

    pub fn build(self) -> Result<StorefrontClient, SdkError> {
        let api = self
            .api
            .unwrap_or_else(|| Arc::new(StorefrontHttp::new(&self.base_url)));
        let otp = self
            .identity_provider
            .unwrap_or_else(|| Arc::new(HttpOtpProvider::new(&self.otp_url, &self.otp_api_key)));
        let store = self
            .session_store
            .unwrap_or_else(|| Arc::new(MemorySessionStore::new()));

        Ok(StorefrontClient {
            api,
            otp,
            store,
            session: Arc::new(RwLock::new(None)),
            pending_otp: Arc::new(RwLock::new(None)),
            cart_state: Arc::new(RwLock::new(CartState::new())),
            cart_busy: Arc::new(RwLock::new(None)),
            cart_mutation: Arc::new(Mutex::new(())),
            category_cache: Arc::new(RwLock::new(None)),
            category_cache_ttl: self.category_cache_ttl,
            country_code: self.country_code,
        })
    }
}
