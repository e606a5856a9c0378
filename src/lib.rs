//! # Kirana SDK
//!
//! A Rust client SDK for the Kirana quick-commerce platform: catalog
//! browsing, phone-OTP authentication, cart synchronization, checkout
//! pricing, orders, and payments.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes and domain models (vertical slices)
//! 2. **Auth** — Phone validation, OTP identity-provider seam, session store
//! 3. **HTTP API** — `StorefrontHttp` with per-endpoint retry policies
//!    (reads retry on transient failures, writes never)
//! 4. **High-Level Client** — `StorefrontClient` with nested sub-clients
//!    and app-owned state containers
//!
//! ## Consistency model
//!
//! The backend owns the cart. Every mutation is followed by a full refetch
//! before the operation completes, so the local snapshot always reflects
//! exactly what the server has — never an optimistic guess. A failed
//! mutation or refetch leaves the previous snapshot visible.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kirana_sdk::prelude::*;
//!
//! let client = StorefrontClient::builder()
//!     .base_url("https://api.kirana.app/api/v1")
//!     .otp_api_key("key_...")
//!     .session_file("~/.kirana/session.json")
//!     .build()?;
//!
//! client.auth().restore_session().await?;
//! client.auth().send_otp("9876543210").await?;
//! let user = client.auth().verify_and_login("123456").await?;
//!
//! client.cart().add(&ProductId::from("prod_1"), 1).await?;
//! println!("{} items", client.cart().count().await);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: phone validation, session types, login/logout.
pub mod auth;

/// Phone-OTP identity provider seam + hosted client.
pub mod otp;

/// Session persistence across restarts.
pub mod session;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Remote API contract and reqwest-backed client with retry policies.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `StorefrontClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{
        AddressId, CartLineId, CategoryId, OrderId, PageQuery, Paginated, ProductId,
    };

    // Domain types — catalog
    pub use crate::domain::catalog::{
        Category, Product, ProductQuery, SubSubcategory, Subcategory,
    };

    // Domain types — cart
    pub use crate::domain::cart::{CartLine, CartState};

    // Domain types — pricing
    pub use crate::domain::pricing::{
        free_delivery_gap, free_delivery_hint, CouponEntry, Quote, TipSelection,
        FREE_DELIVERY_THRESHOLD,
    };

    // Domain types — address, order, payment
    pub use crate::domain::address::{Address, AddressLabel, NewAddress};
    pub use crate::domain::order::{Order, OrderItem, OrderStatus};
    pub use crate::domain::payment::{
        PaymentMethod, PaymentOrder, PaymentStatus, PaymentVerification, VerifyPaymentRequest,
    };

    // Errors
    pub use crate::error::{AuthError, HttpError, PaymentError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_OTP_URL};

    // Auth + session
    pub use crate::auth::{validate_phone, User};
    pub use crate::otp::{IdentityProvider, IdentityToken, OtpChallenge};
    pub use crate::session::{
        FileSessionStore, MemorySessionStore, SessionStore, StoredSession,
    };

    // Clients
    pub use crate::client::{StorefrontClient, StorefrontClientBuilder};
    pub use crate::http::{RetryConfig, RetryPolicy, StorefrontApi, StorefrontHttp};

    // Sub-clients
    pub use crate::auth::client::Auth as AuthClient;
    pub use crate::domain::address::client::Addresses as AddressesClient;
    pub use crate::domain::cart::client::Cart as CartClient;
    pub use crate::domain::catalog::client::Catalog as CatalogClient;
    pub use crate::domain::order::client::Orders as OrdersClient;
    pub use crate::domain::payment::client::Payments as PaymentsClient;
}
