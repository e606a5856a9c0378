//! Authentication — phone validation, session types, login/logout.
//!
//! ## Flow
//!
//! 1. `send_otp(phone)` — local 10-digit validation, then an OTP challenge
//!    at the identity provider. The pending challenge lives in memory only.
//! 2. `verify_and_login(code)` — the provider confirms the code and issues a
//!    short-lived identity token; the backend exchanges it for a session
//!    token + user profile (`POST auth/login`). Both are persisted to the
//!    session store and the bearer token is set on the transport.
//! 3. On restart, `restore_session()` trusts whatever the store holds — no
//!    forced revalidation. `check_session()` exists for embedders that want
//!    a background revalidation after restore.
//!
//! Logout is best-effort remotely and unconditional locally.

pub mod client;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

// ─── User profile ────────────────────────────────────────────────────────────

/// The backend's user profile, cached locally for trust-on-restore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub role: String,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// `POST auth/login` request body: the identity token from the OTP provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub token: String,
}

/// `POST auth/login` response: session token + profile in one round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

// ─── Phone validation ────────────────────────────────────────────────────────

/// Validate a candidate phone number: exactly 10 ASCII digits, no country
/// code. Runs before any network call.
pub fn validate_phone(phone: &str) -> Result<(), AuthError> {
    if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AuthError::InvalidPhone(phone.to_string()))
    }
}

/// Prefix the validated national number with the configured country code.
pub(crate) fn to_e164(phone: &str, country_code: &str) -> String {
    if phone.starts_with('+') {
        phone.to_string()
    } else {
        format!("{country_code}{phone}")
    }
}
