//! Phone-OTP identity provider — the external collaborator that proves
//! phone-number ownership.
//!
//! The provider issues a challenge for a phone number, confirms the code the
//! user received, and returns a short-lived identity token. That token is
//! exchanged exactly once with the backend for a session token; the SDK
//! never uses it for anything else.
//!
//! [`HttpOtpProvider`](http::HttpOtpProvider) talks to the hosted provider;
//! tests and embedders with their own identity stack substitute the trait.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OtpError;

/// An in-flight OTP verification. Opaque to callers; held by the auth
/// sub-client between `send_otp` and `verify_and_login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OtpChallenge {
    /// Provider-issued handle for this verification attempt.
    pub verification_id: String,
    /// The E.164 number the code was sent to.
    pub phone_e164: String,
}

/// Short-lived proof of phone-number ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityToken(String);

impl IdentityToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The identity-provider contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Start a verification: send an OTP to the given E.164 number.
    async fn challenge(&self, phone_e164: &str) -> Result<OtpChallenge, OtpError>;

    /// Confirm the code the user typed against a pending challenge.
    async fn confirm(
        &self,
        challenge: &OtpChallenge,
        code: &str,
    ) -> Result<IdentityToken, OtpError>;

    /// Best-effort provider-side sign-out. Errors are reported but callers
    /// treat them as non-fatal.
    async fn revoke(&self) -> Result<(), OtpError>;
}
