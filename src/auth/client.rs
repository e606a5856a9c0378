//! Auth sub-client — OTP login, logout, session restore.

use crate::auth::{to_e164, validate_phone, LoginRequest, User};
use crate::client::StorefrontClient;
use crate::error::{AuthError, HttpError, OtpError, SdkError, SessionStoreError};
use crate::session::StoredSession;

/// Sub-client for authentication operations.
///
/// State machine: `LoggedOut → OtpPending → LoggedIn`, back to `LoggedOut`
/// via [`logout`](Self::logout). There is no persisted "verifying" state —
/// verification is purely in-flight.
pub struct Auth<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl Auth<'_> {
    /// Send an OTP to a candidate phone number.
    ///
    /// The number must be exactly 10 digits; validation runs before the
    /// provider is contacted. On success a challenge is held in memory and
    /// the flow is in `OtpPending`.
    pub async fn send_otp(&self, phone: &str) -> Result<(), SdkError> {
        validate_phone(phone)?;
        let e164 = to_e164(phone, &self.client.country_code);
        let challenge = self.client.otp.challenge(&e164).await?;
        *self.client.pending_otp.write().await = Some(challenge);
        Ok(())
    }

    /// Confirm the OTP code and exchange the resulting identity token for a
    /// backend session.
    ///
    /// On success the session token and profile are persisted, the bearer
    /// token is installed on the transport, and the cart is refreshed
    /// (refresh failures are logged, not fatal — the login itself stands).
    pub async fn verify_and_login(&self, code: &str) -> Result<User, SdkError> {
        let challenge = self
            .client
            .pending_otp
            .read()
            .await
            .clone()
            .ok_or(AuthError::OtpNotRequested)?;

        let identity_token =
            self.client
                .otp
                .confirm(&challenge, code)
                .await
                .map_err(|e| match e {
                    OtpError::InvalidCode => SdkError::Auth(AuthError::InvalidOtp),
                    other => SdkError::Otp(other),
                })?;

        let login = self
            .client
            .api
            .login(&LoginRequest {
                token: identity_token.as_str().to_string(),
            })
            .await
            .map_err(|e| AuthError::SessionExchangeFailed(e.to_string()))?;

        self.client
            .api
            .set_session_token(Some(login.token.clone()))
            .await;

        if let Err(e) = self.client.store.save(&StoredSession {
            token: login.token,
            user: login.user.clone(),
        }) {
            // The session still works for this process; it just won't
            // survive a restart.
            tracing::warn!("failed to persist session: {e}");
        }

        *self.client.session.write().await = Some(login.user.clone());
        *self.client.pending_otp.write().await = None;

        if let Err(e) = self.client.cart().refresh().await {
            tracing::warn!("cart refresh after login failed: {e}");
        }

        Ok(login.user)
    }

    /// Log out. Remote revocation at the identity provider and the backend
    /// is best-effort — failures are swallowed; locally the session store,
    /// bearer token, profile, pending challenge, and cart snapshot are
    /// always cleared. Never fails.
    pub async fn logout(&self) {
        if let Err(e) = self.client.otp.revoke().await {
            tracing::debug!("identity provider sign-out failed (ignored): {e}");
        }
        if let Err(e) = self.client.api.logout().await {
            tracing::debug!("backend logout failed (ignored): {e}");
        }
        if let Err(e) = self.client.store.clear() {
            tracing::debug!("session store clear failed (ignored): {e}");
        }

        self.client.api.set_session_token(None).await;
        *self.client.session.write().await = None;
        *self.client.pending_otp.write().await = None;
        self.client.cart().clear_local().await;
    }

    /// Restore a persisted session on process start.
    ///
    /// Trust-on-restore: a stored token is used as-is with the last cached
    /// profile; there is no forced network revalidation. Embedders wanting
    /// stronger guarantees can follow up with [`check_session`](Self::check_session)
    /// in the background. A corrupt store is treated as absent.
    pub async fn restore_session(&self) -> Result<Option<User>, SdkError> {
        let stored = match self.client.store.load() {
            Ok(stored) => stored,
            Err(SessionStoreError::Corrupt(e)) => {
                tracing::warn!("discarding corrupt stored session: {e}");
                let _ = self.client.store.clear();
                None
            }
            Err(e) => return Err(e.into()),
        };

        let Some(StoredSession { token, user }) = stored else {
            return Ok(None);
        };

        self.client.api.set_session_token(Some(token)).await;
        *self.client.session.write().await = Some(user.clone());

        if let Err(e) = self.client.cart().refresh().await {
            tracing::warn!("cart refresh after restore failed: {e}");
        }

        Ok(Some(user))
    }

    /// Revalidate the current session against the backend and refresh the
    /// cached profile.
    ///
    /// A 401 means the restored token is dead: local session state is
    /// cleared and the error returned. Transient failures propagate without
    /// touching the session.
    pub async fn check_session(&self) -> Result<User, SdkError> {
        self.client.require_session().await?;

        let user = match self.client.api.profile().await {
            Ok(user) => user,
            Err(HttpError::Unauthorized) => {
                if let Err(e) = self.client.store.clear() {
                    tracing::debug!("session store clear failed (ignored): {e}");
                }
                self.client.api.set_session_token(None).await;
                *self.client.session.write().await = None;
                self.client.cart().clear_local().await;
                return Err(HttpError::Unauthorized.into());
            }
            Err(e) => return Err(e.into()),
        };

        *self.client.session.write().await = Some(user.clone());
        Ok(user)
    }

    /// Whether a session is present (in memory — no network).
    pub async fn is_logged_in(&self) -> bool {
        self.client.session.read().await.is_some()
    }

    /// The logged-in profile, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.client.session.read().await.clone()
    }

    /// The E.164 number an OTP is pending for, if the flow is mid-login.
    pub async fn pending_phone(&self) -> Option<String> {
        self.client
            .pending_otp
            .read()
            .await
            .as_ref()
            .map(|c| c.phone_e164.clone())
    }
}
