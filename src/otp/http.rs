//! REST-backed identity provider client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{IdentityProvider, IdentityToken, OtpChallenge};
use crate::error::OtpError;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    phone: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    verification_id: String,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    verification_id: &'a str,
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    id_token: String,
}

/// A non-2xx provider response, before per-endpoint mapping.
struct ProviderFailure {
    status: u16,
    body: String,
}

impl ProviderFailure {
    fn into_generic(self) -> OtpError {
        match self.status {
            429 => OtpError::RateLimited,
            _ => OtpError::Provider(format!("{}: {}", self.status, self.body)),
        }
    }
}

/// Identity provider client over its REST surface.
///
/// Holds its own HTTP client: the provider is a different host with a
/// different auth scheme (API key) than the storefront backend.
pub struct HttpOtpProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpOtpProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<Result<T, ProviderFailure>, OtpError>
    where
        T: serde::de::DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| OtpError::Provider(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            let parsed = resp
                .json::<T>()
                .await
                .map_err(|e| OtpError::Provider(e.to_string()))?;
            return Ok(Ok(parsed));
        }

        let body_text = resp.text().await.unwrap_or_default();
        Ok(Err(ProviderFailure {
            status: status.as_u16(),
            body: body_text,
        }))
    }
}

#[async_trait]
impl IdentityProvider for HttpOtpProvider {
    async fn challenge(&self, phone_e164: &str) -> Result<OtpChallenge, OtpError> {
        let resp: SendResponse = self
            .post("v1/otp/send", &SendRequest { phone: phone_e164 })
            .await?
            .map_err(ProviderFailure::into_generic)?;
        Ok(OtpChallenge {
            verification_id: resp.verification_id,
            phone_e164: phone_e164.to_string(),
        })
    }

    async fn confirm(
        &self,
        challenge: &OtpChallenge,
        code: &str,
    ) -> Result<IdentityToken, OtpError> {
        let resp: VerifyResponse = self
            .post(
                "v1/otp/verify",
                &VerifyRequest {
                    verification_id: &challenge.verification_id,
                    code,
                },
            )
            .await?
            .map_err(|failure| match failure.status {
                // Wrong or expired code.
                400 | 403 => OtpError::InvalidCode,
                _ => failure.into_generic(),
            })?;
        Ok(IdentityToken::new(resp.id_token))
    }

    async fn revoke(&self) -> Result<(), OtpError> {
        let _: serde_json::Value = self
            .post("v1/otp/revoke", &serde_json::json!({}))
            .await?
            .map_err(ProviderFailure::into_generic)?;
        Ok(())
    }
}
