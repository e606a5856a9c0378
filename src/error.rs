//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("OTP provider error: {0}")]
    Otp(#[from] OtpError),

    #[error("Session store error: {0}")]
    Session(#[from] SessionStoreError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
///
/// When the backend supplies a `message` in its error envelope it is passed
/// through verbatim so apps can show it inline.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// An operation requiring a session was attempted without one.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Candidate phone number failed local validation (must be 10 digits).
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    /// `verify_and_login` called with no pending OTP challenge.
    #[error("No OTP challenge pending; call send_otp first")]
    OtpNotRequested,

    /// The identity provider rejected the OTP code.
    #[error("Invalid OTP code")]
    InvalidOtp,

    /// The backend rejected the identity token during session exchange.
    #[error("Session exchange failed: {0}")]
    SessionExchangeFailed(String),
}

/// Identity-provider (phone OTP) errors.
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Rate limited by identity provider")]
    RateLimited,

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Payment flow errors.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// The user abandoned the gateway flow. Non-fatal: the order remains
    /// created and payable later.
    #[error("Payment cancelled by user")]
    Cancelled,

    #[error("Payment verification failed: {0}")]
    VerificationFailed(String),
}

/// Session persistence errors.
#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_messages_pass_through() {
        let err = SdkError::Http(HttpError::ServerError {
            status: 500,
            message: "Insufficient stock".to_string(),
        });
        assert_eq!(err.to_string(), "HTTP error: Server error 500: Insufficient stock");
    }

    #[test]
    fn test_payment_cancelled_is_distinct_from_failure() {
        assert!(matches!(PaymentError::Cancelled, PaymentError::Cancelled));
        assert_eq!(
            PaymentError::Cancelled.to_string(),
            "Payment cancelled by user"
        );
        assert_eq!(
            PaymentError::VerificationFailed("bad signature".to_string()).to_string(),
            "Payment verification failed: bad signature"
        );
    }
}
