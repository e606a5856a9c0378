//! Network URL constants for the Kirana SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.kirana.app/api/v1";

/// Default phone-OTP identity provider base URL.
pub const DEFAULT_OTP_URL: &str = "https://auth.kirana.app";
