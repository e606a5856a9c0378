//! Address domain — saved delivery addresses.

pub mod client;
mod convert;
pub mod wire;

use crate::shared::AddressId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Address label shown as a chip in pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressLabel {
    Home,
    Work,
    Other,
}

impl AddressLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Work => "work",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for AddressLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A saved delivery address.
///
/// The server is supposed to keep exactly one default per user; the client
/// does not enforce that — it reads whatever the server returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub id: AddressId,
    pub label: AddressLabel,
    pub address_line: String,
    pub area_name: String,
    pub landmark: Option<String>,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub pincode: String,
    pub is_default: bool,
}

impl Address {
    /// The flattened single-line form sent with order placement.
    pub fn flattened(&self) -> String {
        let mut parts = vec![self.address_line.clone(), self.area_name.clone()];
        if let Some(landmark) = &self.landmark {
            if !landmark.is_empty() {
                parts.push(landmark.clone());
            }
        }
        parts.push(self.pincode.clone());
        parts.join(", ")
    }
}

/// Payload for creating a new address. Validated locally before any network
/// call — see [`NewAddress::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAddress {
    pub label: AddressLabel,
    pub address_line: String,
    pub area_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub pincode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl NewAddress {
    /// Field checks mirroring the add-address form: non-empty line and
    /// receiver name, 10-digit receiver phone, 6-digit pincode.
    pub fn validate(&self) -> Result<(), String> {
        if self.address_line.trim().is_empty() {
            return Err("address line must not be empty".to_string());
        }
        if self.receiver_name.trim().is_empty() {
            return Err("receiver name must not be empty".to_string());
        }
        if self.receiver_phone.len() != 10
            || !self.receiver_phone.chars().all(|c| c.is_ascii_digit())
        {
            return Err("receiver phone must be exactly 10 digits".to_string());
        }
        if self.pincode.len() != 6 || !self.pincode.chars().all(|c| c.is_ascii_digit()) {
            return Err("pincode must be exactly 6 digits".to_string());
        }
        Ok(())
    }
}
