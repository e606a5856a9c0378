//! Wire types for address endpoints (REST).

use super::AddressLabel;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw address from the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResponse {
    pub id: String,
    pub user_id: String,
    pub label: AddressLabel,
    pub address_line: String,
    pub area_name: String,
    #[serde(default)]
    pub landmark: Option<String>,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
