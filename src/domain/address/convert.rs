//! Conversion: address wire types → domain types.

use super::wire;
use super::Address;
use crate::shared::AddressId;

impl From<wire::AddressResponse> for Address {
    fn from(source: wire::AddressResponse) -> Self {
        Address {
            id: AddressId::from(source.id),
            label: source.label,
            address_line: source.address_line,
            area_name: source.area_name,
            landmark: source.landmark,
            receiver_name: source.receiver_name,
            receiver_phone: source.receiver_phone,
            latitude: source.latitude,
            longitude: source.longitude,
            pincode: source.pincode,
            is_default: source.is_default,
        }
    }
}
