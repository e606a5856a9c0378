//! Shared newtypes and utilities used across all domain modules.
//!
//! The id newtypes are serialization-transparent: they serialize/deserialize
//! identically to the raw strings the backend sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod fmt;
pub mod page;

pub use page::{PageQuery, Paginated};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Declares a string-backed id newtype that serializes as a plain JSON string
/// and can be used as a `HashMap` key.
macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name(s.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok($name(s))
            }
        }
    };
}

string_id! {
    /// Newtype for product identifiers.
    ProductId
}

string_id! {
    /// Newtype for cart line identifiers (one product-and-quantity entry).
    CartLineId
}

string_id! {
    /// Newtype for category identifiers at any level of the three-tier tree.
    CategoryId
}

string_id! {
    /// Newtype for delivery address identifiers.
    AddressId
}

string_id! {
    /// Newtype for order identifiers.
    OrderId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrips_as_plain_string() {
        let id = ProductId::from("prod_42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"prod_42\"");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display_matches_inner() {
        let id = OrderId::new("ord_7");
        assert_eq!(id.to_string(), "ord_7");
        assert_eq!(id.as_str(), "ord_7");
    }
}
