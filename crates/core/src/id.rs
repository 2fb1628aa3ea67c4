//! Strongly-typed identifiers used across the storefront.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::ShopError;

/// Identifier of a catalog product (as issued by the remote API).
///
/// Never empty; the basket stores these and resolves them against the
/// catalog lazily.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

/// Identifier of a placed order, echoed back by the API on success.
///
/// The API is not consistent about the JSON type of this id, so both strings
/// and numbers are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireOrderId", into = "String")]
pub struct OrderId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum WireOrderId {
    Text(String),
    Number(u64),
}

impl From<WireOrderId> for OrderId {
    fn from(value: WireOrderId) -> Self {
        match value {
            WireOrderId::Text(s) => Self(s),
            WireOrderId::Number(n) => Self(n.to_string()),
        }
    }
}

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_newtype!(ProductId);
impl_string_newtype!(OrderId);

impl ProductId {
    /// Create a product id, rejecting empty strings.
    pub fn new(value: impl Into<String>) -> Result<Self, ShopError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ShopError::invalid_id("ProductId: empty"));
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for ProductId {
    type Error = ShopError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for ProductId {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_rejects_empty() {
        assert!(matches!(ProductId::new(""), Err(ShopError::InvalidId(_))));
        assert_eq!(ProductId::new("p-1").unwrap().as_str(), "p-1");
    }

    #[test]
    fn product_id_is_transparent_on_the_wire() {
        let id: ProductId = serde_json::from_str("\"854cef69\"").unwrap();
        assert_eq!(id.as_str(), "854cef69");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"854cef69\"");
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
    }

    #[test]
    fn order_id_accepts_strings_and_numbers() {
        let from_text: OrderId = serde_json::from_str("\"28c57cb4\"").unwrap();
        let from_number: OrderId = serde_json::from_str("42").unwrap();
        assert_eq!(from_text.as_str(), "28c57cb4");
        assert_eq!(from_number.as_str(), "42");
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }
}
