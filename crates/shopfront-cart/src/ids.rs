//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally passing a VariantId where a
//! ProductId is expected. The shop backend serves integer primary keys
//! while older cart records hold strings, so both deserialize.
//!
//! A product id may not contain [`KEY_SEPARATOR`]: `"1:a"` as a product
//! would render the same line key as product `1` in variant `a`.

use crate::key::KEY_SEPARATOR;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
///
/// The bracketed list names characters rejected when deserializing.
macro_rules! define_id {
    ($name:ident, [$($forbidden:expr),*]) => {
        /// A catalog identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let forbidden: &[char] = &[$($forbidden),*];
                let id = string_or_number(deserializer)?;
                if id.contains(forbidden) {
                    return Err(serde::de::Error::custom(format!(
                        "identifier {id:?} contains a reserved character"
                    )));
                }
                Ok(Self(id))
            }
        }
    };
}

define_id!(ProductId, [KEY_SEPARATOR]);
define_id!(VariantId, []);

impl ProductId {
    /// Check that the id can be rendered into an unambiguous line key.
    pub fn validate(id: &str) -> Result<(), String> {
        if id.trim().is_empty() {
            return Err("product id is empty".to_string());
        }
        if id.contains(KEY_SEPARATOR) {
            return Err(format!("product id may not contain '{KEY_SEPARATOR}'"));
        }
        Ok(())
    }
}

/// Accept `"12"` or `12` as the same identifier.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    let id = match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    };

    if id.trim().is_empty() {
        return Err(serde::de::Error::custom("identifier is empty"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_from_number() {
        let id: ProductId = 42u64.into();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn test_id_display() {
        let id = VariantId::new("var-7");
        assert_eq!(format!("{}", id), "var-7");
    }

    #[test]
    fn test_deserialize_string_or_number() {
        let a: ProductId = serde_json::from_str("12").unwrap();
        let b: ProductId = serde_json::from_str(r#""12""#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deserialize_rejects_empty_and_null() {
        assert!(serde_json::from_str::<ProductId>(r#""""#).is_err());
        assert!(serde_json::from_str::<ProductId>("null").is_err());
        assert!(serde_json::from_str::<ProductId>("true").is_err());
    }

    #[test]
    fn test_product_id_rejects_key_separator() {
        assert!(serde_json::from_str::<ProductId>(r#""1:a""#).is_err());
        assert!(ProductId::validate("1:a").is_err());
        assert!(ProductId::validate("1").is_ok());

        // Variants may contain it; the product half ends at the first separator
        let variant: VariantId = serde_json::from_str(r#""a:b""#).unwrap();
        assert_eq!(variant.as_str(), "a:b");
    }

    #[test]
    fn test_serializes_as_string() {
        let id = ProductId::from(5u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""5""#);
    }
}
