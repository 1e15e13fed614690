//! Cart configuration.

use crate::cart::ShippingPolicy;
use serde::{Deserialize, Serialize};

/// Default storage slot holding the cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Settings a cart store is opened with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CartConfig {
    /// Storage slot the cart mirrors into.
    pub storage_key: String,
    /// Shipping rule applied to totals.
    pub shipping: ShippingPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            shipping: ShippingPolicy::default(),
        }
    }
}

impl CartConfig {
    /// Use a different storage slot.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Use a different shipping rule.
    pub fn with_shipping(mut self, shipping: ShippingPolicy) -> Self {
        self.shipping = shipping;
        self
    }
}
