//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shopfront_cart::config::DEFAULT_STORAGE_KEY;
use shopfront_cart::{CartConfig, ShippingPolicy};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shopfront.toml", ".shopfront.toml", "shopfront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where the cart is stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shipping rule.
    #[serde(default)]
    pub shipping: ShippingPolicy,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Settings for the cart store.
    pub fn cart_config(&self) -> CartConfig {
        CartConfig::default()
            .with_storage_key(self.storage.cart_key.clone())
            .with_shipping(self.shipping)
    }

    /// Collect configuration errors.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = shopfront_storage::validate_key(&self.storage.cart_key) {
            errors.push(format!("storage.cart_key: {}", e));
        }
        if self.storage.dir.as_os_str().is_empty() {
            errors.push("storage.dir is required".to_string());
        }
        if !self.shipping.flat_fee.is_finite() || self.shipping.flat_fee < 0.0 {
            errors.push("shipping.flat_fee must be a non-negative number".to_string());
        }
        if !self.shipping.free_over.is_finite() || self.shipping.free_over < 0.0 {
            errors.push("shipping.free_over must be a non-negative number".to_string());
        }

        errors
    }
}

/// Cart storage location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the storage slots.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,

    /// Slot holding the cart.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".shopfront")
}

fn default_cart_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Generate a default shopfront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Shopfront cart configuration

[storage]
# Directory holding the cart slot (relative to the working directory)
dir = ".shopfront"
cart_key = "cart"

[shipping]
# Orders above this subtotal ship free
free_over = 5000.0
flat_fee = 300.0
"#
    .to_string()
}
