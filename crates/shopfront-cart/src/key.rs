//! Cart line identity keys.

use crate::ids::{ProductId, VariantId};
use std::fmt;

/// Separator between product and variant in a rendered composite key.
///
/// Product ids never contain it (see [`ProductId::validate`]); variant ids may.
pub const KEY_SEPARATOR: char = ':';

/// The identity of a cart line: a product, or a product in a chosen variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LineKey {
    /// A product without a selected variant.
    Product(ProductId),
    /// A product with a selected variant.
    Variant(ProductId, VariantId),
}

impl LineKey {
    /// Build the key for a product and optional variant.
    pub fn new(product_id: ProductId, variant_id: Option<VariantId>) -> Self {
        match variant_id {
            Some(variant_id) => LineKey::Variant(product_id, variant_id),
            None => LineKey::Product(product_id),
        }
    }

    /// The product half of the key.
    pub fn product_id(&self) -> &ProductId {
        match self {
            LineKey::Product(id) | LineKey::Variant(id, _) => id,
        }
    }

    /// The variant half of the key, if any.
    pub fn variant_id(&self) -> Option<&VariantId> {
        match self {
            LineKey::Product(_) => None,
            LineKey::Variant(_, variant) => Some(variant),
        }
    }

    /// Check a textual key against this line identity.
    ///
    /// Accepts the rendered key itself or, for lines added before variants
    /// existed, the bare product id.
    pub fn matches(&self, key: &str) -> bool {
        self.product_id().as_str() == key || self.matches_exact(key)
    }

    /// Check a textual key against the rendered form only.
    pub fn matches_exact(&self, key: &str) -> bool {
        match self {
            LineKey::Product(id) => id.as_str() == key,
            LineKey::Variant(id, variant) => key
                .strip_prefix(id.as_str())
                .and_then(|rest| rest.strip_prefix(KEY_SEPARATOR))
                .is_some_and(|v| v == variant.as_str()),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKey::Product(id) => write!(f, "{id}"),
            LineKey::Variant(id, variant) => write!(f, "{id}{KEY_SEPARATOR}{variant}"),
        }
    }
}
