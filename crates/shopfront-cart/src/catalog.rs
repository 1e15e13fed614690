//! Product descriptors handed to the cart by the catalog.

use crate::error::PriceError;
use crate::ids::{ProductId, VariantId};
use crate::key::LineKey;
use crate::price::parse_price;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A variant chosen on the product page (e.g., "Large / Blue").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedVariant {
    /// Variant identifier.
    pub id: VariantId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Product price plus the variant's adjustment, as served.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub final_price: Value,
}

impl SelectedVariant {
    /// Create a variant descriptor without its own price.
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: None,
            final_price: Value::Null,
        }
    }
}

/// A product as the catalog presents it.
///
/// Field names follow the shop API's product serializer, so a product
/// fetched from the backend deserializes directly. Prices stay raw JSON
/// until the cart snapshots them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDescriptor {
    /// Product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// List price.
    #[serde(default)]
    pub price: Value,
    /// Effective price (sale price while on sale).
    #[serde(default)]
    pub current_price: Value,
    /// Primary image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Category label.
    #[serde(default)]
    pub category_name: Option<String>,
    /// Variant chosen by the shopper, if any.
    #[serde(default)]
    pub selected_variant: Option<SelectedVariant>,
}

impl ProductDescriptor {
    /// Create a descriptor with a single numeric price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Value::from(price),
            current_price: Value::Null,
            image: None,
            category_name: None,
            selected_variant: None,
        }
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_name = Some(category.into());
        self
    }

    /// Select a variant.
    pub fn with_variant(mut self, variant: SelectedVariant) -> Self {
        self.selected_variant = Some(variant);
        self
    }

    /// Identity key of the line this product would occupy in the cart.
    pub fn line_key(&self) -> LineKey {
        LineKey::new(
            self.id.clone(),
            self.selected_variant.as_ref().map(|v| v.id.clone()),
        )
    }

    /// Resolve the unit price to charge.
    ///
    /// Preference order: the selected variant's final price, the product's
    /// current price, the list price. The first field that is present
    /// decides; a present but malformed field is an error rather than a
    /// fall-through.
    pub fn unit_price(&self) -> Result<f64, PriceError> {
        let variant_price = self
            .selected_variant
            .as_ref()
            .map(|v| &v.final_price)
            .filter(|p| !p.is_null());

        let source = variant_price
            .or(Some(&self.current_price).filter(|p| !p.is_null()))
            .unwrap_or(&self.price);

        parse_price(source)
    }
}
