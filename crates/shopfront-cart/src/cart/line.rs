//! Cart line type.

use crate::catalog::{ProductDescriptor, SelectedVariant};
use crate::error::LineError;
use crate::ids::ProductId;
use crate::key::LineKey;
use crate::price::{self, parse_price, price_or_zero};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One purchasable entry in the cart.
///
/// Display fields are a snapshot taken when the product was added; later
/// catalog changes do not reach lines already in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product identifier.
    pub id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    /// Unit price. NaN when the source price could not be parsed.
    #[serde(with = "price::lenient", default = "price::lenient::missing")]
    pub price: f64,
    /// Image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Selected variant, if the product was added in a specific variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<SelectedVariant>,
    /// Quantity.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl CartLine {
    /// Snapshot a product into a new line.
    ///
    /// An unparseable price is kept as NaN: the line still shows in the
    /// cart, contributes zero to totals and is never persisted.
    pub fn from_product(product: &ProductDescriptor, quantity: u32) -> Self {
        let price = product.unit_price().unwrap_or_else(|e| {
            tracing::warn!(product = %product.id, error = %e, "product has no usable price");
            f64::NAN
        });

        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price,
            image: product.image.clone(),
            category: product.category_name.clone(),
            variant: product.selected_variant.clone(),
            quantity,
        }
    }

    /// Parse a stored record, rejecting anything that breaks a line invariant.
    pub fn try_from_stored(record: &Value) -> Result<Self, LineError> {
        let fields = record.as_object().ok_or(LineError::NotAnObject)?;

        let id = match fields.get("id") {
            None | Some(Value::Null) => return Err(LineError::MissingId),
            Some(raw) => ProductId::deserialize(raw).map_err(|_| LineError::MissingId)?,
        };

        parse_price(fields.get("price").unwrap_or(&Value::Null)).map_err(|source| {
            LineError::InvalidPrice {
                id: id.to_string(),
                source,
            }
        })?;

        if let Some(quantity) = fields.get("quantity").and_then(Value::as_i64) {
            if quantity < 1 {
                return Err(LineError::InvalidQuantity {
                    id: id.to_string(),
                    quantity,
                });
            }
        }

        let line: CartLine = serde_json::from_value(record.clone())?;
        line.validate()?;
        Ok(line)
    }

    /// Identity key of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.id.clone(), self.variant.as_ref().map(|v| v.id.clone()))
    }

    /// Check the line invariants: finite price, quantity of at least one.
    pub fn validate(&self) -> Result<(), LineError> {
        if !self.price.is_finite() {
            return Err(LineError::InvalidPrice {
                id: self.id.to_string(),
                source: crate::error::PriceError::NotFinite,
            });
        }
        if self.quantity < 1 {
            return Err(LineError::InvalidQuantity {
                id: self.id.to_string(),
                quantity: i64::from(self.quantity),
            });
        }
        Ok(())
    }

    /// Check if the price is usable.
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite()
    }

    /// Price times quantity; an unusable price counts as zero.
    pub fn line_total(&self) -> f64 {
        price_or_zero(self.price) * f64::from(self.quantity)
    }

    /// Variant display name, if any.
    pub fn variant_name(&self) -> Option<&str> {
        self.variant.as_ref().map(|v| v.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_product_snapshots_fields() {
        let product = ProductDescriptor::new("7", "Kafa", 900.0)
            .with_image("/media/kafa.jpg")
            .with_category("Napici")
            .with_variant(SelectedVariant::new("3", "1kg"));

        let line = CartLine::from_product(&product, 2);
        assert_eq!(line.name, "Kafa");
        assert_eq!(line.price, 900.0);
        assert_eq!(line.image.as_deref(), Some("/media/kafa.jpg"));
        assert_eq!(line.category.as_deref(), Some("Napici"));
        assert_eq!(line.variant_name(), Some("1kg"));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.key().to_string(), "7:3");
    }

    #[test]
    fn test_from_product_with_bad_price() {
        let mut product = ProductDescriptor::new("7", "Kafa", 0.0);
        product.price = json!("n/a");

        let line = CartLine::from_product(&product, 1);
        assert!(!line.has_valid_price());
        assert_eq!(line.line_total(), 0.0);
    }

    #[test]
    fn test_try_from_stored_valid() {
        let line = CartLine::try_from_stored(&json!({
            "id": 4,
            "name": "Med",
            "price": "450.50",
            "image": null,
            "quantity": 2
        }))
        .unwrap();

        assert_eq!(line.id.as_str(), "4");
        assert_eq!(line.price, 450.5);
        assert_eq!(line.line_total(), 901.0);
    }

    #[test]
    fn test_try_from_stored_missing_price() {
        let result = CartLine::try_from_stored(&json!({"id": 4, "name": "Med", "quantity": 1}));
        assert!(matches!(result, Err(LineError::InvalidPrice { .. })));

        let result = CartLine::try_from_stored(&json!({"id": 4, "price": null, "quantity": 1}));
        assert!(matches!(result, Err(LineError::InvalidPrice { .. })));
    }

    #[test]
    fn test_try_from_stored_rejects_shape_errors() {
        assert_eq!(
            CartLine::try_from_stored(&json!([1, 2])),
            Err(LineError::NotAnObject)
        );
        assert_eq!(
            CartLine::try_from_stored(&json!({"price": 10})),
            Err(LineError::MissingId)
        );
        assert!(matches!(
            CartLine::try_from_stored(&json!({"id": 1, "price": 10, "quantity": 0})),
            Err(LineError::InvalidQuantity { quantity: 0, .. })
        ));
        assert!(matches!(
            CartLine::try_from_stored(&json!({"id": 1, "price": 10, "quantity": "two"})),
            Err(LineError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_quantity_defaults_to_one() {
        let line = CartLine::try_from_stored(&json!({"id": 1, "price": 10})).unwrap();
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_invalid_price_serializes_as_null() {
        let mut line = CartLine::try_from_stored(&json!({"id": 1, "price": 10})).unwrap();
        line.price = f64::NAN;

        let value = serde_json::to_value(&line).unwrap();
        assert!(value["price"].is_null());
    }
}
