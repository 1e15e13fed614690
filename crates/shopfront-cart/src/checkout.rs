//! Order requests built from the cart.
//!
//! The shop backend prices orders itself, so a request only carries
//! product and variant ids with quantities plus the customer's contact
//! details.

use crate::cart::CartLine;
use crate::error::CheckoutError;
use crate::ids::{ProductId, VariantId};
use serde::{Deserialize, Serialize};

/// Maximum length of the customer name column.
pub const MAX_CUSTOMER_NAME_LEN: usize = 200;

/// Maximum length of the customer phone column.
pub const MAX_CUSTOMER_PHONE_LEN: usize = 20;

/// Contact and delivery details entered at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Delivery address.
    #[serde(default)]
    pub address: Option<String>,
    /// Note for the shop.
    #[serde(default)]
    pub notes: Option<String>,
}

impl Customer {
    /// Create a customer with the required fields.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Check required fields and column widths.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let name = self.name.trim();
        let phone = self.phone.trim();

        if name.is_empty() {
            return Err(CheckoutError::MissingField("customer name"));
        }
        if phone.is_empty() {
            return Err(CheckoutError::MissingField("customer phone"));
        }
        if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
            return Err(CheckoutError::FieldTooLong {
                field: "customer name",
                max: MAX_CUSTOMER_NAME_LEN,
            });
        }
        if phone.chars().count() > MAX_CUSTOMER_PHONE_LEN {
            return Err(CheckoutError::FieldTooLong {
                field: "customer phone",
                max: MAX_CUSTOMER_PHONE_LEN,
            });
        }
        Ok(())
    }
}

/// One item of an order request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemRequest {
    /// Product ordered.
    pub product_id: ProductId,
    /// Variant ordered, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    /// Quantity.
    pub quantity: u32,
}

/// Body of the backend's order-create call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub notes: String,
    pub items: Vec<OrderItemRequest>,
}

impl OrderRequest {
    /// Build a request from cart lines.
    ///
    /// Lines without a usable price are left out; an order with no
    /// remaining items is rejected.
    pub fn from_lines(lines: &[CartLine], customer: &Customer) -> Result<Self, CheckoutError> {
        customer.validate()?;

        let items = lines
            .iter()
            .filter(|line| line.has_valid_price())
            .map(|line| {
                if line.quantity < 1 {
                    return Err(CheckoutError::InvalidQuantity {
                        product_id: line.id.to_string(),
                        quantity: line.quantity,
                    });
                }
                Ok(OrderItemRequest {
                    product_id: line.id.clone(),
                    variant_id: line.variant.as_ref().map(|v| v.id.clone()),
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            customer_name: customer.name.trim().to_string(),
            customer_phone: customer.phone.trim().to_string(),
            customer_email: customer.email.clone().unwrap_or_default(),
            delivery_address: customer.address.clone().unwrap_or_default(),
            notes: customer.notes.clone().unwrap_or_default(),
            items,
        })
    }

    /// Total units across all items.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductDescriptor, SelectedVariant};
    use serde_json::json;

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine::from_product(&ProductDescriptor::new("1", "Kafa", 900.0), 2),
            CartLine::from_product(
                &ProductDescriptor::new("2", "Čaj", 300.0)
                    .with_variant(SelectedVariant::new("5", "Zeleni")),
                1,
            ),
        ]
    }

    #[test]
    fn test_order_request_shape() {
        let mut customer = Customer::new("Ana Anić", "0601234567");
        customer.address = Some("Knez Mihailova 1".to_string());

        let order = OrderRequest::from_lines(&lines(), &customer).unwrap();
        assert_eq!(order.unit_count(), 3);

        let body = serde_json::to_value(&order).unwrap();
        assert_eq!(body["customer_name"], json!("Ana Anić"));
        assert_eq!(body["customer_email"], json!(""));
        assert_eq!(body["delivery_address"], json!("Knez Mihailova 1"));
        assert_eq!(
            body["items"],
            json!([
                {"product_id": "1", "quantity": 2},
                {"product_id": "2", "variant_id": "5", "quantity": 1}
            ])
        );
    }

    #[test]
    fn test_empty_cart_rejected() {
        let customer = Customer::new("Ana", "060");
        assert_eq!(
            OrderRequest::from_lines(&[], &customer),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_lines_without_price_skipped() {
        let mut broken = ProductDescriptor::new("3", "Med", 0.0);
        broken.price = json!(null);

        let customer = Customer::new("Ana", "060");
        let only_broken = vec![CartLine::from_product(&broken, 1)];
        assert_eq!(
            OrderRequest::from_lines(&only_broken, &customer),
            Err(CheckoutError::EmptyCart)
        );

        let mut mixed = lines();
        mixed.push(CartLine::from_product(&broken, 1));
        let order = OrderRequest::from_lines(&mixed, &customer).unwrap();
        assert_eq!(order.items.len(), 2);
    }

    #[test]
    fn test_customer_validation() {
        assert_eq!(
            Customer::new("  ", "060").validate(),
            Err(CheckoutError::MissingField("customer name"))
        );
        assert_eq!(
            Customer::new("Ana", "").validate(),
            Err(CheckoutError::MissingField("customer phone"))
        );
        assert!(matches!(
            Customer::new("Ana", "0".repeat(21)).validate(),
            Err(CheckoutError::FieldTooLong { max: 20, .. })
        ));
        assert!(Customer::new("Ana", "+381 60 123 4567").validate().is_ok());
    }

    #[test]
    fn test_zero_quantity_line_rejected() {
        let mut lines = lines();
        lines[0].quantity = 0;

        let result = OrderRequest::from_lines(&lines, &Customer::new("Ana", "060"));
        assert!(matches!(
            result,
            Err(CheckoutError::InvalidQuantity { quantity: 0, .. })
        ));
    }
}
