//! Cart error types.
//!
//! None of these escape the cart store's mutating operations: the store
//! folds them into permissive defaults (drop the line, price of zero,
//! no-op). They are public so callers at the edges (catalog import,
//! checkout) can report them.

use thiserror::Error;

/// A price field that could not be turned into a finite number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    /// No price field present (or JSON `null`).
    #[error("Price is missing")]
    Missing,

    /// Price is not a number or a numeric string.
    #[error("Price is not numeric: {0}")]
    NotNumeric(String),

    /// Price parsed to NaN or infinity.
    #[error("Price is not finite")]
    NotFinite,
}

/// A stored cart record that cannot become a cart line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    /// Record is not a JSON object.
    #[error("Cart record is not an object")]
    NotAnObject,

    /// Record has no usable product id.
    #[error("Cart record has no product id")]
    MissingId,

    /// Record has no usable unit price.
    #[error("Cart record for {id} has an invalid price: {source}")]
    InvalidPrice {
        id: String,
        #[source]
        source: PriceError,
    },

    /// Record has a quantity below one.
    #[error("Cart record for {id} has quantity {quantity}")]
    InvalidQuantity { id: String, quantity: i64 },

    /// Record does not match the cart line shape.
    #[error("Malformed cart record: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for LineError {
    fn from(e: serde_json::Error) -> Self {
        LineError::Malformed(e.to_string())
    }
}

/// Errors raised while turning a cart into an order request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    /// The cart has no orderable lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A required customer field is blank.
    #[error("Checkout incomplete: missing {0}")]
    MissingField(&'static str),

    /// A customer field exceeds the backend's column width.
    #[error("{field} is longer than {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    /// An item quantity is below one.
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: u32 },
}
