//! Shopping cart state, pricing and persistence for Shopfront.
//!
//! - **Catalog**: product descriptors handed over by the catalog pages
//! - **Cart**: line items keyed by product (and variant), mirrored into a
//!   storage slot after every change
//! - **Checkout**: order requests for the shop backend
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_cart::prelude::*;
//! use shopfront_storage::FileStorage;
//!
//! let mut cart = CartStore::open(FileStorage::open(".shopfront")?);
//!
//! let kafa = ProductDescriptor::new("7", "Kafa 500g", 750.0).with_category("Napici");
//! cart.add(&kafa, 2);
//!
//! println!("{} items", cart.item_count());
//! println!("Total: {}", format_price(cart.grand_total()));
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod ids;
pub mod key;
pub mod price;

pub use cart::{CartLine, CartStore, CartSummary, ShippingPolicy};
pub use config::CartConfig;
pub use error::{CheckoutError, LineError, PriceError};
pub use ids::*;
pub use key::LineKey;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{CartLine, CartStore, CartSummary, ShippingPolicy};
    pub use crate::catalog::{ProductDescriptor, SelectedVariant};
    pub use crate::checkout::{Customer, OrderItemRequest, OrderRequest};
    pub use crate::config::CartConfig;
    pub use crate::error::{CheckoutError, LineError, PriceError};
    pub use crate::ids::*;
    pub use crate::key::LineKey;
    pub use crate::price::{format_price, parse_price, sale_percent};
}
