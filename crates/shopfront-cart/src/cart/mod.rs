//! Shopping cart module.
//!
//! Contains the cart line type, the persisted cart store and its pricing.

mod line;
mod pricing;
mod store;

pub use line::CartLine;
pub use pricing::{CartSummary, ShippingPolicy, DEFAULT_FREE_SHIPPING_OVER, DEFAULT_SHIPPING_FEE};
pub use store::CartStore;
