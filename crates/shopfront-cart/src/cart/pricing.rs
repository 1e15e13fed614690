//! Cart pricing: shipping rule and totals snapshot.

use serde::{Deserialize, Serialize};

/// Default subtotal above which shipping is free.
pub const DEFAULT_FREE_SHIPPING_OVER: f64 = 5000.0;

/// Default flat shipping fee.
pub const DEFAULT_SHIPPING_FEE: f64 = 300.0;

/// Flat-fee shipping with a free-shipping threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_over: f64,
    /// Fee charged otherwise.
    pub flat_fee: f64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_over: DEFAULT_FREE_SHIPPING_OVER,
            flat_fee: DEFAULT_SHIPPING_FEE,
        }
    }
}

impl ShippingPolicy {
    /// Shipping owed for a cart. An empty cart owes nothing.
    pub fn shipping_for(&self, subtotal: f64, is_empty: bool) -> f64 {
        if is_empty || subtotal > self.free_over {
            0.0
        } else {
            self.flat_fee
        }
    }

    /// Gap between the subtotal and the free-shipping threshold.
    ///
    /// Shipping is waived only once the subtotal *exceeds* the threshold,
    /// so the shopper must spend more than the returned amount. `Some(0.0)`
    /// means the subtotal sits exactly on the threshold and still pays.
    pub fn remaining_for_free_shipping(&self, subtotal: f64) -> Option<f64> {
        if subtotal > self.free_over {
            None
        } else {
            Some(self.free_over - subtotal)
        }
    }
}

/// Totals for a cart at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Number of distinct lines.
    pub lines: usize,
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of price times quantity.
    pub subtotal: f64,
    /// Shipping fee.
    pub shipping: f64,
    /// Subtotal plus shipping.
    pub grand_total: f64,
}

impl CartSummary {
    /// Check if shipping is waived.
    pub fn ships_free(&self) -> bool {
        self.lines > 0 && self.shipping == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_ships_free() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.shipping_for(0.0, true), 0.0);
    }

    #[test]
    fn test_flat_fee_below_threshold() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.shipping_for(1200.0, false), 300.0);
        // Threshold itself still pays
        assert_eq!(policy.shipping_for(5000.0, false), 300.0);
    }

    #[test]
    fn test_free_above_threshold() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.shipping_for(5000.01, false), 0.0);
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = ShippingPolicy {
            free_over: 1000.0,
            flat_fee: 150.0,
        };
        assert_eq!(policy.remaining_for_free_shipping(400.0), Some(600.0));
        assert_eq!(policy.remaining_for_free_shipping(1500.0), None);
    }

    #[test]
    fn test_remaining_at_threshold_still_pays() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.remaining_for_free_shipping(5000.0), Some(0.0));
        assert_eq!(policy.shipping_for(5000.0, false), 300.0);
    }

    #[test]
    fn test_partial_policy_deserializes_with_defaults() {
        let policy: ShippingPolicy = serde_json::from_str(r#"{"flat_fee": 250.0}"#).unwrap();
        assert_eq!(policy.flat_fee, 250.0);
        assert_eq!(policy.free_over, DEFAULT_FREE_SHIPPING_OVER);
    }
}
