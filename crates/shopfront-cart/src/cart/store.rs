//! Cart store: the owned line list and its storage mirror.

use crate::cart::{CartLine, CartSummary};
use crate::catalog::ProductDescriptor;
use crate::checkout::{Customer, OrderRequest};
use crate::config::CartConfig;
use crate::error::CheckoutError;
use crate::ids::{ProductId, VariantId};
use crate::key::LineKey;
use serde_json::Value;
use shopfront_storage::Storage;
use tracing::{debug, info, warn};

/// Shopping cart state mirrored into a storage slot.
///
/// Every mutating operation writes the full line list back to storage
/// before returning. None of them report failure: malformed stored data
/// reads as an empty cart, unusable prices count as zero, invalid
/// quantity updates are ignored and storage write errors are logged.
///
/// # Example
///
/// ```rust,ignore
/// let mut cart = CartStore::open(FileStorage::open(".shopfront")?);
/// cart.add(&product, 2);
/// println!("{} items, {}", cart.item_count(), format_price(cart.grand_total()));
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    config: CartConfig,
    lines: Vec<CartLine>,
}

/// What the storage slot held.
enum Stored {
    Absent,
    Records(Vec<Value>),
    Unreadable,
}

impl<S: Storage> CartStore<S> {
    /// Open the cart held in `storage` with default settings.
    pub fn open(storage: S) -> Self {
        Self::open_with(storage, CartConfig::default())
    }

    /// Open the cart held in `storage`.
    ///
    /// Stored lines that break an invariant (unusable price, quantity
    /// below one, wrong shape) are dropped and lines sharing an identity
    /// key are merged. If the stored value changed as a result, the cleaned
    /// list is written back immediately.
    pub fn open_with(storage: S, config: CartConfig) -> Self {
        let mut store = Self {
            storage,
            config,
            lines: Vec::new(),
        };

        let mut dirty = false;
        match store.read() {
            Stored::Absent => {}
            Stored::Unreadable => dirty = true,
            Stored::Records(records) => {
                for record in &records {
                    match CartLine::try_from_stored(record) {
                        Ok(line) => dirty |= merge_line(&mut store.lines, line),
                        Err(e) => {
                            warn!(error = %e, "dropping invalid cart line");
                            dirty = true;
                        }
                    }
                }
            }
        }

        if dirty {
            info!(
                key = %store.config.storage_key,
                lines = store.lines.len(),
                "rewriting cleaned cart"
            );
            store.persist();
        }
        store
    }

    /// Re-read the storage slot, replacing the in-memory lines wholesale.
    ///
    /// No invariant checks run here; only records that cannot be read as a
    /// line at all are skipped. An absent or unreadable slot yields an
    /// empty cart.
    pub fn load(&mut self) {
        self.lines = match self.read() {
            Stored::Records(records) => records
                .into_iter()
                .filter_map(|record| match serde_json::from_value(record) {
                    Ok(line) => Some(line),
                    Err(e) => {
                        warn!(error = %e, "skipping unreadable cart record");
                        None
                    }
                })
                .collect(),
            Stored::Absent | Stored::Unreadable => Vec::new(),
        };
        debug!(lines = self.lines.len(), "cart loaded");
    }

    /// Add `quantity` of a product.
    ///
    /// Increments the existing line with the same identity key, or appends
    /// a new line snapshotting the product. A quantity of zero changes
    /// nothing. Returns the line's key.
    pub fn add(&mut self, product: &ProductDescriptor, quantity: u32) -> LineKey {
        let key = product.line_key();

        if quantity > 0 {
            match self.lines.iter_mut().find(|line| line.key() == key) {
                Some(line) => line.quantity = line.quantity.saturating_add(quantity),
                None => self.lines.push(CartLine::from_product(product, quantity)),
            }
            debug!(key = %key, quantity, "added to cart");
        }

        self.persist();
        key
    }

    /// Add a single unit of a product.
    pub fn add_one(&mut self, product: &ProductDescriptor) -> LineKey {
        self.add(product, 1)
    }

    /// Set the quantity of the line matching `key`.
    ///
    /// `key` is a rendered line key; if no line has exactly that key, the
    /// first line of the product named by `key` is used instead. Quantities
    /// below one and unknown keys are ignored. Returns whether a line
    /// changed.
    pub fn update_quantity(&mut self, key: &str, quantity: u32) -> bool {
        if quantity < 1 {
            debug!(key, "ignoring quantity update below one");
            return false;
        }

        let Some(index) = self.position(key) else {
            debug!(key, "no cart line to update");
            return false;
        };

        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = quantity;
        }
        self.persist();
        true
    }

    /// Add one unit to the line matching `key`.
    pub fn increase(&mut self, key: &str) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };

        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = line.quantity.saturating_add(1);
        }
        self.persist();
        true
    }

    /// Take one unit from the line matching `key`, never going below one.
    pub fn decrease(&mut self, key: &str) -> bool {
        let Some(line) = self
            .position(key)
            .and_then(|index| self.lines.get_mut(index))
        else {
            return false;
        };

        if line.quantity <= 1 {
            return false;
        }
        line.quantity -= 1;
        self.persist();
        true
    }

    /// Remove every line matching `key` (rendered key or bare product id).
    ///
    /// Returns the number of lines removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| !line.key().matches(key));
        let removed = before - self.lines.len();

        debug!(key, removed, "removed from cart");
        self.persist();
        removed
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line matching `key`, with the same lookup as [`Self::update_quantity`].
    pub fn get(&self, key: &str) -> Option<&CartLine> {
        self.position(key).and_then(|index| self.lines.get(index))
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity; unusable prices count as zero.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Same as [`Self::total`], named for display next to shipping.
    pub fn subtotal(&self) -> f64 {
        self.total()
    }

    /// Shipping owed under the configured policy.
    pub fn shipping(&self) -> f64 {
        self.config
            .shipping
            .shipping_for(self.subtotal(), self.is_empty())
    }

    /// Subtotal plus shipping.
    pub fn grand_total(&self) -> f64 {
        self.subtotal() + self.shipping()
    }

    /// Snapshot of counts and amounts.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self.unique_item_count(),
            item_count: self.item_count(),
            subtotal: self.subtotal(),
            shipping: self.shipping(),
            grand_total: self.grand_total(),
        }
    }

    /// Check if a product is in the cart.
    ///
    /// With a variant, only the exact product and variant line counts;
    /// without one, any line of the product does.
    pub fn is_in_cart(&self, product_id: &ProductId, variant_id: Option<&VariantId>) -> bool {
        match variant_id {
            Some(variant_id) => {
                let key = LineKey::Variant(product_id.clone(), variant_id.clone());
                self.lines.iter().any(|line| line.key() == key)
            }
            None => self.lines.iter().any(|line| &line.id == product_id),
        }
    }

    /// Build the order request for the current lines.
    pub fn checkout(&self, customer: &Customer) -> Result<OrderRequest, CheckoutError> {
        OrderRequest::from_lines(&self.lines, customer)
    }

    /// Settings this store was opened with.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.key().matches_exact(key))
            .or_else(|| {
                self.lines
                    .iter()
                    .position(|line| line.id.as_str() == key)
            })
    }

    fn read(&self) -> Stored {
        match self.storage.get::<Vec<Value>>(&self.config.storage_key) {
            Ok(Some(records)) => Stored::Records(records),
            Ok(None) => Stored::Absent,
            Err(e) => {
                warn!(key = %self.config.storage_key, error = %e, "cart storage unreadable");
                Stored::Unreadable
            }
        }
    }

    /// Write the valid lines back to storage, one record per identity key.
    ///
    /// Lines kept by [`Self::load`] may break the line invariants or share
    /// a key; those never reach storage. Duplicates are written as a single
    /// record carrying their combined quantity.
    fn persist(&self) {
        let mut records: Vec<CartLine> = Vec::with_capacity(self.lines.len());
        for line in self.lines.iter().filter(|line| line.validate().is_ok()) {
            merge_line(&mut records, line.clone());
        }

        if let Err(e) = self.storage.set(&self.config.storage_key, &records) {
            warn!(key = %self.config.storage_key, error = %e, "failed to persist cart");
        }
    }
}

/// Append `line`, or add its quantity to the line already holding its key.
///
/// Returns true if the line was merged.
fn merge_line(lines: &mut Vec<CartLine>, line: CartLine) -> bool {
    let key = line.key();
    match lines.iter_mut().find(|existing| existing.key() == key) {
        Some(existing) => {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            true
        }
        None => {
            lines.push(line);
            false
        }
    }
}
