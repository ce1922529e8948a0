//! Basket
//!
//! The quantity model shared by the storefront cart and the POS ticket: an
//! ordered collection of product lines, keyed by product id, whose
//! quantities respect last-known stock ceilings. Invalid input never
//! raises; it degrades to a no-op or to the nearest valid clamped state.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{
    ids::ProductId,
    products::Product,
    quantity::{clamp, merge_caps, normalize_cap, units},
};

/// One product's presence in a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Product identity; unique within a basket.
    pub product_id: ProductId,

    /// Display description copied from the product at add-time.
    #[serde(default)]
    pub description: String,

    /// Unit price copied from the product at add-time.
    #[serde(default)]
    pub unit_price: f64,

    /// Current quantity; at least one while the line exists.
    pub quantity: i64,

    /// Last-known stock ceiling; `None` means unlimited.
    #[serde(default)]
    pub max_quantity: Option<i64>,

    /// Primary image URL copied from the product at add-time.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Line {
    fn from_product(product: &Product, quantity: i64, max_quantity: Option<i64>) -> Self {
        Self {
            product_id: product.product_id,
            description: product.description.clone(),
            unit_price: product.unit_price,
            quantity,
            max_quantity,
            image_url: product.image_url.clone(),
        }
    }

    /// Line total at the copied unit price.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.unit_price * units(self.quantity)
    }
}

/// Basket mutation event, for reducer-style call sites.
#[derive(Debug, Clone, PartialEq)]
pub enum BasketEvent {
    /// Add a product with the requested quantity.
    Add {
        /// Catalog row the line is copied from.
        product: Product,
        /// Requested quantity, before clamping.
        quantity: i64,
    },

    /// Increase a line's quantity by one.
    Increment(ProductId),

    /// Decrease a line's quantity by one, stopping at one.
    Decrement(ProductId),

    /// Set an absolute quantity for a line.
    SetQuantity {
        /// Line to adjust.
        product_id: ProductId,
        /// Requested quantity, before clamping.
        quantity: i64,
    },

    /// Remove a line unconditionally.
    Remove(ProductId),

    /// Remove every line.
    Clear,

    /// Re-clamp every line against freshly reported stock.
    ReconcileStock(FxHashMap<ProductId, i64>),
}

/// Ordered collection of product lines with clamped quantities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    lines: Vec<Line>,
}

impl Basket {
    /// Create an empty basket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a basket from a decoded snapshot, discarding invalid lines.
    ///
    /// Lines with non-positive ids or duplicated ids (first occurrence
    /// wins) are dropped; ceilings are normalized and quantities re-clamped,
    /// dropping lines whose reconciled quantity is zero.
    #[must_use]
    pub fn from_lines(lines: Vec<Line>) -> Self {
        let mut seen = FxHashSet::default();
        let mut kept = Vec::with_capacity(lines.len());

        for mut line in lines {
            if !line.product_id.is_valid() || !seen.insert(line.product_id) {
                continue;
            }

            line.max_quantity = normalize_cap(line.max_quantity);
            line.quantity = clamp(line.quantity, line.max_quantity);

            if line.quantity > 0 {
                kept.push(line);
            }
        }

        Self { lines: kept }
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether the basket has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn count(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of quantity times unit price across all lines.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(Line::amount).sum()
    }

    /// Add a product, merging with an existing line for the same id.
    ///
    /// Quantities accumulate and clamp against the merged ceiling, where
    /// the stricter of the old and newly reported ceilings wins. A request
    /// that clamps to zero adds nothing.
    pub fn add(&mut self, product: &Product, quantity: i64) {
        if !product.product_id.is_valid() {
            return;
        }

        let cap = normalize_cap(product.stock_on_hand);
        let added = clamp(quantity, cap);

        if added == 0 {
            return;
        }

        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.product_id)
        {
            Some(line) => {
                line.max_quantity = merge_caps(line.max_quantity, cap);
                line.quantity = clamp(line.quantity + added, line.max_quantity);
            }
            None => self.lines.push(Line::from_product(product, added, cap)),
        }

        self.prune();
    }

    /// Increase a line's quantity by one. Unknown ids are a no-op.
    pub fn increment(&mut self, product_id: ProductId) {
        if let Some(current) = self.quantity_of(product_id) {
            self.set_quantity(product_id, current + 1);
        }
    }

    /// Decrease a line's quantity by one, stopping at one.
    ///
    /// Going to zero requires [`Basket::remove`]. Unknown ids are a no-op.
    pub fn decrement(&mut self, product_id: ProductId) {
        if let Some(current) = self.quantity_of(product_id) {
            self.set_quantity(product_id, current - 1);
        }
    }

    /// Set an absolute quantity for a line, clamped to its ceiling.
    ///
    /// A ceiling of zero removes the line; an unknown or invalid id is a
    /// no-op.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if !product_id.is_valid() {
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = clamp(quantity, line.max_quantity);
        }

        self.prune();
    }

    /// Remove a line unconditionally. Removing an absent id is a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Re-clamp every line against freshly reported stock.
    ///
    /// Lines with a report adopt it as their new ceiling (a report of zero
    /// drops the line); lines without one keep their current ceiling.
    pub fn reconcile_stock(&mut self, fresh_stock: &FxHashMap<ProductId, i64>) {
        for line in &mut self.lines {
            if let Some(stock) = fresh_stock.get(&line.product_id) {
                line.max_quantity = normalize_cap(Some(*stock));
                line.quantity = clamp(line.quantity, line.max_quantity);
            }
        }

        self.prune();
    }

    /// Apply a mutation event, reducer style.
    pub fn apply(&mut self, event: BasketEvent) {
        match event {
            BasketEvent::Add { product, quantity } => self.add(&product, quantity),
            BasketEvent::Increment(product_id) => self.increment(product_id),
            BasketEvent::Decrement(product_id) => self.decrement(product_id),
            BasketEvent::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(product_id, quantity),
            BasketEvent::Remove(product_id) => self.remove(product_id),
            BasketEvent::Clear => self.clear(),
            BasketEvent::ReconcileStock(stock) => self.reconcile_stock(&stock),
        }
    }

    fn quantity_of(&self, product_id: ProductId) -> Option<i64> {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
    }

    fn prune(&mut self) {
        self.lines
            .retain(|line| line.max_quantity != Some(0) && line.quantity > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64, stock: Option<i64>) -> Product {
        Product {
            product_id: ProductId::new(id),
            category_id: None,
            code: None,
            description: format!("Product {id}"),
            unit_price: price,
            stock_on_hand: stock,
            image_url: None,
        }
    }

    fn stock_map(entries: &[(i64, i64)]) -> FxHashMap<ProductId, i64> {
        entries
            .iter()
            .map(|(id, stock)| (ProductId::new(*id), *stock))
            .collect()
    }

    #[test]
    fn add_clamps_to_reported_stock() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(5)), 8);

        assert_eq!(basket.count(), 5);
        assert_eq!(basket.lines()[0].max_quantity, Some(5));
    }

    #[test]
    fn add_without_stock_report_is_unlimited() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, None), 40);

        assert_eq!(basket.count(), 40);
        assert_eq!(basket.lines()[0].max_quantity, None);
    }

    #[test]
    fn add_same_product_accumulates_then_clamps() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(5)), 3);
        basket.add(&product(1, 10.0, Some(5)), 4);

        assert_eq!(basket.len(), 1);
        assert_eq!(basket.count(), 5);
        assert_eq!(basket.subtotal(), 50.0);
    }

    #[test]
    fn add_merges_the_stricter_cap() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(5)), 2);
        basket.add(&product(1, 10.0, Some(3)), 1);

        assert_eq!(basket.lines()[0].max_quantity, Some(3));
        assert_eq!(basket.lines()[0].quantity, 3);
    }

    #[test]
    fn add_out_of_stock_product_is_a_noop() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(0)), 2);

        assert!(basket.is_empty());
    }

    #[test]
    fn add_invalid_product_id_is_a_noop() {
        let mut basket = Basket::new();

        basket.add(&product(0, 10.0, Some(5)), 1);
        basket.add(&product(-3, 10.0, Some(5)), 1);

        assert!(basket.is_empty());
    }

    #[test]
    fn add_zero_request_behaves_as_one() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(5)), 0);

        assert_eq!(basket.count(), 1);
    }

    #[test]
    fn increment_respects_the_cap() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(2)), 2);
        basket.increment(ProductId::new(1));

        assert_eq!(basket.count(), 2);
    }

    #[test]
    fn decrement_stops_at_one() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, None), 1);
        basket.decrement(ProductId::new(1));

        assert_eq!(basket.count(), 1);
    }

    #[test]
    fn increment_unknown_id_is_a_noop() {
        let mut basket = Basket::new();

        basket.increment(ProductId::new(9));

        assert!(basket.is_empty());
    }

    #[test]
    fn set_quantity_clamps_into_range() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(4)), 1);

        basket.set_quantity(ProductId::new(1), 9);
        assert_eq!(basket.count(), 4);

        basket.set_quantity(ProductId::new(1), -2);
        assert_eq!(basket.count(), 1);
    }

    #[test]
    fn set_quantity_unknown_id_is_a_noop() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, None), 2);
        basket.set_quantity(ProductId::new(2), 5);

        assert_eq!(basket.count(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, None), 2);

        basket.remove(ProductId::new(1));
        let after_first = basket.clone();
        basket.remove(ProductId::new(1));

        assert!(basket.is_empty());
        assert_eq!(basket, after_first);
    }

    #[test]
    fn clear_empties_the_basket() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, None), 2);
        basket.add(&product(2, 4.0, None), 1);
        basket.clear();

        assert!(basket.is_empty());
        assert_eq!(basket.subtotal(), 0.0);
    }

    #[test]
    fn reconcile_adopts_fresh_stock() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(10)), 8);
        basket.reconcile_stock(&stock_map(&[(1, 3)]));

        assert_eq!(basket.lines()[0].max_quantity, Some(3));
        assert_eq!(basket.count(), 3);
    }

    #[test]
    fn reconcile_zero_stock_drops_the_line() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(5)), 5);
        basket.reconcile_stock(&stock_map(&[(1, 0)]));

        assert!(basket.is_empty());
        assert_eq!(basket.subtotal(), 0.0);
    }

    #[test]
    fn reconcile_keeps_caps_for_unreported_lines() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, Some(5)), 2);
        basket.add(&product(2, 6.0, None), 3);
        basket.reconcile_stock(&stock_map(&[(1, 4)]));

        assert_eq!(basket.lines()[0].max_quantity, Some(4));
        assert_eq!(basket.lines()[1].max_quantity, None);
        assert_eq!(basket.count(), 5);
    }

    #[test]
    fn count_and_subtotal_follow_the_lines() {
        let mut basket = Basket::new();

        basket.add(&product(1, 10.0, None), 3);
        basket.add(&product(2, 2.5, None), 4);

        assert_eq!(basket.count(), 7);
        assert_eq!(basket.subtotal(), 40.0);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut basket = Basket::new();

        basket.add(&product(3, 1.0, None), 1);
        basket.add(&product(1, 1.0, None), 1);
        basket.add(&product(2, 1.0, None), 1);

        let ids: Vec<i64> = basket
            .lines()
            .iter()
            .map(|line| line.product_id.get())
            .collect();

        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn from_lines_drops_invalid_entries() {
        let lines = vec![
            Line {
                product_id: ProductId::new(1),
                description: "kept".to_string(),
                unit_price: 10.0,
                quantity: 9,
                max_quantity: Some(5),
                image_url: None,
            },
            Line {
                product_id: ProductId::new(0),
                description: "invalid id".to_string(),
                unit_price: 10.0,
                quantity: 1,
                max_quantity: None,
                image_url: None,
            },
            Line {
                product_id: ProductId::new(2),
                description: "out of stock".to_string(),
                unit_price: 10.0,
                quantity: 1,
                max_quantity: Some(0),
                image_url: None,
            },
            Line {
                product_id: ProductId::new(1),
                description: "duplicate".to_string(),
                unit_price: 10.0,
                quantity: 1,
                max_quantity: None,
                image_url: None,
            },
        ];

        let basket = Basket::from_lines(lines);

        assert_eq!(basket.len(), 1);
        assert_eq!(basket.lines()[0].description, "kept");
        assert_eq!(basket.lines()[0].quantity, 5);
    }

    #[test]
    fn apply_dispatches_events() {
        let mut basket = Basket::new();

        basket.apply(BasketEvent::Add {
            product: product(1, 10.0, Some(5)),
            quantity: 2,
        });
        basket.apply(BasketEvent::Increment(ProductId::new(1)));
        basket.apply(BasketEvent::ReconcileStock(stock_map(&[(1, 2)])));

        assert_eq!(basket.count(), 2);

        basket.apply(BasketEvent::Clear);

        assert!(basket.is_empty());
    }
}
