//! Per-tenant persistent baskets.

use std::sync::{Arc, RwLock};

use kiosk::{
    basket::{Basket, Line},
    ids::{ProductId, TenantId},
    products::Product,
};
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::storage::KeyValueStore;

/// A basket bound to durable storage, scoped by tenant.
///
/// With no active scope every mutation is a no-op and reads see an empty
/// basket. Each mutation persists the full line snapshot, best-effort.
pub struct BasketStore {
    storage: Arc<dyn KeyValueStore>,
    prefix: &'static str,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    tenant_id: Option<TenantId>,
    basket: Basket,
}

impl BasketStore {
    /// Storefront cart store.
    pub fn cart(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(storage, "cart")
    }

    /// Point-of-sale ticket store.
    pub fn ticket(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(storage, "ticket")
    }

    fn new(storage: Arc<dyn KeyValueStore>, prefix: &'static str) -> Self {
        Self {
            storage,
            prefix,
            state: RwLock::new(State::default()),
        }
    }

    /// Switch the active tenant scope, reloading its persisted snapshot.
    ///
    /// Non-positive ids count as "no scope".
    pub fn set_tenant(&self, tenant_id: Option<TenantId>) {
        let tenant_id = tenant_id.filter(|id| id.is_valid());
        let basket = tenant_id.map_or_else(Basket::new, |id| self.load(id));

        if let Ok(mut state) = self.state.write() {
            state.tenant_id = tenant_id;
            state.basket = basket;
        }
    }

    /// Active tenant scope.
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.state.read().ok().and_then(|state| state.tenant_id)
    }

    /// Lines in display order.
    pub fn lines(&self) -> Vec<Line> {
        self.state
            .read()
            .map(|state| state.basket.lines().to_vec())
            .unwrap_or_default()
    }

    /// Total quantity across lines.
    pub fn count(&self) -> i64 {
        self.state.read().map(|state| state.basket.count()).unwrap_or_default()
    }

    /// Sum of quantity times unit price across lines.
    pub fn subtotal(&self) -> f64 {
        self.state
            .read()
            .map(|state| state.basket.subtotal())
            .unwrap_or_default()
    }

    /// Whether the basket has no lines.
    pub fn is_empty(&self) -> bool {
        self.state
            .read()
            .map(|state| state.basket.is_empty())
            .unwrap_or(true)
    }

    /// Add a product; see the basket model for the merge semantics.
    pub fn add(&self, product: &Product, quantity: i64) {
        self.mutate(|basket| basket.add(product, quantity));
    }

    /// Increase a line's quantity by one.
    pub fn increment(&self, product_id: ProductId) {
        self.mutate(|basket| basket.increment(product_id));
    }

    /// Decrease a line's quantity by one, stopping at one.
    pub fn decrement(&self, product_id: ProductId) {
        self.mutate(|basket| basket.decrement(product_id));
    }

    /// Set an absolute quantity for a line.
    pub fn set_quantity(&self, product_id: ProductId, quantity: i64) {
        self.mutate(|basket| basket.set_quantity(product_id, quantity));
    }

    /// Remove a line unconditionally.
    pub fn remove(&self, product_id: ProductId) {
        self.mutate(|basket| basket.remove(product_id));
    }

    /// Remove every line for the active scope.
    pub fn clear(&self) {
        self.mutate(Basket::clear);
    }

    /// Re-clamp the basket against freshly fetched catalog rows.
    ///
    /// Rows without a stock figure count as out of stock.
    pub fn reconcile_stock(&self, rows: &[Product]) {
        let fresh: FxHashMap<ProductId, i64> = rows
            .iter()
            .filter(|product| product.product_id.is_valid())
            .map(|product| (product.product_id, product.stock_on_hand.unwrap_or(0)))
            .collect();

        self.mutate(|basket| basket.reconcile_stock(&fresh));
    }

    fn mutate(&self, op: impl FnOnce(&mut Basket)) {
        if let Ok(mut state) = self.state.write() {
            let Some(tenant_id) = state.tenant_id else {
                return;
            };

            op(&mut state.basket);
            self.save(tenant_id, state.basket.lines());
        }
    }

    fn key(&self, tenant_id: TenantId) -> String {
        format!("{}_tenant_{tenant_id}", self.prefix)
    }

    fn load(&self, tenant_id: TenantId) -> Basket {
        let Some(raw) = self.storage.get(&self.key(tenant_id)) else {
            return Basket::new();
        };

        match serde_json::from_str::<Vec<Line>>(&raw) {
            Ok(lines) => Basket::from_lines(lines),
            Err(error) => {
                warn!("discarding unreadable basket snapshot for tenant {tenant_id}: {error}");

                Basket::new()
            }
        }
    }

    fn save(&self, tenant_id: TenantId, lines: &[Line]) {
        if let Ok(raw) = serde_json::to_string(lines) {
            self.storage.set(&self.key(tenant_id), &raw);
        }
    }
}
