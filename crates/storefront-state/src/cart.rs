//! # Cart Store
//!
//! Manages the shopping cart and the cart drawer flag.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action              Store Method            State Change          │
//! │  ───────────              ────────────            ────────────          │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_item() ───────────► qty += 1 or push     │
//! │                                                                         │
//! │  − / + buttons ─────────► update_quantity() ────► qty = n (n<1 drops)  │
//! │                                                                         │
//! │  Trash icon ────────────► remove_item() ────────► retain(id != x)      │
//! │                                                                         │
//! │  "Clear Cart" ──────────► clear_cart() ─────────► items.clear()        │
//! │                                                                         │
//! │  Cart icon / backdrop ──► open_cart() / close_cart()                   │
//! │                                                                         │
//! │  Badge, drawer footer ──► total_items(), total_price(),                │
//! │                           total_savings()  (derived, never stored)     │
//! │                                                                         │
//! │  Every mutation notifies subscribers once, after the change.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The store lives in [`crate::AppContext`] and is mutated through
//! `&mut self`; the borrow checker gives the single-writer guarantee, so
//! there is no Mutex here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::{Money, Product};
use tracing::debug;
use ts_rs::TS;

use crate::listeners::{Listeners, SubscriptionId};

/// An entry in the cart: a catalog product plus a quantity.
///
/// ## Invariants
/// - `quantity >= 1` while the entry is in a cart
/// - at most one entry per `product.id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// The product as it was when added.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in cart.
    pub quantity: i64,

    /// When this entry was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new entry with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product: product.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Product id of this entry.
    #[inline]
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    /// (original price − price) × quantity.
    pub fn line_saving(&self) -> Money {
        self.product.saving().multiply_quantity(self.quantity)
    }
}

/// Cart contents and drawer visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Entries in insertion order.
    pub items: Vec<CartItem>,

    /// Whether the cart drawer is showing.
    pub is_open: bool,
}

impl Cart {
    /// Creates a new empty, closed cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - If product already in cart: quantity increases by 1
    /// - If product not in cart: appended with quantity 1
    pub fn add_item(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem::from_product(product));
    }

    /// Removes an entry by product id. Returns false if it was absent.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != initial_len
    }

    /// Sets an entry's quantity exactly.
    ///
    /// ## Behavior
    /// - `quantity < 1`: removes the entry
    /// - product not in cart: nothing happens
    /// - no upper bound; counts and totals saturate at `i64::MAX`
    ///
    /// Returns false if no entry matched.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity < 1 {
            return self.remove_item(product_id);
        }

        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Clears all items. The drawer flag is left alone.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Looks up an entry by product id.
    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Number of distinct entries.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities (the badge number).
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of price × quantity.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of (original price − price) × quantity.
    pub fn total_savings(&self) -> Money {
        self.items.iter().map(CartItem::line_saving).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart totals summary for the drawer footer and navbar badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_items: i64,
    pub total_price: Money,
    pub total_savings: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            total_savings: cart.total_savings(),
        }
    }
}

/// The cart state container.
///
/// Wraps a [`Cart`] and notifies subscribers after every mutation.
#[derive(Debug, Default)]
pub struct CartStore {
    cart: Cart,
    listeners: Listeners<Cart>,
}

impl CartStore {
    /// Creates a store with an empty, closed cart.
    pub fn new() -> Self {
        CartStore::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`. Does not open the drawer.
    pub fn add_item(&mut self, product: &Product) {
        self.cart.add_item(product);
        debug!(
            product_id = %product.id,
            quantity = self.cart.get(&product.id).map_or(0, |i| i.quantity),
            "cart add_item"
        );
        self.notify();
    }

    /// Removes the entry for `product_id`; absent ids are a no-op.
    pub fn remove_item(&mut self, product_id: &str) {
        let removed = self.cart.remove_item(product_id);
        debug!(product_id = %product_id, removed, "cart remove_item");
        self.notify();
    }

    /// Sets the quantity for `product_id`; below 1 removes the entry.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        let matched = self.cart.update_quantity(product_id, quantity);
        debug!(product_id = %product_id, quantity, matched, "cart update_quantity");
        self.notify();
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("cart clear_cart");
        self.notify();
    }

    /// Shows the cart drawer.
    pub fn open_cart(&mut self) {
        self.cart.is_open = true;
        self.notify();
    }

    /// Hides the cart drawer.
    pub fn close_cart(&mut self) {
        self.cart.is_open = false;
        self.notify();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Read access to the whole cart.
    pub fn state(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.cart.items
    }

    pub fn is_open(&self) -> bool {
        self.cart.is_open
    }

    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    pub fn total_savings(&self) -> Money {
        self.cart.total_savings()
    }

    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a listener called with the cart after every mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Cart) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify(&mut self) {
        self.listeners.notify(&self.cart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_product(id: &str, price: i64, original: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_major(price),
            original_price: Money::from_major(original),
            discount: Money::from_major(price).percentage_off(Money::from_major(original)),
            image: String::new(),
            category: "electronics".to_string(),
            rating: 4.0,
            reviews: 1,
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 999, 1299));

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), Money::from_major(999));
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 999);

        cart.add_item(&product);
        cart.add_item(&product);
        cart.add_item(&product);

        assert_eq!(cart.item_count(), 1); // Still one entry
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_cart_keeps_insertion_order() {
        let mut cart = Cart::new();
        for id in ["b", "a", "c", "a"] {
            cart.add_item(&test_product(id, 10, 10));
        }
        let ids: Vec<&str> = cart.items.iter().map(CartItem::id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100, 150));

        assert!(cart.update_quantity("1", 5));
        assert_eq!(cart.get("1").map(|i| i.quantity), Some(5));

        assert!(cart.update_quantity("1", 2));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100, 150));
        cart.add_item(&test_product("2", 100, 150));

        assert!(cart.update_quantity("1", 0));
        assert!(cart.get("1").is_none());
        assert!(cart.update_quantity("2", -5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_absent_ids_are_no_ops() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100, 150));
        let before = cart.clone();

        assert!(!cart.remove_item("missing"));
        assert!(!cart.update_quantity("missing", 3));
        assert!(!cart.update_quantity("missing", 0));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_totals_and_savings() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100, 150));
        cart.add_item(&test_product("1", 100, 150));
        cart.add_item(&test_product("2", 40, 40));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_items, 3);
        assert_eq!(totals.total_price, Money::from_major(240));
        assert_eq!(totals.total_savings, Money::from_major(100));
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert!(cart.total_price().is_zero());
        assert!(cart.total_savings().is_zero());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let mut store = CartStore::new();
        let p1 = test_product("1", 100, 150);
        let p2 = test_product("2", 100, 150);
        store.add_item(&p1);
        store.add_item(&p2);

        store.update_quantity("1", i64::MAX / 2);
        store.update_quantity("2", i64::MAX);
        assert_eq!(store.total_items(), i64::MAX);
        assert_eq!(store.total_price(), Money::from_minor(i64::MAX));
        assert_eq!(store.total_savings(), Money::from_minor(i64::MAX));
        assert_eq!(store.totals().total_items, i64::MAX);

        store.add_item(&p2);
        assert_eq!(store.state().get("2").map(|i| i.quantity), Some(i64::MAX));
    }

    #[test]
    fn test_cart_clear_keeps_drawer_flag() {
        let mut store = CartStore::new();
        store.add_item(&test_product("1", 999, 999));
        store.open_cart();

        store.clear_cart();
        assert!(store.items().is_empty());
        assert!(store.is_open());
    }

    #[test]
    fn test_add_item_does_not_open_drawer() {
        let mut store = CartStore::new();
        store.add_item(&test_product("1", 10, 10));
        assert!(!store.is_open());
        store.open_cart();
        store.close_cart();
        assert!(!store.is_open());
    }

    #[test]
    fn test_store_notifies_after_each_mutation() {
        let seen: Rc<RefCell<Vec<i64>>> = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::new();

        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |cart| sink.borrow_mut().push(cart.total_items()));

        let product = test_product("1", 10, 10);
        store.add_item(&product);
        store.add_item(&product);
        store.update_quantity("1", 5);
        store.remove_item("1");
        assert_eq!(*seen.borrow(), vec![1, 2, 5, 0]);

        assert!(store.unsubscribe(id));
        store.add_item(&product);
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem::from_product(&test_product("p1", 100, 150));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["originalPrice"], 15000);
        assert_eq!(json["quantity"], 1);
        assert!(json.get("product").is_none());
    }
}
