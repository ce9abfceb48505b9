//! # Cart Store
//!
//! The authoritative in-memory collection of line items.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore Operations                               │
//! │                                                                         │
//! │  UI Action                 Operation              State Change          │
//! │  ─────────                 ─────────              ────────────          │
//! │                                                                         │
//! │  Click "До кошика" ──────► add(id, catalog) ────► push / qty += 1      │
//! │                                                                         │
//! │  Edit quantity field ────► set_quantity(id, n) ─► qty = clamp(n)       │
//! │                                                                         │
//! │  Click remove ───────────► remove(id) ──────────► retain(≠ id)         │
//! │                                                                         │
//! │  Checkout / clear ───────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  NOTE: The store is plain single-owner state. Persistence and view     │
//! │        recomputation are the SyncController's job, not the store's.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Item ids are unique within the cart (adding twice increments quantity)
//! - Insertion order is display order
//! - Quantities are always within [1, 99]; out-of-range input is clamped

use tracing::debug;

use kava_core::validation::{clamp_quantity, parse_quantity};
use kava_core::{LineItem, Product, MAX_QUANTITY};

use crate::error::CartError;

// =============================================================================
// Catalog Collaborator
// =============================================================================

/// The external product catalog consulted by [`CartStore::add`].
///
/// The page knows its products; the cart only needs to look one up by id
/// when it enters the cart.
pub trait Catalog {
    fn lookup(&self, id: &str) -> Option<Product>;
}

impl Catalog for [Product] {
    fn lookup(&self, id: &str) -> Option<Product> {
        self.iter().find(|p| p.id == id).cloned()
    }
}

impl Catalog for Vec<Product> {
    fn lookup(&self, id: &str) -> Option<Product> {
        self.as_slice().lookup(id)
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// What an `add` did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was appended with quantity 1.
    Added,
    /// The item was already present; its quantity was incremented.
    Incremented,
}

/// The authoritative, ordered collection of line items.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartStore { items: Vec::new() }
    }

    /// Rebuilds a cart from persisted line items.
    ///
    /// Hydration is defensive: duplicate ids keep their first occurrence
    /// and quantities are re-clamped, so a hand-edited or stale snapshot
    /// can never break the cart invariants.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut store = CartStore::new();
        for mut item in items {
            if store.items.iter().any(|existing| existing.id == item.id) {
                debug!(id = %item.id, "dropping duplicate id during hydration");
                continue;
            }
            item.quantity = clamp_quantity(item.quantity as i64);
            store.items.push(item);
        }
        store
    }

    /// Adds a product to the cart by catalog id.
    ///
    /// ## Behavior
    /// - Unknown id: [`CartError::ProductNotFound`], cart unchanged
    /// - Already in cart: quantity + 1, clamped at 99
    /// - Otherwise: appended with quantity 1, price frozen from the catalog
    pub fn add(&mut self, id: &str, catalog: &dyn Catalog) -> Result<AddOutcome, CartError> {
        let Some(product) = catalog.lookup(id) else {
            return Err(CartError::ProductNotFound(id.to_string()));
        };

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = (item.quantity + 1).min(MAX_QUANTITY);
            return Ok(AddOutcome::Incremented);
        }

        self.items.push(LineItem::from_product(&product));
        Ok(AddOutcome::Added)
    }

    /// Removes the line item with this id.
    ///
    /// Removing an absent id is a no-op, not an error; returns whether
    /// anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Sets an item's quantity, clamped into [1, 99].
    ///
    /// Returns the value actually stored so the UI can render the
    /// correction back into the field. [`CartError::ItemNotFound`] if the
    /// id is absent.
    pub fn set_quantity(&mut self, id: &str, value: i64) -> Result<u32, CartError> {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return Err(CartError::ItemNotFound(id.to_string()));
        };
        item.quantity = clamp_quantity(value);
        Ok(item.quantity)
    }

    /// Sets an item's quantity from raw input text.
    ///
    /// Non-numeric text becomes the minimum quantity; everything else
    /// follows [`CartStore::set_quantity`] clamping.
    pub fn set_quantity_text(&mut self, id: &str, text: &str) -> Result<u32, CartError> {
        self.set_quantity(id, parse_quantity(text) as i64)
    }

    /// Read-only snapshot of the items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items are in the cart. Distinct from "everything is
    /// filtered out": this reflects true cart content.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all items (the cart badge counter).
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
