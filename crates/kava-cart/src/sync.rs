//! # Sync Controller
//!
//! `CartEngine` wires every cart mutation to its three downstream effects
//! so the UI observer always sees one consistent picture.
//!
//! ## Mutation Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Engine State Machine                               │
//! │                                                                         │
//! │            ┌──────┐   mutation    ┌──────────┐                          │
//! │            │ Idle │──────────────►│ Mutating │                          │
//! │            └──────┘               └────┬─────┘                          │
//! │               ▲                        │ apply + recompute              │
//! │               │                        ▼                                │
//! │               │    write done   ┌────────────┐                          │
//! │               └─────────────────│ Persisting │                          │
//! │                                 └────────────┘                          │
//! │                                                                         │
//! │  Each cycle recomputes the order summary, re-applies the current       │
//! │  filter query, and writes the full cart snapshot. The cycle runs to    │
//! │  completion before the next event is processed (single-threaded        │
//! │  ownership: &mut self IS the no-interleaving guarantee).               │
//! │                                                                         │
//! │  A failed mutation returns to Idle with the cart untouched.            │
//! │  A failed persistence write is logged and skipped; durability is a     │
//! │  convenience, not a correctness requirement.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use kava_core::{
    filter, pricing, CategoryFilter, DeliveryConfig, DeliveryMethod, DiscountRate, FilterQuery,
    LineItem, PricingResult,
};

use crate::error::CartError;
use crate::persist::{CartSnapshot, CartStorage, DEFAULT_CART_KEY};
use crate::store::{CartStore, Catalog};

// =============================================================================
// Sync State
// =============================================================================

/// Where the engine is within a mutation cycle.
///
/// Exposed for observability; consumers only ever observe `Idle` between
/// calls, which is exactly the atomicity the UI relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Mutating,
    Persisting,
}

// =============================================================================
// Engine Update
// =============================================================================

/// The atomic view handed to the UI after every operation.
///
/// All three fields reflect the same cart state: a consumer can never see
/// a total from before a mutation next to a visible set from after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngineUpdate {
    /// Order summary over the FULL cart (filtering never changes totals).
    pub pricing: PricingResult,

    /// Ids of the items the current filter query leaves visible.
    pub visible: Vec<String>,

    /// True cart emptiness - drives checkout eligibility, NOT the visible
    /// set. A fully filtered-out cart is still a non-empty cart.
    pub is_empty: bool,
}

// =============================================================================
// Cart Engine
// =============================================================================

/// The sync controller: authoritative cart plus delivery/discount
/// configuration, filter query, and the persistence backend.
pub struct CartEngine {
    store: CartStore,
    delivery: DeliveryConfig,
    discount: DiscountRate,
    query: FilterQuery,
    storage: Box<dyn CartStorage>,
    storage_key: String,
    state: SyncState,
}

impl CartEngine {
    /// Creates an engine hydrated from the default storage slot.
    pub fn new(
        storage: Box<dyn CartStorage>,
        delivery: DeliveryConfig,
        discount: DiscountRate,
    ) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY, delivery, discount)
    }

    /// Creates an engine hydrated from a specific storage slot.
    ///
    /// Hydration is forgiving: an unavailable backend or a corrupt
    /// snapshot yields an empty cart, never a failure.
    pub fn with_key(
        storage: Box<dyn CartStorage>,
        key: &str,
        delivery: DeliveryConfig,
        discount: DiscountRate,
    ) -> Self {
        let store = match storage.get(key) {
            Ok(Some(json)) => match CartSnapshot::from_json(&json) {
                Ok(snapshot) => {
                    debug!(items = snapshot.items.len(), "hydrated cart from storage");
                    CartStore::from_items(snapshot.items)
                }
                Err(err) => {
                    warn!(%err, "corrupt cart snapshot, starting empty");
                    CartStore::new()
                }
            },
            Ok(None) => CartStore::new(),
            Err(err) => {
                warn!(%err, "storage unavailable, starting empty");
                CartStore::new()
            }
        };

        CartEngine {
            store,
            delivery,
            discount,
            query: FilterQuery::default(),
            storage,
            storage_key: key.to_string(),
            state: SyncState::Idle,
        }
    }

    // -------------------------------------------------------------------------
    // Mutations (each runs a full Mutating → Persisting → Idle cycle)
    // -------------------------------------------------------------------------

    /// Adds a catalog product to the cart (new line or quantity + 1).
    pub fn add_item(
        &mut self,
        id: &str,
        catalog: &dyn Catalog,
    ) -> Result<EngineUpdate, CartError> {
        debug!(id, "add_item");
        self.state = SyncState::Mutating;
        match self.store.add(id, catalog) {
            Ok(_) => Ok(self.commit()),
            Err(err) => {
                self.state = SyncState::Idle;
                Err(err)
            }
        }
    }

    /// Removes a line item. Removing an absent id is a no-op that still
    /// returns the (unchanged) view.
    pub fn remove_item(&mut self, id: &str) -> EngineUpdate {
        debug!(id, "remove_item");
        self.state = SyncState::Mutating;
        if !self.store.remove(id) {
            debug!(id, "remove ignored, id not in cart");
        }
        self.commit()
    }

    /// Sets a line item's quantity, clamped into [1, 99].
    pub fn set_quantity(&mut self, id: &str, value: i64) -> Result<EngineUpdate, CartError> {
        debug!(id, value, "set_quantity");
        self.state = SyncState::Mutating;
        match self.store.set_quantity(id, value) {
            Ok(stored) => {
                debug!(id, stored, "quantity stored");
                Ok(self.commit())
            }
            Err(err) => {
                self.state = SyncState::Idle;
                Err(err)
            }
        }
    }

    /// Sets a quantity from raw field text; non-numeric input clamps to
    /// the minimum instead of failing.
    pub fn set_quantity_text(&mut self, id: &str, text: &str) -> Result<EngineUpdate, CartError> {
        debug!(id, text, "set_quantity_text");
        self.state = SyncState::Mutating;
        match self.store.set_quantity_text(id, text) {
            Ok(stored) => {
                debug!(id, stored, "quantity stored");
                Ok(self.commit())
            }
            Err(err) => {
                self.state = SyncState::Idle;
                Err(err)
            }
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> EngineUpdate {
        debug!("clear");
        self.state = SyncState::Mutating;
        self.store.clear();
        self.commit()
    }

    // -------------------------------------------------------------------------
    // Configuration & view changes (re-derive, nothing to persist)
    // -------------------------------------------------------------------------

    /// Switches the delivery method. Session configuration, not cart
    /// content: the snapshot stores items only, so nothing is persisted.
    pub fn set_delivery_method(&mut self, method: DeliveryMethod) -> EngineUpdate {
        debug!(?method, "set_delivery_method");
        self.delivery.method = method;
        self.derive()
    }

    /// Changes the active discount rate.
    pub fn set_discount(&mut self, discount: DiscountRate) -> EngineUpdate {
        debug!(bps = discount.bps(), "set_discount");
        self.discount = discount;
        self.derive()
    }

    /// Applies new search text. Debouncing happens upstream (see
    /// [`crate::debounce::Debouncer`]); by the time this is called the
    /// text is final.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> EngineUpdate {
        self.query.text = text.into();
        debug!(text = %self.query.text, "set_search_text");
        self.derive()
    }

    /// Applies a category selector value (`"all"` lifts the restriction).
    /// Category changes take effect immediately, no debounce.
    pub fn set_category(&mut self, selector: &str) -> EngineUpdate {
        debug!(selector, "set_category");
        self.query.category = CategoryFilter::from_selector(selector);
        self.derive()
    }

    /// Recomputes the current view without changing anything.
    pub fn view(&self) -> EngineUpdate {
        self.derive()
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// True iff an order can be placed: driven by true cart content,
    /// never by the filtered view.
    pub fn can_checkout(&self) -> bool {
        !self.store.is_empty()
    }

    /// Confirms the order: snapshots the totals, clears the cart, and
    /// persists the empty state.
    ///
    /// Rejected with [`CartError::CheckoutRejected`] on an empty cart.
    pub fn checkout(&mut self) -> Result<PricingResult, CartError> {
        if self.store.is_empty() {
            return Err(CartError::CheckoutRejected);
        }

        let receipt = pricing::price(self.store.items(), &self.delivery, self.discount);

        self.state = SyncState::Mutating;
        self.store.clear();
        self.commit();

        info!(total = %receipt.grand_total, "checkout complete");
        Ok(receipt)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Line items in display order.
    pub fn items(&self) -> &[LineItem] {
        self.store.items()
    }

    /// The active filter query.
    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    /// The active delivery configuration.
    pub fn delivery(&self) -> &DeliveryConfig {
        &self.delivery
    }

    /// Current engine state; `Idle` whenever no call is in flight.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The persistence backend, for observers and tests.
    pub fn storage(&self) -> &dyn CartStorage {
        self.storage.as_ref()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Recompute + persist + return to Idle. Call sites have already
    /// applied the mutation under `Mutating`.
    fn commit(&mut self) -> EngineUpdate {
        let update = self.derive();
        self.state = SyncState::Persisting;
        self.persist();
        self.state = SyncState::Idle;
        update
    }

    /// Derives the atomic UI view from current state.
    fn derive(&self) -> EngineUpdate {
        EngineUpdate {
            pricing: pricing::price(self.store.items(), &self.delivery, self.discount),
            visible: filter::visible_ids(self.store.items(), &self.query),
            is_empty: self.store.is_empty(),
        }
    }

    /// Writes the full cart snapshot. Failures are logged and skipped;
    /// the in-memory cart stays authoritative.
    fn persist(&mut self) {
        let snapshot = CartSnapshot::capture(self.store.items());
        let json = match snapshot.to_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "snapshot serialization failed, skipping persistence");
                return;
            }
        };

        if let Err(err) = self.storage.set(&self.storage_key, &json) {
            warn!(%err, "storage write failed, continuing in memory");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{MemoryStorage, UnavailableStorage};
    use kava_core::{Money, Product};

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                id: "a".to_string(),
                name: "Американо".to_string(),
                unit_price: Money::from_uah(100),
                category: "coffee".to_string(),
            },
            Product {
                id: "b".to_string(),
                name: "Багет".to_string(),
                unit_price: Money::from_uah(50),
                category: "bakery".to_string(),
            },
        ]
    }

    fn engine() -> CartEngine {
        CartEngine::new(
            Box::new(MemoryStorage::new()),
            DeliveryConfig::courier(Money::from_uah(500)),
            DiscountRate::from_bps(1000),
        )
    }

    fn reference_engine() -> CartEngine {
        // cart = [a ×2 @100, b ×1 @50], 10% discount, courier 500
        let mut engine = engine();
        engine.add_item("a", &catalog()).unwrap();
        engine.add_item("a", &catalog()).unwrap();
        engine.add_item("b", &catalog()).unwrap();
        engine
    }

    #[test]
    fn test_reference_scenario_courier() {
        let engine = reference_engine();
        let update = engine.view();

        assert_eq!(update.pricing.items_subtotal, Money::from_uah(250));
        assert_eq!(update.pricing.discount_amount, Money::from_uah(25));
        assert_eq!(update.pricing.delivery_cost, Money::from_uah(500));
        assert_eq!(update.pricing.grand_total, Money::from_uah(725));
        assert!(!update.is_empty);
    }

    #[test]
    fn test_reference_scenario_pickup() {
        let mut engine = reference_engine();
        let update = engine.set_delivery_method(DeliveryMethod::Pickup);

        assert_eq!(update.pricing.delivery_cost, Money::zero());
        assert_eq!(update.pricing.grand_total, Money::from_uah(225));
    }

    #[test]
    fn test_every_mutation_persists_matching_snapshot() {
        let mut engine = reference_engine();
        engine.set_quantity("a", 150).unwrap(); // clamps to 99

        let json = engine
            .storage()
            .get(DEFAULT_CART_KEY)
            .unwrap()
            .expect("snapshot written");
        let snapshot = CartSnapshot::from_json(&json).unwrap();

        // Persisted cart matches the rendered one exactly
        assert_eq!(snapshot.items, engine.items());
        assert_eq!(snapshot.items[0].quantity, 99);
        assert_eq!(engine.state(), SyncState::Idle);
    }

    #[test]
    fn test_hydration_restores_previous_session() {
        let mut storage = MemoryStorage::new();
        {
            let mut first = CartEngine::new(
                Box::new(MemoryStorage::new()),
                DeliveryConfig::courier(Money::from_uah(500)),
                DiscountRate::zero(),
            );
            first.add_item("a", &catalog()).unwrap();
            let json = first.storage().get(DEFAULT_CART_KEY).unwrap().unwrap();
            storage.set(DEFAULT_CART_KEY, &json).unwrap();
        }

        let second = CartEngine::new(
            Box::new(storage),
            DeliveryConfig::courier(Money::from_uah(500)),
            DiscountRate::zero(),
        );
        assert_eq!(second.items().len(), 1);
        assert_eq!(second.items()[0].id, "a");
    }

    #[test]
    fn test_corrupt_snapshot_hydrates_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(DEFAULT_CART_KEY, "{not json").unwrap();

        let engine = CartEngine::new(
            Box::new(storage),
            DeliveryConfig::pickup(Money::zero()),
            DiscountRate::zero(),
        );
        assert!(engine.items().is_empty());
    }

    #[test]
    fn test_unavailable_storage_keeps_engine_alive() {
        let mut engine = CartEngine::new(
            Box::new(UnavailableStorage),
            DeliveryConfig::courier(Money::from_uah(500)),
            DiscountRate::zero(),
        );

        // Mutations succeed in memory even though every write is skipped
        let update = engine.add_item("a", &catalog()).unwrap();
        assert_eq!(update.pricing.items_subtotal, Money::from_uah(100));
        assert!(engine.can_checkout());
    }

    #[test]
    fn test_unknown_product_leaves_state_idle_and_cart_unchanged() {
        let mut engine = reference_engine();
        let err = engine.add_item("zzz", &catalog()).unwrap_err();

        assert_eq!(err, CartError::ProductNotFound("zzz".to_string()));
        assert_eq!(engine.state(), SyncState::Idle);
        assert_eq!(engine.items().len(), 2);
    }

    #[test]
    fn test_filtering_changes_visibility_not_totals() {
        let mut engine = reference_engine();
        let before = engine.view().pricing;

        let update = engine.set_search_text("баг");
        assert_eq!(update.visible, vec!["b"]);
        assert_eq!(update.pricing, before);

        let update = engine.set_category("coffee");
        assert_eq!(update.visible, Vec::<String>::new());
        assert_eq!(update.pricing, before);
    }

    #[test]
    fn test_fully_filtered_cart_is_still_checkout_eligible() {
        let mut engine = reference_engine();
        let update = engine.set_search_text("нічого такого немає");

        assert!(update.visible.is_empty());
        assert!(!update.is_empty);
        assert!(engine.can_checkout());
    }

    #[test]
    fn test_checkout_lifecycle() {
        let mut engine = reference_engine();
        assert!(engine.can_checkout());

        let receipt = engine.checkout().unwrap();
        assert_eq!(receipt.grand_total, Money::from_uah(725));

        // Cart cleared, persisted empty, further checkout rejected
        assert!(engine.items().is_empty());
        assert!(!engine.can_checkout());
        assert_eq!(engine.checkout().unwrap_err(), CartError::CheckoutRejected);

        let json = engine.storage().get(DEFAULT_CART_KEY).unwrap().unwrap();
        let snapshot = CartSnapshot::from_json(&json).unwrap();
        assert!(snapshot.items.is_empty());
    }

    #[test]
    fn test_checkout_rejected_on_empty_cart() {
        let mut empty = engine();
        assert!(!empty.can_checkout());
        assert_eq!(empty.checkout().unwrap_err(), CartError::CheckoutRejected);
    }

    #[test]
    fn test_set_quantity_text_through_engine() {
        let mut engine = reference_engine();
        let update = engine.set_quantity_text("a", "abc").unwrap();

        // Non-numeric input corrected to the minimum: 1×100 + 1×50 = 150
        assert_eq!(update.pricing.items_subtotal, Money::from_uah(150));
    }

    #[test]
    fn test_remove_absent_id_returns_unchanged_view() {
        let mut engine = reference_engine();
        let before = engine.view();
        let after = engine.remove_item("zzz");
        assert_eq!(after, before);
    }

    #[test]
    fn test_discount_change_rederives() {
        let mut engine = reference_engine();
        let update = engine.set_discount(DiscountRate::zero());
        assert_eq!(update.pricing.discount_amount, Money::zero());
        assert_eq!(update.pricing.grand_total, Money::from_uah(750));
    }
}
