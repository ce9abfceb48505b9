//! # Domain Types
//!
//! Core domain types for the cart engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │ DeliveryConfig  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (slug)      │   │  id (slug)      │   │  method         │       │
//! │  │  name           │   │  name (frozen)  │   │  courier_cost   │       │
//! │  │  unit_price     │   │  unit_price     │   │  (pickup free)  │       │
//! │  │  category       │   │  quantity 1..99 │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  DiscountRate   │   │   FilterQuery   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  text           │                             │
//! │  │  1000 = 10%     │   │  category       │   (view state, never       │
//! │  └─────────────────┘   └─────────────────┘    persisted)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` freezes the product's name, price, and category at the
//! moment it enters the cart; later catalog edits do not rewrite carts.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::MIN_QUANTITY;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the shop's standing promo discount)
///
/// Capped at 10000 bps: a discount can never exceed the subtotal, which
/// keeps every derived total non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points, capped at 100%.
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        DiscountRate(bps.min(10_000))
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Self::from_bps((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the discount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry available for ordering.
///
/// The catalog itself is an external collaborator (see the `Catalog` trait
/// in kava-cart); this is the record shape it hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Stable product identifier (catalog slug, e.g. "latte").
    pub id: String,

    /// Display name shown in the product grid and cart rows.
    pub name: String,

    /// Price in whole hryvnia.
    pub unit_price: Money,

    /// Category used by the filter selector (e.g. "coffee", "dessert").
    pub category: String,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its chosen quantity.
///
/// ## Invariants
/// - `id` is unique within a cart (enforced by `CartStore`)
/// - `quantity` is always in `[MIN_QUANTITY, MAX_QUANTITY]`; out-of-range
///   input is clamped on the way in, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product ID this line refers to.
    pub id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    /// Critical: we lock in the price when the item enters the cart.
    pub unit_price: Money,

    /// Category at time of adding (frozen).
    pub category: String,

    /// Chosen quantity, always within [1, 99].
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item directly. Used by tests and the demo catalog;
    /// real carts build items via [`LineItem::from_product`].
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
        quantity: u32,
    ) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            unit_price,
            category: category.into(),
            quantity,
        }
    }

    /// Creates a line item from a catalog product with the starting quantity.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            category: product.category.clone(),
            quantity: MIN_QUANTITY,
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// How the order leaves the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Courier delivery, charged at the configured cost.
    Courier,
    /// Customer pickup, always free.
    Pickup,
}

/// Active delivery selection plus the courier price.
///
/// Exactly one method is active at a time; pickup has no configurable cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeliveryConfig {
    pub method: DeliveryMethod,
    pub courier_cost: Money,
}

impl DeliveryConfig {
    /// Courier delivery at the given cost.
    pub const fn courier(cost: Money) -> Self {
        DeliveryConfig {
            method: DeliveryMethod::Courier,
            courier_cost: cost,
        }
    }

    /// Free customer pickup. The courier cost is retained so switching
    /// back does not lose the configured price.
    pub const fn pickup(courier_cost: Money) -> Self {
        DeliveryConfig {
            method: DeliveryMethod::Pickup,
            courier_cost,
        }
    }

    /// The cost this configuration actually charges.
    pub fn cost(&self) -> Money {
        match self.method {
            DeliveryMethod::Courier => self.courier_cost,
            DeliveryMethod::Pickup => Money::zero(),
        }
    }
}

// =============================================================================
// Filter Query
// =============================================================================

/// Category side of a filter query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Match every category (the "all" option in the selector).
    #[default]
    All,
    /// Match one exact category.
    Only(String),
}

impl CategoryFilter {
    /// Parses the raw selector value; `"all"` means no restriction.
    pub fn from_selector(value: &str) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

/// The active search/filter state.
///
/// Pure view state: never persisted with the cart, never affects totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterQuery {
    /// Case-insensitive substring matched against item names.
    /// Empty text matches everything.
    pub text: String,

    /// Category restriction.
    pub category: CategoryFilter,
}

impl FilterQuery {
    /// True when the query cannot hide anything.
    pub fn matches_all(&self) -> bool {
        self.text.is_empty() && self.category == CategoryFilter::All
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_bps() {
        let rate = DiscountRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_discount_rate_caps_at_full_price() {
        assert_eq!(DiscountRate::from_bps(25_000).bps(), 10_000);
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        assert_eq!(DiscountRate::from_percentage(10.0).bps(), 1000);
        assert_eq!(DiscountRate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_line_item_from_product_freezes_fields() {
        let product = Product {
            id: "latte".to_string(),
            name: "Латте".to_string(),
            unit_price: Money::from_uah(100),
            category: "coffee".to_string(),
        };

        let item = LineItem::from_product(&product);
        assert_eq!(item.id, "latte");
        assert_eq!(item.quantity, MIN_QUANTITY);
        assert_eq!(item.line_total(), Money::from_uah(100));
    }

    #[test]
    fn test_delivery_cost() {
        let courier = DeliveryConfig::courier(Money::from_uah(500));
        assert_eq!(courier.cost(), Money::from_uah(500));

        let pickup = DeliveryConfig::pickup(Money::from_uah(500));
        assert_eq!(pickup.cost(), Money::zero());
        // The courier price survives the switch
        assert_eq!(pickup.courier_cost, Money::from_uah(500));
    }

    #[test]
    fn test_category_filter_from_selector() {
        assert_eq!(CategoryFilter::from_selector("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_selector("coffee"),
            CategoryFilter::Only("coffee".to_string())
        );
    }

    #[test]
    fn test_default_query_matches_all() {
        assert!(FilterQuery::default().matches_all());
        let narrowed = FilterQuery {
            text: "ла".to_string(),
            category: CategoryFilter::All,
        };
        assert!(!narrowed.matches_all());
    }
}
