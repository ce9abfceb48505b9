//! # Pricing Engine
//!
//! Derives the order summary from cart contents and delivery configuration.
//!
//! ## Derivation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pricing Derivation                                │
//! │                                                                         │
//! │  items ────► items_subtotal = Σ quantity × unit_price                  │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │              discount_amount = round_half_up(subtotal × rate)          │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │              delivery_cost = courier cost | 0 for pickup               │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │              grand_total = subtotal − discount + delivery              │
//! │                                                                         │
//! │  Totals are computed over ALL items in the cart. Filtering is a        │
//! │  display concern and never changes what the customer pays.             │
//! │                                                                         │
//! │  Empty cart: every field is zero - delivery is NOT charged when        │
//! │  there is nothing to deliver.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result is derived on demand after every mutation and never cached
//! across mutations; it has no lifecycle of its own.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{DeliveryConfig, DiscountRate, LineItem};

// =============================================================================
// Pricing Result
// =============================================================================

/// The derived order summary handed to the UI.
///
/// All fields are non-negative: the discount is capped at 100% of the
/// subtotal by `DiscountRate`, and everything else is a sum of
/// non-negative amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingResult {
    /// Sum of line totals over all items in the cart.
    pub items_subtotal: Money,

    /// The rate the discount was derived from (for display: "−10%").
    pub discount_rate: DiscountRate,

    /// Discount on the subtotal, rounded half-up.
    pub discount_amount: Money,

    /// Delivery charge for the active method; zero for pickup and for
    /// empty carts.
    pub delivery_cost: Money,

    /// Final payable amount.
    pub grand_total: Money,
}

impl PricingResult {
    /// The all-zero summary of an empty cart.
    pub fn empty(discount_rate: DiscountRate) -> Self {
        PricingResult {
            items_subtotal: Money::zero(),
            discount_rate,
            discount_amount: Money::zero(),
            delivery_cost: Money::zero(),
            grand_total: Money::zero(),
        }
    }
}

// =============================================================================
// Derivation
// =============================================================================

/// Derives the order summary for the given cart contents.
///
/// Pure function of (items, delivery, discount): no caching, no state.
///
/// ## Example
/// ```rust
/// use kava_core::{DeliveryConfig, DiscountRate, LineItem, Money};
/// use kava_core::pricing::price;
///
/// let items = vec![
///     LineItem::new("a", "Американо", Money::from_uah(100), "coffee", 2),
///     LineItem::new("b", "Багет", Money::from_uah(50), "bakery", 1),
/// ];
/// let delivery = DeliveryConfig::courier(Money::from_uah(500));
///
/// let result = price(&items, &delivery, DiscountRate::from_bps(1000));
/// assert_eq!(result.items_subtotal, Money::from_uah(250));
/// assert_eq!(result.discount_amount, Money::from_uah(25));
/// assert_eq!(result.grand_total, Money::from_uah(725));
/// ```
pub fn price(items: &[LineItem], delivery: &DeliveryConfig, discount: DiscountRate) -> PricingResult {
    if items.is_empty() {
        // No order, no delivery charge.
        return PricingResult::empty(discount);
    }

    let items_subtotal = items
        .iter()
        .fold(Money::zero(), |acc, item| acc + item.line_total());

    let discount_amount = items_subtotal.percentage(discount);
    let delivery_cost = delivery.cost();
    let grand_total = items_subtotal - discount_amount + delivery_cost;

    PricingResult {
        items_subtotal,
        discount_rate: discount,
        discount_amount,
        delivery_cost,
        grand_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_cart() -> Vec<LineItem> {
        vec![
            LineItem::new("a", "Американо", Money::from_uah(100), "coffee", 2),
            LineItem::new("b", "Багет", Money::from_uah(50), "bakery", 1),
        ]
    }

    #[test]
    fn test_courier_scenario() {
        // subtotal 250, 10% off = 25, courier 500 ⇒ 725
        let result = price(
            &reference_cart(),
            &DeliveryConfig::courier(Money::from_uah(500)),
            DiscountRate::from_bps(1000),
        );

        assert_eq!(result.items_subtotal, Money::from_uah(250));
        assert_eq!(result.discount_amount, Money::from_uah(25));
        assert_eq!(result.delivery_cost, Money::from_uah(500));
        assert_eq!(result.grand_total, Money::from_uah(725));
    }

    #[test]
    fn test_pickup_scenario() {
        // Same cart, pickup ⇒ no delivery charge, 225 total
        let result = price(
            &reference_cart(),
            &DeliveryConfig::pickup(Money::from_uah(500)),
            DiscountRate::from_bps(1000),
        );

        assert_eq!(result.delivery_cost, Money::zero());
        assert_eq!(result.grand_total, Money::from_uah(225));
    }

    #[test]
    fn test_grand_total_identity() {
        let result = price(
            &reference_cart(),
            &DeliveryConfig::courier(Money::from_uah(70)),
            DiscountRate::from_bps(333),
        );

        assert_eq!(
            result.grand_total,
            result.items_subtotal - result.discount_amount + result.delivery_cost
        );
        assert_eq!(
            result.discount_amount,
            result.items_subtotal.percentage(result.discount_rate)
        );
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // 15 грн at 10% = 1.5 → 2
        let items = vec![LineItem::new(
            "c",
            "Цукерка",
            Money::from_uah(15),
            "dessert",
            1,
        )];
        let result = price(
            &items,
            &DeliveryConfig::pickup(Money::zero()),
            DiscountRate::from_bps(1000),
        );
        assert_eq!(result.discount_amount, Money::from_uah(2));
        assert_eq!(result.grand_total, Money::from_uah(13));
    }

    #[test]
    fn test_empty_cart_charges_nothing() {
        // Courier configured, but nothing to deliver
        let result = price(
            &[],
            &DeliveryConfig::courier(Money::from_uah(500)),
            DiscountRate::from_bps(1000),
        );

        assert_eq!(result.items_subtotal, Money::zero());
        assert_eq!(result.discount_amount, Money::zero());
        assert_eq!(result.delivery_cost, Money::zero());
        assert_eq!(result.grand_total, Money::zero());
    }

    #[test]
    fn test_zero_cost_items_still_price() {
        // A non-empty cart of free items is a valid order
        let items = vec![LineItem::new(
            "tasting",
            "Дегустація",
            Money::zero(),
            "coffee",
            1,
        )];
        let result = price(
            &items,
            &DeliveryConfig::courier(Money::from_uah(500)),
            DiscountRate::zero(),
        );

        assert_eq!(result.items_subtotal, Money::zero());
        // Delivery IS charged: the cart is not empty
        assert_eq!(result.grand_total, Money::from_uah(500));
    }

    #[test]
    fn test_full_discount_never_goes_negative() {
        let result = price(
            &reference_cart(),
            &DeliveryConfig::pickup(Money::zero()),
            DiscountRate::from_bps(10_000),
        );
        assert_eq!(result.grand_total, Money::zero());
    }
}
