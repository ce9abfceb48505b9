//! # kava-core: Pure Business Logic for the Kava Cart
//!
//! This crate is the **heart** of the cart engine. It contains all pricing
//! and filtering rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kava Cart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web Presentation Adapter                       │   │
//! │  │    Product grid ──► Cart rows ──► Order summary ──► Checkout   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ typed operation calls                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kava-cart (stateful engine)                    │   │
//! │  │    CartStore, SyncController, persistence, debounce            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kava-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │  pricing  │  │  filter   │  │   │
//! │  │   │   Money   │  │ LineItem  │  │  totals   │  │  matching │  │   │
//! │  │   │ parse/fmt │  │ Delivery  │  │ discount  │  │  queries  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO RENDERING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with hryvnia parsing/formatting (no floating point!)
//! - [`types`] - Domain types (Product, LineItem, DeliveryConfig, FilterQuery)
//! - [`pricing`] - Order summary derivation (subtotal, discount, delivery, total)
//! - [`filter`] - Visible-set derivation from a search query
//! - [`validation`] - Quantity clamping and lenient input parsing
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, rendering access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole hryvnia (i64), no floats
//! 4. **Clamp, Don't Reject**: Out-of-range quantities are corrected, not errored
//!
//! ## Example Usage
//!
//! ```rust
//! use kava_core::{DeliveryConfig, DiscountRate, LineItem, Money, pricing};
//!
//! let items = vec![
//!     LineItem::new("latte", "Латте", Money::from_uah(100), "coffee", 2),
//!     LineItem::new("syrnyk", "Сирник", Money::from_uah(50), "dessert", 1),
//! ];
//!
//! let delivery = DeliveryConfig::courier(Money::from_uah(500));
//! let result = pricing::price(&items, &delivery, DiscountRate::from_bps(1000));
//!
//! // 250 − 25 (10% off) + 500 delivery = 725 грн
//! assert_eq!(result.grand_total, Money::from_uah(725));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kava_core::Money` instead of
// `use kava_core::money::Money`

pub use error::ParseError;
pub use money::Money;
pub use pricing::PricingResult;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum quantity for a line item.
///
/// ## Business Reason
/// A line item with zero quantity is meaningless; the UI removes items
/// instead of zeroing them. Inputs below this are clamped up, never rejected.
pub const MIN_QUANTITY: u32 = 1;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 150 instead of 15).
/// Inputs above this are clamped down, never rejected.
pub const MAX_QUANTITY: u32 = 99;
