//! # kava-cart: Stateful Cart Engine
//!
//! Owns the authoritative cart contents and keeps three downstream views
//! consistent after every mutation: the order summary (pricing), the
//! visible item set (filter), and the persisted snapshot (storage).
//!
//! ## Modules
//!
//! - [`store`] - `CartStore`, the authoritative line-item collection, and
//!   the `Catalog` collaborator trait
//! - [`persist`] - the key-value storage boundary and the JSON snapshot
//! - [`sync`] - `CartEngine`, the controller wiring mutations to pricing,
//!   filtering, and persistence
//! - [`debounce`] - cancellable scheduling for search-text input
//! - [`error`] - engine error types
//!
//! ## Example
//!
//! ```rust
//! use kava_cart::persist::MemoryStorage;
//! use kava_cart::sync::CartEngine;
//! use kava_core::{DeliveryConfig, DiscountRate, Money, Product};
//!
//! let catalog = vec![Product {
//!     id: "latte".to_string(),
//!     name: "Латте".to_string(),
//!     unit_price: Money::from_uah(100),
//!     category: "coffee".to_string(),
//! }];
//!
//! let mut engine = CartEngine::new(
//!     Box::new(MemoryStorage::new()),
//!     DeliveryConfig::courier(Money::from_uah(500)),
//!     DiscountRate::zero(),
//! );
//!
//! let update = engine.add_item("latte", &catalog).unwrap();
//! assert_eq!(update.pricing.grand_total, Money::from_uah(600));
//! assert!(engine.can_checkout());
//! ```

pub mod debounce;
pub mod error;
pub mod persist;
pub mod store;
pub mod sync;

pub use error::{CartError, StorageError};
pub use persist::{CartSnapshot, CartStorage, MemoryStorage, UnavailableStorage, DEFAULT_CART_KEY};
pub use store::{AddOutcome, CartStore, Catalog};
pub use sync::{CartEngine, EngineUpdate, SyncState};
