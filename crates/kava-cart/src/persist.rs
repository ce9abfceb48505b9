//! # Persistence Boundary
//!
//! The cart survives page reloads through an external key-value store
//! (`localStorage` in the browser adapter). The backend itself is out of
//! scope; this module defines the boundary trait, the serialized snapshot,
//! and in-memory implementations for tests and the demo.
//!
//! ## Durability Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Writes are last-write-wins and always reflect the immediately         │
//! │  preceding mutation. There is no concurrent writer in a session,       │
//! │  so no locking protocol exists.                                        │
//! │                                                                         │
//! │  Persistence is a CONVENIENCE, not a correctness requirement:          │
//! │  if the backend is unavailable the engine keeps running in memory      │
//! │  and silently skips writes.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kava_core::LineItem;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Storage key for the cart snapshot, matching the shop page's slot.
pub const DEFAULT_CART_KEY: &str = "coffee_shop_cart";

// =============================================================================
// Storage Trait
// =============================================================================

/// External key-value store with get/set semantics.
///
/// Implementations must be last-write-wins; the engine never issues
/// concurrent writes.
pub trait CartStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Snapshot
// =============================================================================

/// The serialized form of a cart: an ordered sequence of line items plus
/// the moment it was written.
///
/// Round-trip guarantee: deserializing a just-serialized snapshot yields
/// identical line items in identical order (covered by tests below).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,

    /// Line items in display order.
    pub items: Vec<LineItem>,
}

impl CartSnapshot {
    /// Captures the current items with a fresh timestamp.
    pub fn capture(items: &[LineItem]) -> Self {
        CartSnapshot {
            saved_at: Utc::now(),
            items: items.to_vec(),
        }
    }

    /// Serializes to the stored JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from the stored JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// In-Memory Implementations
// =============================================================================

/// In-memory backend for tests and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Raw slot contents, for assertions on persisted state.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A backend that always fails, for exercising the degraded path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl CartStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("backend missing".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("backend missing".to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kava_core::Money;

    fn sample_items() -> Vec<LineItem> {
        vec![
            LineItem::new("latte", "Латте", Money::from_uah(100), "coffee", 2),
            LineItem::new("syrnyk", "Сирник", Money::from_uah(50), "dessert", 1),
        ]
    }

    #[test]
    fn test_snapshot_round_trip_preserves_items_and_order() {
        let snapshot = CartSnapshot::capture(&sample_items());
        let json = snapshot.to_json().unwrap();
        let restored = CartSnapshot::from_json(&json).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(restored.items, sample_items());
    }

    #[test]
    fn test_snapshot_record_shape() {
        // The stored records carry exactly the fields the page expects
        let snapshot = CartSnapshot::capture(&sample_items()[..1]);
        let json = snapshot.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let record = &value["items"][0];
        assert_eq!(record["id"], "latte");
        assert_eq!(record["name"], "Латте");
        assert_eq!(record["unit_price"], 100);
        assert_eq!(record["category"], "coffee");
        assert_eq!(record["quantity"], 2);
    }

    #[test]
    fn test_memory_storage_is_last_write_wins() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();

        assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(storage.get("missing").unwrap(), None);
    }

    #[test]
    fn test_unavailable_storage_errors() {
        let mut storage = UnavailableStorage;
        assert!(storage.get("k").is_err());
        assert!(storage.set("k", "v").is_err());
    }
}
