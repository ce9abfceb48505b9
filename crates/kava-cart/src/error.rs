//! # Error Types
//!
//! Engine-level errors for kava-cart.
//!
//! ## Severity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartError      - surfaced to the caller as a recoverable failure;     │
//! │                   the cart is unchanged when one is returned           │
//! │  StorageError   - swallowed inside the engine: persistence is a        │
//! │                   convenience, the session keeps running in memory     │
//! │                                                                         │
//! │  Nothing here is fatal to the running session.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Recoverable cart operation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The catalog has no product with this id; the cart is unchanged.
    #[error("product not found in catalog: {0}")]
    ProductNotFound(String),

    /// The cart has no line item with this id.
    #[error("item not in cart: {0}")]
    ItemNotFound(String),

    /// Checkout was requested on an empty cart.
    #[error("cannot check out an empty cart")]
    CheckoutRejected,
}

/// Failures of the external key-value storage backend.
///
/// The engine treats these as advisory: a failed write is logged and
/// skipped, a failed read hydrates an empty cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backend is missing or inaccessible.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CartError::ProductNotFound("latte".to_string()).to_string(),
            "product not found in catalog: latte"
        );
        assert_eq!(
            CartError::CheckoutRejected.to_string(),
            "cannot check out an empty cart"
        );
        assert_eq!(
            StorageError::Unavailable("quota exceeded".to_string()).to_string(),
            "storage backend unavailable: quota exceeded"
        );
    }
}
