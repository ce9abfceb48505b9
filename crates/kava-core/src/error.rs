//! # Error Types
//!
//! Domain-specific error types for kava-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kava-core errors (this file)                                          │
//! │  └── ParseError       - Malformed price or quantity text               │
//! │                                                                         │
//! │  kava-cart errors (separate crate)                                     │
//! │  ├── CartError        - Cart operation failures (NotFound, checkout)   │
//! │  └── StorageError     - Persistence backend failures                   │
//! │                                                                         │
//! │  NOTHING here is fatal: price parse failures are substituted with 0    │
//! │  in UI paths, quantity parse failures clamp to the minimum.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Errors from parsing user-facing price text.
///
/// Callers in UI contexts recover by substituting a safe default (0 for a
/// price); the error exists so that malformed text can never flow into
/// totals unnoticed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No digits remained after stripping the currency suffix and separators.
    #[error("no digits in price text: {input:?}")]
    NoDigits { input: String },

    /// A character that is neither a digit nor a recognized separator.
    #[error("unexpected character {found:?} in price text: {input:?}")]
    UnexpectedCharacter { input: String, found: char },

    /// The numeric value does not fit the money representation.
    #[error("price text out of range: {input:?}")]
    OutOfRange { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::NoDigits {
            input: "грн".to_string(),
        };
        assert_eq!(err.to_string(), "no digits in price text: \"грн\"");

        let err = ParseError::UnexpectedCharacter {
            input: "12x".to_string(),
            found: 'x',
        };
        assert_eq!(
            err.to_string(),
            "unexpected character 'x' in price text: \"12x\""
        );
    }
}
