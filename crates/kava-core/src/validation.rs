//! # Validation Module
//!
//! Quantity clamping and lenient parsing of user input.
//!
//! ## Clamp, Don't Reject
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types a quantity into the cart row                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_quantity("150")  →  150  →  clamp  →  99                        │
//! │  parse_quantity("0")    →    0  →  clamp  →   1                        │
//! │  parse_quantity("abc")  →  (no number)    →   1                        │
//! │                                                                         │
//! │  The cart NEVER rejects quantity input; it corrects it. The UI then    │
//! │  renders the corrected value back into the field.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::{MAX_QUANTITY, MIN_QUANTITY};

/// Clamps a raw quantity into `[MIN_QUANTITY, MAX_QUANTITY]`.
///
/// ## Example
/// ```rust
/// use kava_core::validation::clamp_quantity;
///
/// assert_eq!(clamp_quantity(5), 5);
/// assert_eq!(clamp_quantity(150), 99);
/// assert_eq!(clamp_quantity(0), 1);
/// assert_eq!(clamp_quantity(-3), 1);
/// ```
pub fn clamp_quantity(value: i64) -> u32 {
    clamp_quantity_min(value, MIN_QUANTITY)
}

/// Clamps with a per-item minimum override (some items sell in packs).
/// The minimum itself is kept within the global bounds.
pub fn clamp_quantity_min(value: i64, min: u32) -> u32 {
    let min = min.clamp(MIN_QUANTITY, MAX_QUANTITY);
    value.clamp(min as i64, MAX_QUANTITY as i64) as u32
}

/// Parses quantity text leniently: trims, reads an integer, clamps.
/// Non-numeric input becomes the minimum, per the correction policy above.
///
/// ## Example
/// ```rust
/// use kava_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("7"), 7);
/// assert_eq!(parse_quantity(" 150 "), 99);
/// assert_eq!(parse_quantity("abc"), 1);
/// assert_eq!(parse_quantity(""), 1);
/// ```
pub fn parse_quantity(text: &str) -> u32 {
    match text.trim().parse::<i64>() {
        Ok(value) => clamp_quantity(value),
        Err(_) => MIN_QUANTITY,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
