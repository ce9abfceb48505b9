//! # Filter View
//!
//! Derives the visible subset of cart items from a search query.
//!
//! Filtering is strictly a display concern: it never mutates the cart and
//! never feeds into pricing. A cart whose every item is filtered out is
//! still a non-empty cart.

use crate::types::{CategoryFilter, FilterQuery, LineItem};

/// True if the item matches the query.
///
/// Match rule: (text empty OR name contains text, case-insensitively)
/// AND (category filter is All OR equals the item category).
/// Lowercasing is Unicode-aware; item names are Ukrainian.
pub fn matches(item: &LineItem, query: &FilterQuery) -> bool {
    let text_ok = query.text.is_empty()
        || item
            .name
            .to_lowercase()
            .contains(&query.text.to_lowercase());

    let category_ok = match &query.category {
        CategoryFilter::All => true,
        CategoryFilter::Only(category) => item.category == *category,
    };

    text_ok && category_ok
}

/// Ids of the items to display, preserving cart order.
pub fn visible_ids(items: &[LineItem], query: &FilterQuery) -> Vec<String> {
    items
        .iter()
        .filter(|item| matches(item, query))
        .map(|item| item.id.clone())
        .collect()
}
