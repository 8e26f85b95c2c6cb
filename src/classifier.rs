//! Message length classification
//!
//! Pure rule mapping a message's character count onto a [`Category`].
//! The boundaries are fixed: under 20 characters is Short, 20 through 50
//! inclusive is Medium, anything longer is Long.

use crate::models::Category;

/// Classify message content by its character count.
///
/// Total and deterministic; empty content classifies as Short.
#[must_use]
pub fn classify(content: &str) -> Category {
    classify_length(content.chars().count())
}

/// Classify an already-computed character count.
#[must_use]
pub const fn classify_length(length: usize) -> Category {
    if length < 20 {
        Category::Short
    } else if length <= 50 {
        Category::Medium
    } else {
        Category::Long
    }
}
