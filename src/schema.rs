//! Database schema definitions
//!
//! This module provides constants for table and column names used with rusqlite.

/// Classified messages table schema
pub mod classified_messages {
    /// Table name
    pub const TABLE: &str = "classified_messages";
    /// Primary key column
    pub const ID: &str = "id";
    /// Message text content column
    pub const CONTENT: &str = "content";
    /// Message author column
    pub const AUTHOR: &str = "author";
    /// Flagged keyword column
    pub const KEYWORD: &str = "keyword";
    /// Character count column
    pub const LENGTH: &str = "length";
    /// Length category column
    pub const CATEGORY: &str = "category";
    /// Storage timestamp column
    pub const RECORDED_AT: &str = "recorded_at";
}
