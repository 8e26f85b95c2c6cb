//! Data models for message ingestion and storage
//!
//! This module contains all data structures used throughout the pipeline,
//! including incoming feed messages, classified records, and aggregate counts.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Length category of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Fewer than 20 characters
    Short,
    /// 20 to 50 characters inclusive
    Medium,
    /// More than 50 characters
    Long,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Category name as stored in the database
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Short" => Ok(Self::Short),
            "Medium" => Ok(Self::Medium),
            "Long" => Ok(Self::Long),
            other => Err(format!("Unknown category: {other}")),
        }
    }
}

/// A message unit decoded from one line of the live feed.
///
/// The producer emits richer JSON objects than the pipeline needs; extra
/// fields are ignored and the optional ones are carried through to storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Message text content
    pub message: String,
    /// Name of the message author, if the producer supplies one
    #[serde(default)]
    pub author: Option<String>,
    /// Keyword the producer flagged in the message, if any
    #[serde(default)]
    pub keyword_mentioned: Option<String>,
}

/// Data for inserting a new classified record
#[derive(Debug, Clone)]
pub struct NewClassifiedMessage {
    /// Original message text
    pub content: String,
    /// Message author, if known
    pub author: Option<String>,
    /// Flagged keyword, if any
    pub keyword: Option<String>,
    /// Character count of `content`
    pub length: i64,
    /// Length category derived from `length`
    pub category: Category,
}

/// Database representation of a classified record
#[derive(Debug, Clone)]
pub struct ClassifiedMessage {
    /// Database primary key, monotonically increasing
    pub id: i64,
    /// Original message text
    pub content: String,
    /// Message author, if known
    pub author: Option<String>,
    /// Flagged keyword, if any
    pub keyword: Option<String>,
    /// Character count of `content`
    pub length: i64,
    /// Length category derived from `length`
    pub category: Category,
    /// Timestamp when the record was stored (UTC)
    pub recorded_at: NaiveDateTime,
}

/// Per-category record totals.
///
/// Always carries all three categories so that empty ones report as 0
/// rather than being omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    /// Number of Short records
    pub short: u64,
    /// Number of Medium records
    pub medium: u64,
    /// Number of Long records
    pub long: u64,
}

impl CategoryCounts {
    /// Look up the count for a single category.
    #[must_use]
    pub const fn get(&self, category: Category) -> u64 {
        match category {
            Category::Short => self.short,
            Category::Medium => self.medium,
            Category::Long => self.long,
        }
    }

    /// Set the count for a single category.
    pub fn set(&mut self, category: Category, count: u64) {
        match category {
            Category::Short => self.short = count,
            Category::Medium => self.medium = count,
            Category::Long => self.long = count,
        }
    }

    /// All (category, count) pairs in display order.
    #[must_use]
    pub const fn entries(&self) -> [(Category, u64); 3] {
        [
            (Category::Short, self.short),
            (Category::Medium, self.medium),
            (Category::Long, self.long),
        ]
    }

    /// Total number of records across all categories.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.short + self.medium + self.long
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("tiny".parse::<Category>().is_err());
    }

    #[test]
    fn test_counts_always_cover_all_categories() {
        let counts = CategoryCounts::default();
        assert_eq!(counts.entries().len(), 3);
        for (_, count) in counts.entries() {
            assert_eq!(count, 0);
        }
    }

    #[test]
    fn test_incoming_message_tolerates_extra_fields() {
        let line = r#"{"message": "I have a dream.", "author": "MLK", "timestamp": "1963-08-28 15:00:00", "message_length": 15}"#;
        let msg: IncomingMessage = serde_json::from_str(line).expect("valid message");
        assert_eq!(msg.message, "I have a dream.");
        assert_eq!(msg.author.as_deref(), Some("MLK"));
        assert!(msg.keyword_mentioned.is_none());
    }
}
