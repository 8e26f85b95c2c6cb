//! Msg Stream - Live Message Classification Pipeline
//!
//! A small real-time ETL pipeline: tail an append-only JSON-lines message
//! feed, classify each message by character length, persist every classified
//! record in SQLite, and periodically render the category distribution as a
//! bar chart.
//!
//! # Components
//!
//! - [`reader::StreamReader`] tails the growing feed with a byte-offset cursor
//! - [`classifier`] maps message length onto Short/Medium/Long
//! - [`db::MessageStore`] is the append-only durable store
//! - [`reporter::DistributionReporter`] snapshots counts and drives the chart

/// Chart rendering
pub mod chart;
/// Message length classification
pub mod classifier;
/// Configuration management
pub mod config;
/// Database operations and connection pooling
pub mod db;
/// Error types
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Data models and structures
pub mod models;
/// Ingest wiring from feed to store
pub mod pipeline;
/// Live feed tailing
pub mod reader;
/// Periodic distribution reporting
pub mod reporter;
/// Database schema definitions
pub mod schema;

// Re-export key components for easier access
pub use chart::{ChartRenderer, SvgBarChart};
pub use classifier::{classify, classify_length};
pub use db::MessageStore;
pub use error::{PipelineError, Result};
pub use models::{Category, CategoryCounts, ClassifiedMessage, IncomingMessage};
pub use pipeline::IngestPipeline;
pub use reader::StreamReader;
pub use reporter::DistributionReporter;
