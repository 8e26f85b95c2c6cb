//! Error types for the msg-stream-rust library.
//!
//! This module provides custom error types using `thiserror` for better error handling
//! and more specific error messages throughout the pipeline.

use thiserror::Error;

/// Errors that can occur in the msg-stream-rust pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The message source cannot be opened or stays inaccessible
    #[error("Message source unavailable: {0}")]
    SourceUnavailable(String),

    /// A message unit could not be decoded into text content
    #[error("Message decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool errors
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Chart rendering errors
    #[error("Chart rendering error: {0}")]
    Render(String),
}

/// Convenience type alias for Result with PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;
