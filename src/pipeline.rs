//! Ingest wiring: decoded feed message → classification → durable store
//!
//! Classification and storage happen synchronously for each message so that
//! store ids follow arrival order with a single writer.

use std::sync::Arc;

use tracing::info;

use crate::classifier::classify_length;
use crate::db::MessageStore;
use crate::error::Result;
use crate::models::{ClassifiedMessage, IncomingMessage, NewClassifiedMessage};

/// Single-writer ingest path shared by the reader loop and tests.
pub struct IngestPipeline {
    store: Arc<MessageStore>,
}

impl IngestPipeline {
    #[must_use]
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self { store }
    }

    /// Classify one feed message and persist the record.
    pub fn handle_message(&self, message: IncomingMessage) -> Result<ClassifiedMessage> {
        let length = message.message.chars().count();
        let category = classify_length(length);

        let stored = self.store.append(NewClassifiedMessage {
            content: message.message,
            author: message.author,
            keyword: message.keyword_mentioned,
            length: i64::try_from(length).unwrap_or(i64::MAX),
            category,
        })?;

        info!(
            id = stored.id,
            category = %stored.category,
            length = stored.length,
            "Classified and stored message"
        );
        Ok(stored)
    }

    #[must_use]
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }
}
