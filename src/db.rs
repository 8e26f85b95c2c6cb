use std::fs;
use std::path::Path;

use chrono::Utc;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, Row};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Category, CategoryCounts, ClassifiedMessage, NewClassifiedMessage};
use crate::schema::classified_messages;

// Type alias for the database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pool size used when no configuration is supplied.
const DEFAULT_MAX_CONNECTIONS: u32 = 4;

/// Durable home for classified records.
///
/// Append-only single-writer store over a single SQLite file. All access to
/// the persistent file goes through this type.
pub struct MessageStore {
    pool: DbPool,
}

impl MessageStore {
    /// Open (or create) the store at the given path and ensure its schema exists.
    pub fn new(db_path: &Path) -> Result<Self> {
        Self::with_max_connections(db_path, DEFAULT_MAX_CONNECTIONS)
    }

    /// Open the store with an explicit connection pool size.
    pub fn with_max_connections(db_path: &Path, max_connections: u32) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder().max_size(max_connections).build(manager)?;

        // Run migrations
        let conn = pool.get()?;
        Self::run_migrations(&conn)?;

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// Idempotent: safe against an already-initialized store, existing rows
    /// are left intact.
    fn run_migrations(conn: &Connection) -> Result<()> {
        conn.execute_batch(include_str!(
            "../migrations/2026-08-10-000000_create_classified_messages/up.sql"
        ))?;
        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Get a connection without waiting; None when the pool is exhausted.
    #[must_use]
    pub fn try_connection(&self) -> Option<DbConnection> {
        self.pool.try_get()
    }

    /// Durably persist a new classified record.
    ///
    /// Assigns the storage timestamp and a monotonically increasing id, and
    /// returns the stored row. Persistence failures propagate; nothing is
    /// silently dropped.
    pub fn append(&self, new: NewClassifiedMessage) -> Result<ClassifiedMessage> {
        let conn = self.get_connection()?;
        let recorded_at = Utc::now().naive_utc();

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}, {}, {}) VALUES (?, ?, ?, ?, ?, ?)",
                classified_messages::TABLE,
                classified_messages::CONTENT,
                classified_messages::AUTHOR,
                classified_messages::KEYWORD,
                classified_messages::LENGTH,
                classified_messages::CATEGORY,
                classified_messages::RECORDED_AT
            ),
            params![
                new.content,
                new.author,
                new.keyword,
                new.length,
                new.category.as_str(),
                recorded_at
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, category = %new.category, length = new.length, "Stored classified message");

        Ok(ClassifiedMessage {
            id,
            content: new.content,
            author: new.author,
            keyword: new.keyword,
            length: new.length,
            category: new.category,
            recorded_at,
        })
    }

    /// Count stored records per category.
    ///
    /// Reflects every completed [`append`](Self::append); categories with no
    /// records report 0 rather than being omitted.
    pub fn count_by_category(&self) -> Result<CategoryCounts> {
        let conn = self.get_connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {}, COUNT(*) FROM {} GROUP BY {}",
            classified_messages::CATEGORY,
            classified_messages::TABLE,
            classified_messages::CATEGORY
        ))?;

        let rows = stmt.query_map(params![], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = CategoryCounts::default();
        for row in rows {
            let (name, count) = row?;
            match name.parse::<Category>() {
                Ok(category) => counts.set(category, u64::try_from(count).unwrap_or(0)),
                // Rows written by something other than this pipeline
                Err(_) => warn!(category = %name, "Ignoring rows with unknown category"),
            }
        }

        Ok(counts)
    }

    /// Total number of stored records.
    pub fn total_messages(&self) -> Result<u64> {
        let conn = self.get_connection()?;
        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", classified_messages::TABLE),
            params![],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    /// Fetch every stored record in id order.
    pub fn all_messages(&self) -> Result<Vec<ClassifiedMessage>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {} ASC",
            classified_messages::TABLE,
            classified_messages::ID
        ))?;

        let message_iter = stmt.query_map(params![], Self::map_classified_message)?;

        let mut results = Vec::new();
        for message in message_iter {
            results.push(message?);
        }

        Ok(results)
    }

    /// Map a database row to a ClassifiedMessage
    fn map_classified_message(row: &Row) -> rusqlite::Result<ClassifiedMessage> {
        let category: String = row.get(classified_messages::CATEGORY)?;
        let category = category.parse::<Category>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::from(e),
            )
        })?;

        Ok(ClassifiedMessage {
            id: row.get(classified_messages::ID)?,
            content: row.get(classified_messages::CONTENT)?,
            author: row.get(classified_messages::AUTHOR)?,
            keyword: row.get(classified_messages::KEYWORD)?,
            length: row.get(classified_messages::LENGTH)?,
            category,
            recorded_at: row.get(classified_messages::RECORDED_AT)?,
        })
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore").finish_non_exhaustive()
    }
}
