use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

use crate::core::UserRecord;
use crate::directory::{DirectoryStats, UserDirectory};
use crate::error::{Result, SearchEngineError};
use crate::ranking::{normalize, normalize_handle};

/// SQLite-backed user directory.
///
/// Schema:
/// ```sql
/// CREATE TABLE users (
///     id TEXT PRIMARY KEY,
///     name_norm TEXT NOT NULL DEFAULT '',
///     email_norm TEXT NOT NULL DEFAULT '',
///     handle_norm TEXT NOT NULL DEFAULT '',
///     record TEXT NOT NULL,
///     synced_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// The `*_norm` columns hold lowercased copies of the searchable fields; the
/// substring pre-filter runs against them with `instr`, so the stored record
/// document never needs parsing until a row is actually returned.
pub struct SqliteDirectory {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDirectory {
    /// Open (or create) a directory database.
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(SearchEngineError::Database)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name_norm TEXT NOT NULL DEFAULT '',
                email_norm TEXT NOT NULL DEFAULT '',
                handle_norm TEXT NOT NULL DEFAULT '',
                record TEXT NOT NULL,
                synced_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_users_synced_at ON users(synced_at)",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert or replace a record, refreshing the normalized shadow columns.
    pub async fn upsert(&self, user: &UserRecord) -> Result<()> {
        let record_json = serde_json::to_string(user)?;
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT OR REPLACE INTO users (id, name_norm, email_norm, handle_norm, record, synced_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id,
                normalize(user.display_name.as_deref()),
                normalize(user.email.as_deref()),
                normalize_handle(user.handle.as_deref()),
                record_json,
                user.synced_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    /// Remove a record; returns whether anything was deleted.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM users WHERE id = ?", params![id])?;
        Ok(deleted > 0)
    }
}

fn parse_synced_at(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

fn record_from_row(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<UserRecord> {
    let record_json: String = row.get(idx)?;
    serde_json::from_str(&record_json)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

#[async_trait]
impl UserDirectory for SqliteDirectory {
    async fn prefilter(&self, query: &str, cap: usize) -> Result<Vec<UserRecord>> {
        let needle = normalize(Some(query));
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        // A typed `@handle` should still pre-match the stripped handle column
        let handle_needle = normalize_handle(Some(query));

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT record FROM users
             WHERE instr(name_norm, ?1) > 0
                OR instr(email_norm, ?1) > 0
                OR instr(handle_norm, ?2) > 0
             LIMIT ?3",
        )?;

        let rows = stmt.query_map(params![needle, handle_needle, cap as i64], |row| {
            record_from_row(row, 0)
        })?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let conn = self.conn.lock().unwrap();
        let record = conn
            .query_row(
                "SELECT record FROM users WHERE id = ?",
                params![id],
                |row| record_from_row(row, 0),
            )
            .optional()?;
        Ok(record)
    }

    async fn stats(&self) -> Result<DirectoryStats> {
        let conn = self.conn.lock().unwrap();

        let total_users: u64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        let with_email: u64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE email_norm <> ''",
            [],
            |row| row.get(0),
        )?;
        let with_handle: u64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE handle_norm <> ''",
            [],
            |row| row.get(0),
        )?;

        let oldest_sync = conn
            .query_row("SELECT MIN(synced_at) FROM users", [], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?
            .flatten();
        let newest_sync = conn
            .query_row("SELECT MAX(synced_at) FROM users", [], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?
            .flatten();

        Ok(DirectoryStats {
            total_users,
            with_email,
            with_handle,
            oldest_sync: parse_synced_at(oldest_sync),
            newest_sync: parse_synced_at(newest_sync),
        })
    }

    fn name(&self) -> &str {
        "sqlite"
    }

    async fn is_available(&self) -> bool {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)).is_ok()
    }
}
