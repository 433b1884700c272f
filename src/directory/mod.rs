pub mod remote;
pub mod sqlite;

use async_trait::async_trait;

use crate::core::UserRecord;
use crate::error::Result;

pub use remote::RemoteDirectory;
pub use sqlite::SqliteDirectory;

/// Trait for candidate sources backing the search engine.
///
/// A directory owns the cheap pre-filter; the ranking core assumes the
/// returned candidate list is already bounded to a reasonable size.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Case-insensitive substring pre-filter across display name, email and
    /// handle, capped at `cap` records.
    async fn prefilter(&self, query: &str, cap: usize) -> Result<Vec<UserRecord>>;

    /// Fetch a single record by account id
    async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>>;

    /// Directory statistics
    async fn stats(&self) -> Result<DirectoryStats>;

    /// Get directory name for logging
    fn name(&self) -> &str;

    /// Check if the directory is reachable
    async fn is_available(&self) -> bool;
}

/// Directory statistics
#[derive(Debug, Clone)]
pub struct DirectoryStats {
    pub total_users: u64,
    pub with_email: u64,
    pub with_handle: u64,
    pub oldest_sync: Option<chrono::DateTime<chrono::Utc>>,
    pub newest_sync: Option<chrono::DateTime<chrono::Utc>>,
}
