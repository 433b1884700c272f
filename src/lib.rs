//! # User Search Engine
//!
//! Fuzzy user search for the accounts service:
//! - Multi-field matching (display name, email, messaging handle)
//! - Query-shape aware field weighting with `max` fusion
//! - Pluggable candidate directories (SQLite store, remote HTTP API)
//! - Async/await architecture
//! - Optional interfaces: HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use user_search_engine::directory::SqliteDirectory;
//! use user_search_engine::{SearchRequest, UserSearchEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let directory = Arc::new(SqliteDirectory::new("users.db").await?);
//!     let engine = UserSearchEngine::new(directory);
//!
//!     let response = engine.suggest(SearchRequest::new("a.ivanova")).await?;
//!     for m in &response.matches {
//!         println!("{} - {:.1}%", m.user.display_label(), m.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod directory;
pub mod engine;
pub mod error;
pub mod ranking;

// Re-export primary types
pub use self::core::{SearchResponse, SearchResultType, UserRecord};
pub use engine::{SearchRequest, UserSearchEngine};
pub use error::{Result, SearchEngineError};
pub use ranking::{rank_users, MatchResult, QueryShape, RankOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
