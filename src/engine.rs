use std::sync::Arc;
use std::time::Instant;

use crate::core::{SearchResponse, SearchResultType, UserRecord};
use crate::directory::{DirectoryStats, UserDirectory};
use crate::error::Result;
use crate::ranking::{rank_users, RankOptions};

/// Default number of suggestions returned while the user is typing.
pub const DEFAULT_SUGGEST_LIMIT: usize = 10;

/// Default minimum fused score a candidate must reach.
pub const DEFAULT_MIN_SCORE: f64 = 60.0;

/// Upper bound on candidates pulled from the directory per query.
const DEFAULT_PREFILTER_CAP: usize = 500;

/// Main user-search orchestrator: directory pre-filter, then fuzzy ranking.
pub struct UserSearchEngine {
    directory: Arc<dyn UserDirectory>,
    prefilter_cap: usize,
}

/// Search request parameters
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
    pub min_score: f64,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_SUGGEST_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl UserSearchEngine {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            directory,
            prefilter_cap: DEFAULT_PREFILTER_CAP,
        }
    }

    /// Override the candidate cap pulled from the directory per query.
    pub fn with_prefilter_cap(mut self, cap: usize) -> Self {
        self.prefilter_cap = cap;
        self
    }

    /// Suggest users for a typed query.
    ///
    /// Directory failures propagate; an empty match list does not — no match
    /// above the threshold is a valid outcome.
    pub async fn suggest(&self, request: SearchRequest) -> Result<SearchResponse> {
        let start = Instant::now();

        let candidates = self
            .directory
            .prefilter(&request.query, self.prefilter_cap)
            .await?;
        tracing::debug!(
            "Directory {} returned {} candidates for {:?}",
            self.directory.name(),
            candidates.len(),
            request.query
        );

        let options = RankOptions {
            limit: request.limit,
            min_score: request.min_score,
        };
        let matches = rank_users(&candidates, &request.query, &options);

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        let result_type = SearchResultType::for_matches(&matches);

        Ok(SearchResponse {
            result_type,
            candidates_considered: candidates.len(),
            matches,
            latency_ms,
            directory: self.directory.name().to_string(),
        })
    }

    /// Fetch a single user by account id.
    pub async fn get_user(&self, id: &str) -> Result<Option<UserRecord>> {
        self.directory.get_by_id(id).await
    }

    /// Get directory statistics
    pub async fn directory_stats(&self) -> Result<DirectoryStats> {
        self.directory.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SqliteDirectory;

    #[tokio::test]
    async fn test_engine_creation() {
        let directory = Arc::new(SqliteDirectory::new(":memory:").await.unwrap());
        let engine = UserSearchEngine::new(directory);
        let stats = engine.directory_stats().await.unwrap();
        assert_eq!(stats.total_users, 0);
    }

    #[tokio::test]
    async fn test_empty_directory_is_not_an_error() {
        let directory = Arc::new(SqliteDirectory::new(":memory:").await.unwrap());
        let engine = UserSearchEngine::new(directory);

        let response = engine.suggest(SearchRequest::new("alice")).await.unwrap();
        assert!(response.is_empty());
        assert_eq!(response.result_type, SearchResultType::Empty);
        assert_eq!(response.candidates_considered, 0);
    }
}
