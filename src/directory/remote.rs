use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::core::UserRecord;
use crate::directory::{DirectoryStats, UserDirectory};
use crate::error::{Result, SearchEngineError};

/// HTTP directory backed by the account service's candidate API.
///
/// The upstream keeps identity-provider blocks nested per user; this
/// directory flattens them onto [`UserRecord`] so the engine never sees the
/// wire shape.
pub struct RemoteDirectory {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    sso: Option<WireSso>,
    #[serde(default)]
    messenger: Option<WireMessenger>,
    #[serde(default)]
    synced_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
struct WireSso {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessenger {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireStats {
    total_users: u64,
    #[serde(default)]
    with_email: u64,
    #[serde(default)]
    with_handle: u64,
    #[serde(default)]
    oldest_sync: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    newest_sync: Option<chrono::DateTime<chrono::Utc>>,
}

impl RemoteDirectory {
    /// Create a new remote directory client.
    pub async fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(Duration::from_millis(1500))
            .build()
            .map_err(SearchEngineError::HttpRequest)?;

        // Health check
        let health_url = format!("{}/health", base_url);
        client
            .get(&health_url)
            .send()
            .await
            .map_err(|e| SearchEngineError::Directory {
                directory: "remote".to_string(),
                message: format!("Health check failed: {}", e),
            })?;

        Ok(Self { client, base_url })
    }

    fn wire_to_record(wire: WireUser) -> UserRecord {
        let mut record = UserRecord::new(wire.id);
        if let Some(sso) = wire.sso {
            record.display_name = sso.name;
            record.email = sso.email;
        }
        if let Some(messenger) = wire.messenger {
            record.handle = messenger.username;
            record.photo_url = messenger.photo_url;
        }
        if let Some(synced_at) = wire.synced_at {
            record.synced_at = synced_at;
        }
        record
    }

    async fn fetch_candidates(&self, query: &str, cap: usize) -> Result<Vec<WireUser>> {
        let url = format!(
            "{}/candidates?query={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            cap
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchEngineError::Directory {
                directory: "remote".to_string(),
                message: format!("Candidate request failed: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(SearchEngineError::Directory {
                directory: "remote".to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let users: Vec<WireUser> =
            response
                .json()
                .await
                .map_err(|e| SearchEngineError::Directory {
                    directory: "remote".to_string(),
                    message: format!("Invalid JSON: {}", e),
                })?;

        Ok(users)
    }
}

#[async_trait]
impl UserDirectory for RemoteDirectory {
    async fn prefilter(&self, query: &str, cap: usize) -> Result<Vec<UserRecord>> {
        let wire_users = self.fetch_candidates(query, cap).await?;
        Ok(wire_users.into_iter().map(Self::wire_to_record).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let url = format!("{}/users/{}", self.base_url, urlencoding::encode(id));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchEngineError::Directory {
                directory: "remote".to_string(),
                message: format!("User request failed: {}", e),
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SearchEngineError::Directory {
                directory: "remote".to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let wire: WireUser = response
            .json()
            .await
            .map_err(|e| SearchEngineError::Directory {
                directory: "remote".to_string(),
                message: format!("Invalid JSON: {}", e),
            })?;

        Ok(Some(Self::wire_to_record(wire)))
    }

    async fn stats(&self) -> Result<DirectoryStats> {
        let url = format!("{}/stats", self.base_url);

        let wire: WireStats = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchEngineError::Directory {
                directory: "remote".to_string(),
                message: format!("Stats request failed: {}", e),
            })?
            .json()
            .await
            .map_err(|e| SearchEngineError::Directory {
                directory: "remote".to_string(),
                message: format!("Invalid JSON: {}", e),
            })?;

        Ok(DirectoryStats {
            total_users: wire.total_users,
            with_email: wire.with_email,
            with_handle: wire.with_handle,
            oldest_sync: wire.oldest_sync,
            newest_sync: wire.newest_sync,
        })
    }

    fn name(&self) -> &str {
        "remote"
    }

    async fn is_available(&self) -> bool {
        let health_url = format!("{}/health", self.base_url);
        match self.client.get(&health_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
