use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flattened directory view of an account, as consumed by the search engine.
///
/// The account store keeps identity-provider blocks nested; directories
/// flatten the three searchable fields out of them. Every field besides the
/// id is optional — a user may have signed in with only one provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    /// Stable account id in the backing store
    #[serde(default)]
    pub id: String,

    /// Display name from the institutional profile
    #[serde(default)]
    pub display_name: Option<String>,

    /// Institutional email
    #[serde(default)]
    pub email: Option<String>,

    /// Messaging-platform username, stored without the leading `@`
    #[serde(default)]
    pub handle: Option<String>,

    /// Avatar URL from the messaging profile, if any
    #[serde(default)]
    pub photo_url: Option<String>,

    /// When this record was last synced from the account store
    #[serde(default = "Utc::now")]
    pub synced_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a record with just an id; fields are filled in by the caller.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            email: None,
            handle: None,
            photo_url: None,
            synced_at: Utc::now(),
        }
    }

    /// Best human-readable label (for logging/UI).
    pub fn display_label(&self) -> String {
        if let Some(name) = &self.display_name {
            return name.clone();
        }
        if let Some(handle) = &self.handle {
            return format!("@{}", handle);
        }
        if let Some(email) = &self.email {
            return email.clone();
        }
        self.id.clone()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
