//! Journal entry models
//!
//! An entry records what a signed-in user saw on a planet: the generated
//! landscape, the generated species and free-form notes. Entries are created
//! once and never modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored journal entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    pub planet: String,
    /// Server-assigned creation time
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landscape_url: Option<String>,
    /// Species objects as the client saved them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request body for creating an entry (user id comes from the path)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    #[serde(default)]
    pub planet: String,
    #[serde(default)]
    pub landscape_url: Option<String>,
    #[serde(default)]
    pub species: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub notes: Option<String>,
}
