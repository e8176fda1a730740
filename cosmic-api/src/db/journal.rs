//! Journal entry database operations
//!
//! Entries live under a user id issued by the external identity provider.
//! Only create and list are supported.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use cosmic_common::{Error, Result};

use crate::models::{JournalEntry, NewJournalEntry};

/// Insert a new entry for `user_id`
///
/// Rejects a blank user id or planet with [`Error::InvalidInput`].
pub async fn add_entry(
    pool: &SqlitePool,
    user_id: &str,
    entry: NewJournalEntry,
) -> Result<JournalEntry> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(Error::InvalidInput(
            "User ID is required to save journal entry.".to_string(),
        ));
    }
    let planet = entry.planet.trim();
    if planet.is_empty() {
        return Err(Error::InvalidInput(
            "Planet is required to save journal entry.".to_string(),
        ));
    }

    let stored = JournalEntry {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        planet: planet.to_string(),
        timestamp: Utc::now(),
        landscape_url: entry.landscape_url,
        species: entry.species,
        notes: entry.notes,
    };

    let species = stored
        .species
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| Error::Internal(format!("Failed to serialize species: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO journal_entries (
            id, user_id, planet, timestamp, landscape_url, species, notes
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(stored.id.to_string())
    .bind(&stored.user_id)
    .bind(&stored.planet)
    // Fixed-width UTC form keeps lexical order equal to time order
    .bind(stored.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true))
    .bind(&stored.landscape_url)
    .bind(&species)
    .bind(&stored.notes)
    .execute(pool)
    .await?;

    tracing::info!(user_id = %stored.user_id, entry_id = %stored.id, "Journal entry saved");

    Ok(stored)
}

/// List a user's entries, newest first
///
/// A blank user id yields an empty list.
pub async fn list_entries(pool: &SqlitePool, user_id: &str) -> Result<Vec<JournalEntry>> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        tracing::warn!("Journal listing requested without user ID");
        return Ok(Vec::new());
    }

    let rows = sqlx::query(
        r#"
        SELECT id, user_id, planet, timestamp, landscape_url, species, notes
        FROM journal_entries
        WHERE user_id = ?
        ORDER BY timestamp DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let entries = rows
        .into_iter()
        .map(|row| {
            let id: String = row.get("id");
            let id = Uuid::parse_str(&id)
                .map_err(|e| Error::Internal(format!("Failed to parse entry id: {}", e)))?;

            let timestamp: String = row.get("timestamp");
            let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|e| Error::Internal(format!("Failed to parse timestamp: {}", e)))?
                .with_timezone(&Utc);

            let species: Option<String> = row.get("species");
            let species = species
                .map(|s| serde_json::from_str(&s))
                .transpose()
                .map_err(|e| Error::Internal(format!("Failed to deserialize species: {}", e)))?;

            Ok(JournalEntry {
                id,
                user_id: row.get("user_id"),
                planet: row.get("planet"),
                timestamp,
                landscape_url: row.get("landscape_url"),
                species,
                notes: row.get("notes"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(user_id = %user_id, count = entries.len(), "Fetched journal entries");

    Ok(entries)
}
