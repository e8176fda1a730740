//! Database access for cosmic-api
//!
//! SQLite database in the root folder holding journal entries.

pub mod journal;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Creates the database file (and parent directory) if missing.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;
    init_tables(&pool).await?;

    Ok(pool)
}

/// Create cosmic-api tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> cosmic_common::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            planet TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            landscape_url TEXT,
            species TEXT,
            notes TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_journal_user_time ON journal_entries (user_id, timestamp)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (journal_entries)");

    Ok(())
}
