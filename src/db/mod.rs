//! Database module for SQLite persistence.
//!
//! SQLite plays the document store: one table per collection, one row per document.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Initialize the database connection pool and create the collections.
pub async fn init_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?;

    // Ensure the parent directory of a file-backed store exists
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
    }

    let options = options
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    create_collections(&pool).await?;

    Ok(pool)
}

/// Create the `Profile` and `Tank` collections if they don't exist.
async fn create_collections(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // `slot` can only ever hold 1, so the unique constraint caps the table at one row.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS Profile (
            id TEXT PRIMARY KEY,
            slot INTEGER NOT NULL DEFAULT 1 UNIQUE CHECK (slot = 1),
            last_updated TEXT NOT NULL,
            username TEXT NOT NULL,
            color TEXT NOT NULL,
            role TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS Tank (
            id TEXT PRIMARY KEY,
            last_updated TEXT NOT NULL,
            location TEXT NOT NULL,
            lat REAL NOT NULL,
            long REAL NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
