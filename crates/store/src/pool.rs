//! Connection pool construction and migration runner

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use episodeer_core::Result;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Open (creating if absent) the library database in WAL mode — a
/// single writer, many concurrent readers, matching §5's resource model.
pub async fn connect(database_path: &Path, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(episodeer_core::Error::from)?;

    Ok(pool)
}

/// Apply versioned migrations. Must run before the worker task starts.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| episodeer_core::Error::Internal(format!("migration failed: {e}")))?;
    tracing::info!("store migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_and_migrate_on_fresh_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("library.db");
        let pool = connect(&db_path, 5).await.unwrap();
        migrate(&pool).await.unwrap();

        let row: (i64,) = sqlx::query_as("SELECT count(*) FROM sources")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, 0);
    }
}
