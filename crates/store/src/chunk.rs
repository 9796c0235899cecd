//! Chunk repository

use sqlx::{Executor, Sqlite, SqliteConnection};

use episodeer_core::{Chunk, ChunkStatus, EpisodeId, Error, Result};

use crate::rows::ChunkRow;

pub struct ChunkRepo;

impl ChunkRepo {
    /// Insert a dense `{0, 1, …, n-1}` chunk plan for an episode. Callers
    /// build the plan from the Chunker's output; this only persists it.
    ///
    /// Takes a concrete connection rather than a generic `Executor`
    /// because it issues one statement per chunk and needs to reborrow
    /// the same connection across the loop — a `&mut Transaction`
    /// isn't `Copy`, so a generic bound would force callers onto
    /// `&Pool` and rule out composing this into a larger transaction
    /// (e.g. the Library Service's "episode + N chunks" create path).
    /// Pass `&mut *tx` (a `Transaction` derefs to `SqliteConnection`)
    /// or a bare `&mut SqliteConnection`.
    pub async fn insert_plan(exec: &mut SqliteConnection, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            sqlx::query(
                r#"
                INSERT INTO chunks
                    (episode_id, chunk_index, text, status, duration_secs,
                     audio_path, error_message, label, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(chunk.episode_id)
            .bind(chunk.chunk_index)
            .bind(&chunk.text)
            .bind(chunk.status)
            .bind(chunk.duration_secs)
            .bind(&chunk.audio_path)
            .bind(&chunk.error_message)
            .bind(&chunk.label)
            .bind(chunk.created_at)
            .execute(&mut *exec)
            .await?;
        }
        Ok(())
    }

    pub async fn list_by_episode<'e, E>(exec: E, episode_id: EpisodeId) -> Result<Vec<Chunk>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<ChunkRow> = sqlx::query_as(
            "SELECT * FROM chunks WHERE episode_id = ? ORDER BY chunk_index",
        )
        .bind(episode_id)
        .fetch_all(exec)
        .await?;
        Ok(rows.into_iter().map(Chunk::from).collect())
    }

    pub async fn get<'e, E>(exec: E, episode_id: EpisodeId, chunk_index: i64) -> Result<Chunk>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: ChunkRow = sqlx::query_as(
            "SELECT * FROM chunks WHERE episode_id = ? AND chunk_index = ?",
        )
        .bind(episode_id)
        .bind(chunk_index)
        .fetch_optional(exec)
        .await?
        .ok_or_else(|| Error::NotFound(format!("chunk {episode_id}/{chunk_index}")))?;
        Ok(row.into())
    }

    pub async fn count<'e, E>(exec: E, episode_id: EpisodeId) -> Result<i64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (i64,) = sqlx::query_as("SELECT count(*) FROM chunks WHERE episode_id = ?")
            .bind(episode_id)
            .fetch_one(exec)
            .await?;
        Ok(row.0)
    }

    /// Lowest-index `pending` chunk, if any — the worker's pick step.
    pub async fn next_pending<'e, E>(exec: E, episode_id: EpisodeId) -> Result<Option<Chunk>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: Option<ChunkRow> = sqlx::query_as(
            r#"
            SELECT * FROM chunks
            WHERE episode_id = ? AND status = 'pending'
            ORDER BY chunk_index ASC
            LIMIT 1
            "#,
        )
        .bind(episode_id)
        .fetch_optional(exec)
        .await?;
        Ok(row.map(Chunk::from))
    }

    pub async fn set_status<'e, E>(
        exec: E,
        episode_id: EpisodeId,
        chunk_index: i64,
        status: ChunkStatus,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE chunks SET status = ? WHERE episode_id = ? AND chunk_index = ?",
        )
        .bind(status)
        .bind(episode_id)
        .bind(chunk_index)
        .execute(exec)
        .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("chunk {episode_id}/{chunk_index}")));
        }
        Ok(())
    }

    /// Mark a chunk ready with its measured duration and audio path,
    /// clearing any stale error message.
    pub async fn mark_ready<'e, E>(
        exec: E,
        episode_id: EpisodeId,
        chunk_index: i64,
        duration_secs: f64,
        audio_path: &str,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            UPDATE chunks
            SET status = 'ready', duration_secs = ?, audio_path = ?, error_message = NULL
            WHERE episode_id = ? AND chunk_index = ?
            "#,
        )
        .bind(duration_secs)
        .bind(audio_path)
        .bind(episode_id)
        .bind(chunk_index)
        .execute(exec)
        .await?;
        Ok(())
    }

    pub async fn mark_error<'e, E>(
        exec: E,
        episode_id: EpisodeId,
        chunk_index: i64,
        message: &str,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let truncated = episodeer_core::truncate_error_message(message);
        sqlx::query(
            "UPDATE chunks SET status = 'error', error_message = ? WHERE episode_id = ? AND chunk_index = ?",
        )
        .bind(truncated)
        .bind(episode_id)
        .bind(chunk_index)
        .execute(exec)
        .await?;
        Ok(())
    }

    /// Reset a single chunk to `pending`, clearing generation results —
    /// used by cancellation, crash recovery, and selective regeneration.
    pub async fn reset_to_pending<'e, E>(
        exec: E,
        episode_id: EpisodeId,
        chunk_index: i64,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            UPDATE chunks
            SET status = 'pending', duration_secs = NULL, audio_path = NULL, error_message = NULL
            WHERE episode_id = ? AND chunk_index = ?
            "#,
        )
        .bind(episode_id)
        .bind(chunk_index)
        .execute(exec)
        .await?;
        Ok(())
    }

    /// Reset every chunk not already `ready` back to `pending` —
    /// crash recovery resets `generating` chunks; `regenerate_all`
    /// resets everything including `ready` chunks via the caller
    /// explicitly asking for `include_ready`.
    pub async fn reset_generating_to_pending<'e, E>(exec: E, episode_id: EpisodeId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE chunks SET status = 'pending' WHERE episode_id = ? AND status = 'generating'",
        )
        .bind(episode_id)
        .execute(exec)
        .await?;
        Ok(())
    }

    pub async fn reset_all_to_pending<'e, E>(exec: E, episode_id: EpisodeId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            UPDATE chunks
            SET status = 'pending', duration_secs = NULL, audio_path = NULL, error_message = NULL
            WHERE episode_id = ?
            "#,
        )
        .bind(episode_id)
        .execute(exec)
        .await?;
        Ok(())
    }

    pub async fn reset_errors_to_pending<'e, E>(exec: E, episode_id: EpisodeId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE chunks SET status = 'pending', error_message = NULL WHERE episode_id = ? AND status = 'error'",
        )
        .bind(episode_id)
        .execute(exec)
        .await?;
        Ok(())
    }

    /// All statuses for an episode's chunks, in index order — the input
    /// to `Episode::aggregate_status`.
    pub async fn statuses<'e, E>(exec: E, episode_id: EpisodeId) -> Result<Vec<ChunkStatus>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<(ChunkStatus,)> = sqlx::query_as(
            "SELECT status FROM chunks WHERE episode_id = ? ORDER BY chunk_index",
        )
        .bind(episode_id)
        .fetch_all(exec)
        .await?;
        Ok(rows.into_iter().map(|(s,)| s).collect())
    }

    pub async fn sum_durations<'e, E>(exec: E, episode_id: EpisodeId) -> Result<f64>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: (Option<f64>,) = sqlx::query_as(
            "SELECT sum(duration_secs) FROM chunks WHERE episode_id = ? AND status = 'ready'",
        )
        .bind(episode_id)
        .fetch_one(exec)
        .await?;
        Ok(row.0.unwrap_or(0.0))
    }

    /// Drop every chunk row for an episode — used by `regenerate_with_settings`
    /// and `undo`, which replace the whole plan rather than resetting it.
    pub async fn delete_all_for_episode<'e, E>(exec: E, episode_id: EpisodeId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM chunks WHERE episode_id = ?")
            .bind(episode_id)
            .execute(exec)
            .await?;
        Ok(())
    }

    /// All chunks the system finds `generating` at boot — these get
    /// reset to `pending` by startup recovery.
    pub async fn list_generating<'e, E>(exec: E) -> Result<Vec<Chunk>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<ChunkRow> =
            sqlx::query_as("SELECT * FROM chunks WHERE status = 'generating'")
                .fetch_all(exec)
                .await?;
        Ok(rows.into_iter().map(Chunk::from).collect())
    }
}
