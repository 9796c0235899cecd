//! Episode repository

use sqlx::{Executor, Sqlite};

use episodeer_core::{
    AudioFormat, BreathingIntensity, ChunkStrategy, Episode, EpisodeId, EpisodeStatus, Error,
    Result, SourceId,
};

use crate::rows::EpisodeRow;

pub struct EpisodeRepo;

impl EpisodeRepo {
    pub async fn insert<'e, E>(exec: E, episode: &Episode) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO episodes
                (id, source_id, title, voice_id, output_format, chunk_strategy,
                 chunk_max_length, breathing_intensity, status, total_duration_secs,
                 folder_id, created_at, last_played_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(episode.id)
        .bind(episode.source_id)
        .bind(&episode.title)
        .bind(&episode.voice_id)
        .bind(episode.output_format)
        .bind(episode.chunk_strategy)
        .bind(episode.chunk_max_length)
        .bind(episode.breathing_intensity)
        .bind(episode.status)
        .bind(episode.total_duration_secs)
        .bind(episode.folder_id)
        .bind(episode.created_at)
        .bind(episode.last_played_at)
        .execute(exec)
        .await?;

        Ok(())
    }

    pub async fn get<'e, E>(exec: E, id: EpisodeId) -> Result<Episode>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: EpisodeRow = sqlx::query_as("SELECT * FROM episodes WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| Error::NotFound(format!("episode {id}")))?;
        Ok(row.into())
    }

    pub async fn list_by_source<'e, E>(exec: E, source_id: SourceId) -> Result<Vec<Episode>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<EpisodeRow> =
            sqlx::query_as("SELECT * FROM episodes WHERE source_id = ? ORDER BY created_at")
                .bind(source_id)
                .fetch_all(exec)
                .await?;
        Ok(rows.into_iter().map(Episode::from).collect())
    }

    pub async fn list_by_folder<'e, E>(
        exec: E,
        folder_id: Option<episodeer_core::FolderId>,
    ) -> Result<Vec<Episode>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<EpisodeRow> = match folder_id {
            Some(id) => {
                sqlx::query_as("SELECT * FROM episodes WHERE folder_id = ? ORDER BY title")
                    .bind(id)
                    .fetch_all(exec)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM episodes WHERE folder_id IS NULL ORDER BY title")
                    .fetch_all(exec)
                    .await?
            }
        };
        Ok(rows.into_iter().map(Episode::from).collect())
    }

    pub async fn set_status<'e, E>(exec: E, id: EpisodeId, status: EpisodeStatus) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE episodes SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(exec)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("episode {id}")));
        }
        Ok(())
    }

    pub async fn set_total_duration<'e, E>(exec: E, id: EpisodeId, total_secs: f64) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE episodes SET total_duration_secs = ? WHERE id = ?")
            .bind(total_secs)
            .bind(id)
            .execute(exec)
            .await?;
        Ok(())
    }

    /// Replace the generation parameters a `regenerate_with_settings`
    /// or `undo` operation restores — everything but `status`, which
    /// the caller recomputes from the (also replaced) chunk plan.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_generation_settings<'e, E>(
        exec: E,
        id: EpisodeId,
        voice_id: &str,
        output_format: AudioFormat,
        chunk_strategy: ChunkStrategy,
        chunk_max_length: i64,
        breathing_intensity: BreathingIntensity,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE episodes SET
                voice_id = ?, output_format = ?, chunk_strategy = ?,
                chunk_max_length = ?, breathing_intensity = ?
            WHERE id = ?
            "#,
        )
        .bind(voice_id)
        .bind(output_format)
        .bind(chunk_strategy)
        .bind(chunk_max_length)
        .bind(breathing_intensity)
        .bind(id)
        .execute(exec)
        .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("episode {id}")));
        }
        Ok(())
    }

    pub async fn set_folder<'e, E>(
        exec: E,
        id: EpisodeId,
        folder_id: Option<episodeer_core::FolderId>,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE episodes SET folder_id = ? WHERE id = ?")
            .bind(folder_id)
            .bind(id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn touch_last_played<'e, E>(
        exec: E,
        id: EpisodeId,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE episodes SET last_played_at = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(exec: E, id: EpisodeId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM episodes WHERE id = ?")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn exists<'e, E>(exec: E, id: EpisodeId) -> Result<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM episodes WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?;
        Ok(row.is_some())
    }

    /// Episodes whose persisted status is `generating`, needed by
    /// startup recovery to re-evaluate aggregate state.
    pub async fn list_generating<'e, E>(exec: E) -> Result<Vec<Episode>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<EpisodeRow> =
            sqlx::query_as("SELECT * FROM episodes WHERE status = 'generating'")
                .fetch_all(exec)
                .await?;
        Ok(rows.into_iter().map(Episode::from).collect())
    }
}
