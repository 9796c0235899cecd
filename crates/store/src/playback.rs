//! Playback state repository
//!
//! One row per episode, upserted on every position update — the Library
//! service throttles how often it writes, not this repository.

use sqlx::{Executor, Sqlite};

use episodeer_core::{EpisodeId, PlaybackState, Result};

use crate::rows::PlaybackRow;

pub struct PlaybackRepo;

impl PlaybackRepo {
    pub async fn upsert<'e, E>(exec: E, state: &PlaybackState) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO playback_state
                (episode_id, current_chunk_index, position_secs, percent_listened, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(episode_id) DO UPDATE SET
                current_chunk_index = excluded.current_chunk_index,
                position_secs = excluded.position_secs,
                percent_listened = excluded.percent_listened,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(state.episode_id)
        .bind(state.current_chunk_index)
        .bind(state.position_secs)
        .bind(state.percent_listened)
        .bind(state.updated_at)
        .execute(exec)
        .await?;
        Ok(())
    }

    pub async fn get<'e, E>(exec: E, episode_id: EpisodeId) -> Result<Option<PlaybackState>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: Option<PlaybackRow> =
            sqlx::query_as("SELECT * FROM playback_state WHERE episode_id = ?")
                .bind(episode_id)
                .fetch_optional(exec)
                .await?;
        Ok(row.map(PlaybackState::from))
    }

    pub async fn delete<'e, E>(exec: E, episode_id: EpisodeId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM playback_state WHERE episode_id = ?")
            .bind(episode_id)
            .execute(exec)
            .await?;
        Ok(())
    }
}
