//! Settings repository — a single-row table, keyed by
//! `SETTINGS_SINGLETON_ID`. Seeded by the initial migration with
//! `episodeer_core::Settings::default()`.

use sqlx::{Executor, Sqlite};

use episodeer_core::{Settings, SETTINGS_SINGLETON_ID};

use crate::rows::SettingsRow;

pub struct SettingsRepo;

impl SettingsRepo {
    pub async fn get<'e, E>(exec: E) -> episodeer_core::Result<Settings>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: SettingsRow = sqlx::query_as("SELECT * FROM settings WHERE id = ?")
            .bind(SETTINGS_SINGLETON_ID)
            .fetch_one(exec)
            .await?;
        row.try_into()
    }

    pub async fn update<'e, E>(exec: E, settings: &Settings) -> episodeer_core::Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let default_cleaning_json = serde_json::to_string(&settings.default_cleaning)
            .map_err(|e| episodeer_core::Error::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            UPDATE settings SET
                default_voice_id = ?,
                default_output_format = ?,
                default_chunk_strategy = ?,
                default_chunk_max_length = ?,
                default_breathing_intensity = ?,
                default_cleaning_json = ?,
                undo_window_secs = ?
            WHERE id = ?
            "#,
        )
        .bind(&settings.default_voice_id)
        .bind(settings.default_output_format)
        .bind(settings.default_chunk_strategy)
        .bind(settings.default_chunk_max_length)
        .bind(settings.default_breathing_intensity)
        .bind(default_cleaning_json)
        .bind(settings.undo_window_secs)
        .bind(SETTINGS_SINGLETON_ID)
        .execute(exec)
        .await?;

        Ok(())
    }
}
