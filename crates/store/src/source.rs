//! Source repository

use sqlx::{Executor, Sqlite};

use episodeer_core::{CleaningConfig, Error, FolderId, Result, Source, SourceId};

use crate::rows::SourceRow;

pub struct SourceRepo;

impl SourceRepo {
    pub async fn insert<'e, E>(exec: E, source: &Source) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let cleaning_settings = serde_json::to_string(&source.cleaning_settings)
            .map_err(|e| Error::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO sources
                (id, title, source_type, raw_text, cleaned_text, cleaning_settings,
                 cover_art, folder_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(source.id)
        .bind(&source.title)
        .bind(source.source_type)
        .bind(&source.raw_text)
        .bind(&source.cleaned_text)
        .bind(cleaning_settings)
        .bind(&source.cover_art)
        .bind(source.folder_id)
        .bind(source.created_at)
        .execute(exec)
        .await?;

        Ok(())
    }

    pub async fn get<'e, E>(exec: E, id: SourceId) -> Result<Source>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: SourceRow = sqlx::query_as("SELECT * FROM sources WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| Error::NotFound(format!("source {id}")))?;
        row.try_into()
    }

    pub async fn exists<'e, E>(exec: E, id: SourceId) -> Result<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM sources WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?;
        Ok(row.is_some())
    }

    /// Replace `cleaned_text` and `cleaning_settings` in place; `id` is
    /// untouched per the Source invariant.
    pub async fn update_cleaned_text<'e, E>(
        exec: E,
        id: SourceId,
        cleaned_text: &str,
        cleaning_settings: &CleaningConfig,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let cleaning_settings =
            serde_json::to_string(cleaning_settings).map_err(|e| Error::Internal(e.to_string()))?;

        let result =
            sqlx::query("UPDATE sources SET cleaned_text = ?, cleaning_settings = ? WHERE id = ?")
                .bind(cleaned_text)
                .bind(cleaning_settings)
                .bind(id)
                .execute(exec)
                .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("source {id}")));
        }
        Ok(())
    }

    pub async fn set_folder<'e, E>(exec: E, id: SourceId, folder_id: Option<FolderId>) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE sources SET folder_id = ? WHERE id = ?")
            .bind(folder_id)
            .bind(id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn delete<'e, E>(exec: E, id: SourceId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM sources WHERE id = ?")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn list_all<'e, E>(exec: E) -> Result<Vec<Source>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<SourceRow> = sqlx::query_as("SELECT * FROM sources ORDER BY created_at")
            .fetch_all(exec)
            .await?;
        rows.into_iter().map(Source::try_from).collect()
    }
}
