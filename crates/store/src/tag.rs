//! Tag repository, plus the `source_tags`/`episode_tags` association tables

use sqlx::{Executor, Sqlite};

use episodeer_core::{EpisodeId, Error, Result, SourceId, Tag, TagId};

use crate::rows::TagRow;

pub struct TagRepo;

impl TagRepo {
    pub async fn insert<'e, E>(exec: E, tag: &Tag) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO tags (id, name) VALUES (?, ?)")
            .bind(tag.id)
            .bind(&tag.name)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn get<'e, E>(exec: E, id: TagId) -> Result<Tag>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: TagRow = sqlx::query_as("SELECT * FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| Error::NotFound(format!("tag {id}")))?;
        Ok(row.into())
    }

    pub async fn find_by_name<'e, E>(exec: E, name: &str) -> Result<Option<Tag>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: Option<TagRow> = sqlx::query_as("SELECT * FROM tags WHERE name = ?")
            .bind(name)
            .fetch_optional(exec)
            .await?;
        Ok(row.map(Tag::from))
    }

    pub async fn list_all<'e, E>(exec: E) -> Result<Vec<Tag>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<TagRow> = sqlx::query_as("SELECT * FROM tags ORDER BY name")
            .fetch_all(exec)
            .await?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    pub async fn delete<'e, E>(exec: E, id: TagId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn tag_source<'e, E>(exec: E, source_id: SourceId, tag_id: TagId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT OR IGNORE INTO source_tags (source_id, tag_id) VALUES (?, ?)")
            .bind(source_id)
            .bind(tag_id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn untag_source<'e, E>(exec: E, source_id: SourceId, tag_id: TagId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM source_tags WHERE source_id = ? AND tag_id = ?")
            .bind(source_id)
            .bind(tag_id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn tags_for_source<'e, E>(exec: E, source_id: SourceId) -> Result<Vec<Tag>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<TagRow> = sqlx::query_as(
            r#"
            SELECT tags.* FROM tags
            JOIN source_tags ON source_tags.tag_id = tags.id
            WHERE source_tags.source_id = ?
            ORDER BY tags.name
            "#,
        )
        .bind(source_id)
        .fetch_all(exec)
        .await?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    pub async fn tag_episode<'e, E>(exec: E, episode_id: EpisodeId, tag_id: TagId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT OR IGNORE INTO episode_tags (episode_id, tag_id) VALUES (?, ?)")
            .bind(episode_id)
            .bind(tag_id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn untag_episode<'e, E>(exec: E, episode_id: EpisodeId, tag_id: TagId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM episode_tags WHERE episode_id = ? AND tag_id = ?")
            .bind(episode_id)
            .bind(tag_id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn tags_for_episode<'e, E>(exec: E, episode_id: EpisodeId) -> Result<Vec<Tag>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<TagRow> = sqlx::query_as(
            r#"
            SELECT tags.* FROM tags
            JOIN episode_tags ON episode_tags.tag_id = tags.id
            WHERE episode_tags.episode_id = ?
            ORDER BY tags.name
            "#,
        )
        .bind(episode_id)
        .fetch_all(exec)
        .await?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }
}
