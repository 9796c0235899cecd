//! Folder repository
//!
//! Folders form a tree (`parent_id` self-reference). The only invariant
//! the repository itself enforces is acyclicity on `set_parent`; deleting
//! a folder's children is the caller's responsibility (Library service
//! re-parents them to the deleted folder's parent before issuing the
//! delete, per the Folder entity's "deleting a folder re-parents its
//! children" rule).

use sqlx::{Executor, Sqlite};

use episodeer_core::{Error, Folder, FolderId, Result};

use crate::rows::FolderRow;

pub struct FolderRepo;

impl FolderRepo {
    pub async fn insert<'e, E>(exec: E, folder: &Folder) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO folders (id, name, parent_id) VALUES (?, ?, ?)")
            .bind(folder.id)
            .bind(&folder.name)
            .bind(folder.parent_id)
            .execute(exec)
            .await?;
        Ok(())
    }

    pub async fn get<'e, E>(exec: E, id: FolderId) -> Result<Folder>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row: FolderRow = sqlx::query_as("SELECT * FROM folders WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await?
            .ok_or_else(|| Error::NotFound(format!("folder {id}")))?;
        Ok(row.into())
    }

    pub async fn list_all<'e, E>(exec: E) -> Result<Vec<Folder>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<FolderRow> = sqlx::query_as("SELECT * FROM folders ORDER BY name")
            .fetch_all(exec)
            .await?;
        Ok(rows.into_iter().map(Folder::from).collect())
    }

    pub async fn list_children<'e, E>(exec: E, parent_id: Option<FolderId>) -> Result<Vec<Folder>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<FolderRow> = match parent_id {
            Some(id) => {
                sqlx::query_as("SELECT * FROM folders WHERE parent_id = ? ORDER BY name")
                    .bind(id)
                    .fetch_all(exec)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM folders WHERE parent_id IS NULL ORDER BY name")
                    .fetch_all(exec)
                    .await?
            }
        };
        Ok(rows.into_iter().map(Folder::from).collect())
    }

    pub async fn rename<'e, E>(exec: E, id: FolderId, name: &str) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE folders SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(exec)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("folder {id}")));
        }
        Ok(())
    }

    /// Re-point `id` at `new_parent`. Rejects the move if `new_parent` is
    /// `id` itself or a descendant of `id`, which would create a cycle.
    pub async fn set_parent<'e, E>(
        exec: E,
        id: FolderId,
        new_parent: Option<FolderId>,
    ) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite> + Copy,
    {
        if let Some(new_parent) = new_parent {
            if new_parent == id {
                return Err(Error::InvalidState(
                    "a folder cannot be its own parent".into(),
                ));
            }
            if Self::is_descendant(exec, id, new_parent).await? {
                return Err(Error::InvalidState(
                    "move would create a folder cycle".into(),
                ));
            }
        }

        let result = sqlx::query("UPDATE folders SET parent_id = ? WHERE id = ?")
            .bind(new_parent)
            .bind(id)
            .execute(exec)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("folder {id}")));
        }
        Ok(())
    }

    /// Walk `candidate` up through its ancestors looking for `ancestor`.
    async fn is_descendant<'e, E>(exec: E, ancestor: FolderId, candidate: FolderId) -> Result<bool>
    where
        E: Executor<'e, Database = Sqlite> + Copy,
    {
        let mut current = Some(candidate);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            let row: Option<(Option<FolderId>,)> =
                sqlx::query_as("SELECT parent_id FROM folders WHERE id = ?")
                    .bind(id)
                    .fetch_optional(exec)
                    .await?;
            current = row.and_then(|(parent,)| parent);
        }
        Ok(false)
    }

    pub async fn delete<'e, E>(exec: E, id: FolderId) -> Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(())
    }
}
