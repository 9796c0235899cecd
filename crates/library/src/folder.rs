//! Folder CRUD and move operations, plus the recursive folder playlist.
//!
//! Grounded on operations the data model in spec.md §3 implies but the
//! distilled operation table in spec.md §6 never spells out (SPEC_FULL.md
//! §4.7's "Supplemental operations").

use episodeer_core::{Episode, EpisodeStatus, Folder, FolderId, Result};
use episodeer_store::{EpisodeRepo, FolderRepo, SourceRepo};

use crate::LibraryService;

impl LibraryService {
    pub async fn create_folder(&self, name: String, parent_id: Option<FolderId>) -> Result<Folder> {
        if let Some(parent_id) = parent_id {
            FolderRepo::get(&self.pool, parent_id).await?;
        }
        let folder = Folder {
            id: FolderId::new(),
            name,
            parent_id,
        };
        FolderRepo::insert(&self.pool, &folder).await?;
        Ok(folder)
    }

    pub async fn rename_folder(&self, folder_id: FolderId, name: String) -> Result<()> {
        FolderRepo::rename(&self.pool, folder_id, &name).await
    }

    pub async fn move_folder(&self, folder_id: FolderId, new_parent: Option<FolderId>) -> Result<()> {
        FolderRepo::set_parent(&self.pool, folder_id, new_parent).await
    }

    /// Delete a folder, re-parenting its children (and the sources and
    /// episodes filed directly under it) to its own parent — per the
    /// Folder entity invariant, nothing is ever left pointing at a
    /// folder that no longer exists.
    pub async fn delete_folder(&self, folder_id: FolderId) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let folder = FolderRepo::get(&mut *tx, folder_id).await?;

        for child in FolderRepo::list_children(&mut *tx, Some(folder_id)).await? {
            FolderRepo::set_parent(&mut *tx, child.id, folder.parent_id).await?;
        }
        for source in SourceRepo::list_all(&mut *tx).await? {
            if source.folder_id == Some(folder_id) {
                SourceRepo::set_folder(&mut *tx, source.id, folder.parent_id).await?;
            }
        }
        for episode in EpisodeRepo::list_by_folder(&mut *tx, Some(folder_id)).await? {
            EpisodeRepo::set_folder(&mut *tx, episode.id, folder.parent_id).await?;
        }
        FolderRepo::delete(&mut *tx, folder_id).await?;

        tx.commit().await
    }

    pub async fn move_episode(&self, episode_id: episodeer_core::EpisodeId, folder_id: Option<FolderId>) -> Result<()> {
        if let Some(folder_id) = folder_id {
            FolderRepo::get(&self.pool, folder_id).await?;
        }
        EpisodeRepo::set_folder(&self.pool, episode_id, folder_id).await
    }

    pub async fn move_source(&self, source_id: episodeer_core::SourceId, folder_id: Option<FolderId>) -> Result<()> {
        if let Some(folder_id) = folder_id {
            FolderRepo::get(&self.pool, folder_id).await?;
        }
        SourceRepo::set_folder(&self.pool, source_id, folder_id).await
    }

    /// The ordered, ready episodes within `folder_id`, recursing
    /// depth-first into child folders sorted by name.
    pub async fn folder_playlist(&self, folder_id: Option<FolderId>) -> Result<Vec<Episode>> {
        let mut episodes: Vec<Episode> = EpisodeRepo::list_by_folder(&self.pool, folder_id)
            .await?
            .into_iter()
            .filter(|e| e.status == EpisodeStatus::Ready)
            .collect();

        for child in FolderRepo::list_children(&self.pool, folder_id).await? {
            let mut sub = Box::pin(self.folder_playlist(Some(child.id))).await?;
            episodes.append(&mut sub);
        }
        Ok(episodes)
    }
}
