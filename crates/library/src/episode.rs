//! Episode lifecycle operations: create, regenerate, cancel, retry,
//! and the bulk move/delete operations spec.md §4.7 requires to be
//! atomic across a list of episode ids.

use chrono::Utc;
use sqlx::SqlitePool;

use episodeer_core::{
    AudioFormat, BreathingIntensity, Chunk, ChunkStatus, ChunkStrategy, Episode, EpisodeId,
    EpisodeStatus, Error, FolderId, Result, SourceId,
};
use episodeer_store::{ChunkRepo, EpisodeRepo, FolderRepo, SourceRepo};

use crate::LibraryService;

pub(crate) fn chunks_from_plan(episode_id: EpisodeId, planned: Vec<episodeer_chunk::PlannedChunk>) -> Vec<Chunk> {
    let now = Utc::now();
    planned
        .into_iter()
        .map(|p| Chunk {
            episode_id,
            chunk_index: p.index,
            text: p.text,
            status: ChunkStatus::Pending,
            duration_secs: None,
            audio_path: None,
            error_message: None,
            label: p.label,
            created_at: now,
        })
        .collect()
}

impl LibraryService {
    /// Validate the source exists, snapshot its cleaned text, plan
    /// chunks, insert the Episode and its chunk plan in one
    /// transaction, then enqueue it with the worker.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_episode(
        &self,
        source_id: SourceId,
        title: String,
        voice_id: String,
        output_format: AudioFormat,
        chunk_strategy: ChunkStrategy,
        chunk_max_length: i64,
        breathing_intensity: BreathingIntensity,
        folder_id: Option<FolderId>,
    ) -> Result<Episode> {
        let source = SourceRepo::get(&self.pool, source_id).await?;
        let planned = episodeer_chunk::plan(
            &source.cleaned_text,
            chunk_strategy,
            chunk_max_length,
            breathing_intensity,
        );
        if planned.is_empty() {
            return Err(Error::EmptyContent);
        }

        let episode = Episode {
            id: EpisodeId::new(),
            source_id,
            title,
            voice_id,
            output_format,
            chunk_strategy,
            chunk_max_length,
            breathing_intensity,
            status: EpisodeStatus::Pending,
            total_duration_secs: 0.0,
            folder_id,
            created_at: Utc::now(),
            last_played_at: None,
        };
        let chunks = chunks_from_plan(episode.id, planned);

        let mut tx = self.pool.begin().await?;
        EpisodeRepo::insert(&mut *tx, &episode).await?;
        ChunkRepo::insert_plan(&mut tx, &chunks).await?;
        tx.commit().await?;

        self.worker.enqueue(episode.id);
        tracing::info!(episode_id = %episode.id, chunk_count = chunks.len(), "episode created");
        Ok(episode)
    }

    /// Reset every chunk to `pending`, clear the episode's cached
    /// artifact and per-chunk audio, and re-enqueue. Rejected while the
    /// episode is already `generating` — the single-generating-chunk
    /// invariant means there's a worker pass in flight that a reset out
    /// from under it would corrupt.
    pub async fn regenerate_all(&self, episode_id: EpisodeId) -> Result<()> {
        let old_chunks = {
            let mut tx = self.pool.begin().await?;
            let episode = EpisodeRepo::get(&mut *tx, episode_id).await?;
            if episode.status == EpisodeStatus::Generating {
                return Err(Error::InvalidState(format!(
                    "episode {episode_id} is generating"
                )));
            }
            let chunks = ChunkRepo::list_by_episode(&mut *tx, episode_id).await?;
            ChunkRepo::reset_all_to_pending(&mut *tx, episode_id).await?;
            EpisodeRepo::set_status(&mut *tx, episode_id, EpisodeStatus::Pending).await?;
            tx.commit().await?;
            chunks
        };

        self.delete_chunk_audio_files(episode_id, &old_chunks);
        self.assembler.invalidate(&self.data_dir, episode_id)?;
        self.worker.enqueue(episode_id);
        Ok(())
    }

    /// Reset a single chunk to `pending` and re-enqueue the episode —
    /// the worker picks it up on its next pass over pending chunks.
    pub async fn regenerate_chunk(&self, episode_id: EpisodeId, chunk_index: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let chunk = ChunkRepo::get(&mut *tx, episode_id, chunk_index).await?;
        ChunkRepo::reset_to_pending(&mut *tx, episode_id, chunk_index).await?;
        let statuses = ChunkRepo::statuses(&mut *tx, episode_id).await?;
        let aggregate = Episode::aggregate_status(&statuses);
        EpisodeRepo::set_status(&mut *tx, episode_id, aggregate).await?;
        tx.commit().await?;

        self.delete_chunk_audio_files(episode_id, std::slice::from_ref(&chunk));
        self.assembler.invalidate(&self.data_dir, episode_id)?;
        self.worker.enqueue(episode_id);
        Ok(())
    }

    /// Transition to `cancelled`. A chunk caught `generating` rolls
    /// back to `pending` on the worker's next state check, not here.
    pub async fn cancel(&self, episode_id: EpisodeId) -> Result<()> {
        EpisodeRepo::set_status(&self.pool, episode_id, EpisodeStatus::Cancelled).await
    }

    /// Roll every `error` chunk back to `pending` and re-enqueue.
    pub async fn retry_errors(&self, episode_id: EpisodeId) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        ChunkRepo::reset_errors_to_pending(&mut *tx, episode_id).await?;
        let statuses = ChunkRepo::statuses(&mut *tx, episode_id).await?;
        let aggregate = Episode::aggregate_status(&statuses);
        EpisodeRepo::set_status(&mut *tx, episode_id, aggregate).await?;
        tx.commit().await?;

        self.worker.enqueue(episode_id);
        Ok(())
    }

    /// Move every listed episode into `folder_id` in one transaction.
    /// FK existence is validated up-front; any missing id aborts the
    /// whole batch before anything is written.
    pub async fn bulk_move(&self, episode_ids: &[EpisodeId], folder_id: Option<FolderId>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        if let Some(folder_id) = folder_id {
            FolderRepo::get(&mut *tx, folder_id).await?;
        }
        for &id in episode_ids {
            if !EpisodeRepo::exists(&mut *tx, id).await? {
                return Err(Error::NotFound(format!("episode {id}")));
            }
        }
        for &id in episode_ids {
            EpisodeRepo::set_folder(&mut *tx, id, folder_id).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete every listed episode (cascading to its chunks and
    /// playback state at the DB level) in one transaction; on-disk
    /// audio cleanup is best-effort after commit.
    pub async fn bulk_delete(&self, episode_ids: &[EpisodeId]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for &id in episode_ids {
            if !EpisodeRepo::exists(&mut *tx, id).await? {
                return Err(Error::NotFound(format!("episode {id}")));
            }
        }
        for &id in episode_ids {
            EpisodeRepo::delete(&mut *tx, id).await?;
        }
        tx.commit().await?;

        for &id in episode_ids {
            let dir = episodeer_core::episode_audio_dir(&self.data_dir, id);
            let _ = std::fs::remove_dir_all(dir);
        }
        Ok(())
    }

    /// Best-effort removal of chunks' on-disk audio; failures are
    /// logged, not propagated — a dangling file is cheaper to leak
    /// than a regeneration that fails because cleanup didn't finish.
    pub(crate) fn delete_chunk_audio_files(&self, episode_id: EpisodeId, chunks: &[Chunk]) {
        for chunk in chunks {
            if chunk.audio_path.is_some() {
                let path = episodeer_core::chunk_audio_path(&self.data_dir, episode_id, chunk.chunk_index);
                if let Err(err) = std::fs::remove_file(&path) {
                    if err.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(path = %path.display(), error = %err, "failed to remove chunk audio");
                    }
                }
            }
        }
    }
}
