//! Full-episode artifact assembly
//!
//! Concatenates every ready chunk's PCM sample-accurately (no
//! cross-fades — the breathing pauses baked into chunk text are the
//! only inter-chunk silence), then hands off to the `AudioCodec`
//! collaborator for any format other than `wav`/`pcm`. The artifact is
//! computed lazily on first request and cached on disk; callers
//! invalidate it explicitly whenever a chunk leaves `ready`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex as AsyncMutex;

use episodeer_core::{AudioCodec, AudioFormat, EpisodeId, EpisodeStatus, Error, Result};
use episodeer_store::{ChunkRepo, EpisodeRepo};
use sqlx::SqlitePool;

use crate::wav;

/// Coordinates concatenation so two concurrent requests for the same
/// episode's artifact don't race to build it twice.
pub struct AudioAssembler {
    codec: Option<Arc<dyn AudioCodec>>,
    locks: DashMap<EpisodeId, Arc<AsyncMutex<()>>>,
}

impl AudioAssembler {
    /// `codec` is only consulted for targets other than `wav`/`pcm`;
    /// pass `None` if the deployment never requests those formats.
    pub fn new(codec: Option<Arc<dyn AudioCodec>>) -> Self {
        Self {
            codec,
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, episode_id: EpisodeId) -> Arc<AsyncMutex<()>> {
        self.locks
            .entry(episode_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Return the path to `episode_id`'s full artifact in `format`,
    /// building and caching it if it doesn't already exist. Requires
    /// every chunk to be `ready`.
    pub async fn assemble(
        &self,
        pool: &SqlitePool,
        data_dir: &Path,
        episode_id: EpisodeId,
        format: AudioFormat,
    ) -> Result<PathBuf> {
        let target = episodeer_core::episode_artifact_path(data_dir, episode_id, format);
        if target.exists() {
            return Ok(target);
        }

        let lock = self.lock_for(episode_id);
        let _guard = lock.lock().await;

        // Re-check: another task may have finished building it while
        // we were waiting for the lock.
        if target.exists() {
            return Ok(target);
        }

        let episode = EpisodeRepo::get(pool, episode_id).await?;
        if episode.status != EpisodeStatus::Ready {
            return Err(Error::InvalidState(format!(
                "episode {episode_id} is {:?}, not ready",
                episode.status
            )));
        }

        let chunks = ChunkRepo::list_by_episode(pool, episode_id).await?;
        let mut pcm = Vec::new();
        for chunk in &chunks {
            let chunk_path = episodeer_core::chunk_audio_path(data_dir, episode_id, chunk.chunk_index);
            pcm.extend(wav::read_pcm(&chunk_path)?);
        }

        match format {
            AudioFormat::Wav => wav::write_pcm(&target, &pcm)?,
            AudioFormat::Pcm => {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, &pcm)?;
            }
            other => {
                let codec = self.codec.as_ref().ok_or_else(|| {
                    Error::InvalidState(format!("no audio codec configured for {other:?}"))
                })?;
                let encoded = codec.encode(&pcm, other).await?;
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, encoded)?;
            }
        }

        tracing::info!(%episode_id, ?format, "assembled full-episode artifact");
        Ok(target)
    }

    /// Delete any cached full-episode artifact, regardless of format.
    /// Callers invoke this whenever a chunk transitions away from
    /// `ready` (regeneration, retry, cancellation rollback).
    pub fn invalidate(&self, data_dir: &Path, episode_id: EpisodeId) -> Result<()> {
        let dir = episodeer_core::episode_audio_dir(data_dir, episode_id);
        let Ok(entries) = std::fs::read_dir(&dir) else {
            return Ok(());
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s == "full")
            {
                let _ = std::fs::remove_file(&path);
            }
        }
        Ok(())
    }
}
