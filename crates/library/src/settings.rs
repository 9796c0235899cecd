//! Settings read/write and the thin `list_voices` passthrough.
//!
//! Neither operation appears in spec.md §6's operation table even
//! though §6 calls Settings "editable at runtime" and a voice picker
//! needs somewhere to source its options — SPEC_FULL.md §4.7 calls
//! both out as additive.

use episodeer_core::{Error, PlaybackState, Result, Settings, VoiceInfo};
use episodeer_store::{ChunkRepo, EpisodeRepo, PlaybackRepo, SettingsRepo};

use crate::LibraryService;

impl LibraryService {
    pub async fn get_settings(&self) -> Result<Settings> {
        SettingsRepo::get(&self.pool).await
    }

    pub async fn update_settings(&self, settings: Settings) -> Result<()> {
        SettingsRepo::update(&self.pool, &settings).await
    }

    pub async fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        self.tts.list_voices().await
    }

    /// Upsert a playback position. Callers are expected to throttle how
    /// often they call this (e.g. on pause/seek, not per audio frame).
    pub async fn update_playback(&self, state: PlaybackState) -> Result<()> {
        if !EpisodeRepo::exists(&self.pool, state.episode_id).await? {
            return Err(Error::NotFound(format!("episode {}", state.episode_id)));
        }
        let chunk_count = ChunkRepo::count(&self.pool, state.episode_id).await?;
        if state.current_chunk_index < 0 || state.current_chunk_index >= chunk_count {
            return Err(Error::InvalidIndex(format!(
                "chunk index {} out of range [0, {chunk_count})",
                state.current_chunk_index
            )));
        }
        PlaybackRepo::upsert(&self.pool, &state).await
    }

    pub async fn get_playback(
        &self,
        episode_id: episodeer_core::EpisodeId,
    ) -> Result<Option<PlaybackState>> {
        PlaybackRepo::get(&self.pool, episode_id).await
    }
}
