//! `regenerate_with_settings` and its undo window.
//!
//! Applying new settings replaces the chunk plan outright (the chunk
//! count may change), so unlike `regenerate_all` this can't just flip
//! existing rows back to `pending` — it snapshots the whole prior plan
//! into an `UndoTicket` first. Because the new plan reuses the same
//! `{chunk_index}.wav` paths, the prior audio is moved aside into a
//! per-ticket backup directory rather than left in place, so a worker
//! pass started before `undo()` can't silently destroy what undo would
//! need to restore.

use std::path::{Path, PathBuf};

use chrono::Utc;

use episodeer_core::{
    AudioFormat, BreathingIntensity, ChunkStrategy, Episode, EpisodeId, Error, OperationKind,
    Result, UndoTicket, UndoTicketId,
};
use episodeer_store::{ChunkRepo, EpisodeRepo, SettingsRepo, SourceRepo, UndoRepo};

use crate::snapshot::EpisodeSnapshot;
use crate::LibraryService;

fn backup_dir(data_dir: &Path, episode_id: EpisodeId, ticket_id: UndoTicketId) -> PathBuf {
    episodeer_core::episode_audio_dir(data_dir, episode_id)
        .join(".undo")
        .join(ticket_id.to_string())
}

impl LibraryService {
    /// Apply new generation settings to an episode, snapshotting the
    /// prior plan into an undoable ticket valid for
    /// `Settings.undo_window_secs`.
    #[allow(clippy::too_many_arguments)]
    pub async fn regenerate_with_settings(
        &self,
        episode_id: EpisodeId,
        voice_id: String,
        output_format: AudioFormat,
        chunk_strategy: ChunkStrategy,
        chunk_max_length: i64,
        breathing_intensity: BreathingIntensity,
    ) -> Result<UndoTicketId> {
        let episode = EpisodeRepo::get(&self.pool, episode_id).await?;
        let source = SourceRepo::get(&self.pool, episode.source_id).await?;
        let planned = episodeer_chunk::plan(
            &source.cleaned_text,
            chunk_strategy,
            chunk_max_length,
            breathing_intensity,
        );
        if planned.is_empty() {
            return Err(Error::EmptyContent);
        }

        let settings = SettingsRepo::get(&self.pool).await?;
        let ticket_id = UndoTicketId::new();

        let mut tx = self.pool.begin().await?;
        let old_chunks = ChunkRepo::list_by_episode(&mut *tx, episode_id).await?;
        let snapshot = EpisodeSnapshot {
            voice_id: episode.voice_id.clone(),
            output_format: episode.output_format,
            chunk_strategy: episode.chunk_strategy,
            chunk_max_length: episode.chunk_max_length,
            breathing_intensity: episode.breathing_intensity,
            chunks: old_chunks.clone(),
        };
        let payload = serde_json::to_string(&snapshot)
            .map_err(|e| Error::Internal(format!("serializing undo snapshot: {e}")))?;
        let ticket = UndoTicket {
            id: ticket_id,
            operation_kind: OperationKind::RegenerateWithSettings,
            inverse_payload: payload,
            expires_at: Utc::now() + chrono::Duration::seconds(settings.undo_window_secs),
        };
        UndoRepo::insert(&mut *tx, &ticket).await?;

        ChunkRepo::delete_all_for_episode(&mut *tx, episode_id).await?;
        let new_chunks = crate::episode::chunks_from_plan(episode_id, planned);
        ChunkRepo::insert_plan(&mut tx, &new_chunks).await?;
        EpisodeRepo::update_generation_settings(
            &mut *tx,
            episode_id,
            &voice_id,
            output_format,
            chunk_strategy,
            chunk_max_length,
            breathing_intensity,
        )
        .await?;
        EpisodeRepo::set_status(&mut *tx, episode_id, episodeer_core::EpisodeStatus::Pending)
            .await?;
        tx.commit().await?;

        self.move_chunk_audio_to_backup(episode_id, ticket_id, &old_chunks);
        self.assembler.invalidate(&self.data_dir, episode_id)?;
        self.worker.enqueue(episode_id);

        tracing::info!(%episode_id, ticket_id = %ticket_id, "applied new generation settings");
        Ok(ticket_id)
    }

    /// Restore the episode to exactly the state `regenerate_with_settings`
    /// captured, provided the ticket hasn't expired. One-shot: the
    /// ticket is consumed whether or not it had already expired.
    pub async fn undo(&self, episode_id: EpisodeId, ticket_id: UndoTicketId) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let ticket = UndoRepo::take(&mut *tx, ticket_id).await?;
        if ticket.is_expired(Utc::now()) {
            return Err(Error::UndoExpired);
        }
        let snapshot: EpisodeSnapshot = serde_json::from_str(&ticket.inverse_payload)
            .map_err(|e| Error::Internal(format!("corrupt undo snapshot: {e}")))?;

        ChunkRepo::delete_all_for_episode(&mut *tx, episode_id).await?;
        ChunkRepo::insert_plan(&mut tx, &snapshot.chunks).await?;
        EpisodeRepo::update_generation_settings(
            &mut *tx,
            episode_id,
            &snapshot.voice_id,
            snapshot.output_format,
            snapshot.chunk_strategy,
            snapshot.chunk_max_length,
            snapshot.breathing_intensity,
        )
        .await?;
        let statuses: Vec<_> = snapshot.chunks.iter().map(|c| c.status).collect();
        let aggregate = Episode::aggregate_status(&statuses);
        EpisodeRepo::set_status(&mut *tx, episode_id, aggregate).await?;
        tx.commit().await?;

        self.restore_chunk_audio_from_backup(episode_id, ticket_id, &snapshot.chunks);
        self.assembler.invalidate(&self.data_dir, episode_id)?;
        if aggregate == episodeer_core::EpisodeStatus::Generating
            || aggregate == episodeer_core::EpisodeStatus::Pending
        {
            self.worker.enqueue(episode_id);
        }
        Ok(())
    }

    /// Delete expired undo tickets and the audio they were keeping
    /// alive. Called opportunistically, not on a timer — see module docs.
    pub async fn purge_expired_undo_tickets(&self) -> Result<u64> {
        let now = Utc::now();
        let expired = UndoRepo::list_expired(&self.pool, now).await?;
        for ticket in &expired {
            if let Ok(snapshot) = serde_json::from_str::<EpisodeSnapshot>(&ticket.inverse_payload) {
                if let Some(chunk) = snapshot.chunks.first() {
                    let dir = backup_dir(&self.data_dir, chunk.episode_id, ticket.id);
                    let _ = std::fs::remove_dir_all(dir);
                }
            }
        }
        UndoRepo::purge_expired(&self.pool, now).await
    }

    fn move_chunk_audio_to_backup(
        &self,
        episode_id: EpisodeId,
        ticket_id: UndoTicketId,
        chunks: &[episodeer_core::Chunk],
    ) {
        let dir = backup_dir(&self.data_dir, episode_id, ticket_id);
        for chunk in chunks {
            if chunk.audio_path.is_none() {
                continue;
            }
            let src = episodeer_core::chunk_audio_path(&self.data_dir, episode_id, chunk.chunk_index);
            if !src.exists() {
                continue;
            }
            if std::fs::create_dir_all(&dir).is_err() {
                continue;
            }
            let dst = dir.join(format!("{}.wav", chunk.chunk_index));
            if let Err(err) = std::fs::rename(&src, &dst) {
                tracing::warn!(error = %err, "failed to back up chunk audio for undo");
            }
        }
    }

    fn restore_chunk_audio_from_backup(
        &self,
        episode_id: EpisodeId,
        ticket_id: UndoTicketId,
        chunks: &[episodeer_core::Chunk],
    ) {
        let dir = backup_dir(&self.data_dir, episode_id, ticket_id);
        for chunk in chunks {
            if chunk.audio_path.is_none() {
                continue;
            }
            let src = dir.join(format!("{}.wav", chunk.chunk_index));
            if !src.exists() {
                continue;
            }
            let dst = episodeer_core::chunk_audio_path(&self.data_dir, episode_id, chunk.chunk_index);
            if let Some(parent) = dst.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(err) = std::fs::rename(&src, &dst) {
                tracing::warn!(error = %err, "failed to restore chunk audio from undo backup");
            }
        }
        let _ = std::fs::remove_dir(dir);
    }
}
