//! The synthesis run-loop
//!
//! One episode at a time, one chunk at a time: block on the admission
//! queue, claim the lowest-index pending chunk, synthesize it outside
//! any transaction, and commit the result. Cancellation is checked
//! before a chunk is claimed and again before its result is committed,
//! so a cancel request never leaves a chunk stuck `generating`.

use std::path::Path;
use std::sync::Arc;

use episodeer_core::{Episode, EpisodeId, EpisodeStatus, Result, TextToSpeech};
use episodeer_store::{ChunkRepo, EpisodeRepo};
use sqlx::SqlitePool;

use crate::pcm;
use crate::status::StatusCell;

/// Drive one episode to completion (or until cancelled/exhausted),
/// claiming and synthesizing chunks one at a time.
pub async fn process_episode(
    pool: &SqlitePool,
    tts: &Arc<dyn TextToSpeech>,
    data_dir: &Path,
    status: &StatusCell,
    episode_id: EpisodeId,
) -> Result<()> {
    loop {
        let Some((episode, chunk_index, chunk_text)) =
            claim_next_chunk(pool, episode_id).await?
        else {
            break;
        };

        status.set_current(Some(episode_id), Some(chunk_index));
        let outcome = tts.synthesize(&chunk_text, &episode.voice_id).await;
        let settled = settle_chunk(pool, data_dir, episode_id, chunk_index, outcome).await;
        status.set_current(None, None);

        if let ChunkOutcome::Cancelled = settled {
            break;
        }
    }
    Ok(())
}

enum ChunkOutcome {
    Settled,
    Cancelled,
}

/// Mark the episode `generating` and atomically claim the lowest-index
/// pending chunk. Returns `None` once there's nothing left to claim —
/// the caller should stop driving this episode.
async fn claim_next_chunk(
    pool: &SqlitePool,
    episode_id: EpisodeId,
) -> Result<Option<(Episode, i64, String)>> {
    let mut tx = pool.begin().await?;

    let episode = EpisodeRepo::get(&mut *tx, episode_id).await?;
    if episode.status == EpisodeStatus::Cancelled {
        tx.commit().await?;
        return Ok(None);
    }

    let next = ChunkRepo::next_pending(&mut *tx, episode_id).await?;
    let Some(chunk) = next else {
        finalize_aggregate(&mut tx, episode_id).await?;
        tx.commit().await?;
        return Ok(None);
    };

    if episode.status != EpisodeStatus::Generating {
        EpisodeRepo::set_status(&mut *tx, episode_id, EpisodeStatus::Generating).await?;
    }
    ChunkRepo::set_status(
        &mut *tx,
        episode_id,
        chunk.chunk_index,
        episodeer_core::ChunkStatus::Generating,
    )
    .await?;

    tx.commit().await?;
    Ok(Some((episode, chunk.chunk_index, chunk.text)))
}

/// Persist the synthesis result, honoring a cancel that landed while
/// `synthesize` was in flight by rolling the chunk back to `pending`
/// instead of recording its outcome.
async fn settle_chunk(
    pool: &SqlitePool,
    data_dir: &Path,
    episode_id: EpisodeId,
    chunk_index: i64,
    outcome: Result<Vec<u8>>,
) -> ChunkOutcome {
    match settle_chunk_inner(pool, data_dir, episode_id, chunk_index, outcome).await {
        Ok(true) => ChunkOutcome::Cancelled,
        Ok(false) => ChunkOutcome::Settled,
        Err(err) => {
            tracing::error!(%episode_id, chunk_index, error = %err, "failed to settle chunk result");
            ChunkOutcome::Settled
        }
    }
}

async fn settle_chunk_inner(
    pool: &SqlitePool,
    data_dir: &Path,
    episode_id: EpisodeId,
    chunk_index: i64,
    outcome: Result<Vec<u8>>,
) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let episode = EpisodeRepo::get(&mut *tx, episode_id).await?;
    if episode.status == EpisodeStatus::Cancelled {
        ChunkRepo::reset_to_pending(&mut *tx, episode_id, chunk_index).await?;
        tx.commit().await?;
        return Ok(true);
    }

    match outcome {
        Ok(pcm) => {
            let path = episodeer_core::chunk_audio_path(data_dir, episode_id, chunk_index);
            match pcm::write_wav(&path, &pcm) {
                Ok(duration_secs) => {
                    let relative = path
                        .strip_prefix(data_dir)
                        .unwrap_or(&path)
                        .to_string_lossy()
                        .into_owned();
                    ChunkRepo::mark_ready(
                        &mut *tx,
                        episode_id,
                        chunk_index,
                        duration_secs,
                        &relative,
                    )
                    .await?;
                    metrics::counter!("episodeer_chunks_synthesized_total").increment(1);
                    metrics::histogram!("episodeer_chunk_duration_secs").record(duration_secs);
                }
                Err(err) => {
                    ChunkRepo::mark_error(&mut *tx, episode_id, chunk_index, &err.to_string())
                        .await?;
                    metrics::counter!("episodeer_chunks_failed_total").increment(1);
                }
            }
        }
        Err(err) => {
            tracing::warn!(%episode_id, chunk_index, error = %err, "chunk synthesis failed");
            ChunkRepo::mark_error(&mut *tx, episode_id, chunk_index, &err.to_string()).await?;
            metrics::counter!("episodeer_chunks_failed_total").increment(1);
        }
    }

    finalize_aggregate(&mut tx, episode_id).await?;
    tx.commit().await?;
    Ok(false)
}

/// Recompute and persist the episode's aggregate status from its
/// chunks; when every chunk is ready, also roll up the total duration.
async fn finalize_aggregate(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    episode_id: EpisodeId,
) -> Result<()> {
    let statuses = ChunkRepo::statuses(&mut **tx, episode_id).await?;
    let aggregate = Episode::aggregate_status(&statuses);
    EpisodeRepo::set_status(&mut **tx, episode_id, aggregate).await?;
    if aggregate == EpisodeStatus::Ready {
        let total = ChunkRepo::sum_durations(&mut **tx, episode_id).await?;
        EpisodeRepo::set_total_duration(&mut **tx, episode_id, total).await?;
    }
    Ok(())
}
