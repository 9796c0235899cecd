//! Startup recovery
//!
//! Run once, right after migrating and before the Synthesis Worker starts
//! pulling work. Any chunk left `generating` means the process died mid
//! synthesis; per spec, these go back to `pending` so the worker picks
//! them up again. Episodes are then re-aggregated, since an episode
//! persisted as `generating` may now have become `ready` or `error`.

use sqlx::SqlitePool;
use tracing::info;

use episodeer_core::{Episode, Result};

use crate::chunk::ChunkRepo;
use crate::episode::EpisodeRepo;

/// Resets orphaned `generating` chunks and recomputes affected episodes'
/// aggregate status. Returns the number of chunks reset.
pub async fn recover_startup_state(pool: &SqlitePool) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let stuck = ChunkRepo::list_generating(&mut *tx).await?;
    let reset_count = stuck.len() as u64;

    let mut affected_episodes = std::collections::BTreeSet::new();
    for chunk in &stuck {
        affected_episodes.insert(chunk.episode_id);
    }
    // Episodes recorded as `generating` may have no chunk actually stuck
    // (e.g. the crash happened between marking the episode and picking a
    // chunk); re-evaluate those too.
    for episode in EpisodeRepo::list_generating(&mut *tx).await? {
        affected_episodes.insert(episode.id);
    }

    if reset_count > 0 {
        info!(count = reset_count, "resetting orphaned generating chunks to pending");
    }

    for episode_id in &affected_episodes {
        ChunkRepo::reset_generating_to_pending(&mut *tx, *episode_id).await?;
        let statuses = ChunkRepo::statuses(&mut *tx, *episode_id).await?;
        let new_status = Episode::aggregate_status(&statuses);
        EpisodeRepo::set_status(&mut *tx, *episode_id, new_status).await?;
    }

    tx.commit().await?;
    Ok(reset_count)
}
