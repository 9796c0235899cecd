//! PlaybackState entity — per-episode resume point

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EpisodeId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    pub episode_id: EpisodeId,
    pub current_chunk_index: i64,
    pub position_secs: f64,
    pub percent_listened: f64,
    pub updated_at: DateTime<Utc>,
}
