//! Chunk entity — the unit of TTS synthesis and playback

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EpisodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChunkStatus {
    Pending,
    Generating,
    Ready,
    Error,
}

/// Error messages recorded on a chunk are truncated to this many bytes
/// before being persisted (spec §4.5 step 6: "a truncated message").
pub const CHUNK_ERROR_MESSAGE_MAX_LEN: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub episode_id: EpisodeId,
    /// 0-based, dense within an episode.
    pub chunk_index: i64,
    pub text: String,
    pub status: ChunkStatus,
    pub duration_secs: Option<f64>,
    /// Relative to the data dir: `audio/{episode_id}/{chunk_index}.wav`.
    pub audio_path: Option<String>,
    pub error_message: Option<String>,
    /// Human-readable anchor, e.g. "Heading §3.2".
    pub label: String,
    pub created_at: DateTime<Utc>,
}

/// Truncate `msg` to `CHUNK_ERROR_MESSAGE_MAX_LEN` bytes on a char boundary.
pub fn truncate_error_message(msg: &str) -> String {
    if msg.len() <= CHUNK_ERROR_MESSAGE_MAX_LEN {
        return msg.to_string();
    }
    let mut end = CHUNK_ERROR_MESSAGE_MAX_LEN;
    while end > 0 && !msg.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &msg[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_messages_alone() {
        assert_eq!(truncate_error_message("boom"), "boom");
    }

    #[test]
    fn truncate_caps_long_messages() {
        let long = "x".repeat(CHUNK_ERROR_MESSAGE_MAX_LEN + 50);
        let truncated = truncate_error_message(&long);
        assert!(truncated.len() <= CHUNK_ERROR_MESSAGE_MAX_LEN + "…".len());
    }
}
