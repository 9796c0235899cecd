//! Episode entity — a generation job over a source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{EpisodeId, FolderId, SourceId};
use crate::traits::AudioFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    Pending,
    Generating,
    Ready,
    Error,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    Paragraph,
    Sentence,
    Heading,
    MaxChars,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BreathingIntensity {
    None,
    Light,
    Normal,
    Heavy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub source_id: SourceId,
    pub title: String,
    pub voice_id: String,
    pub output_format: AudioFormat,
    pub chunk_strategy: ChunkStrategy,
    pub chunk_max_length: i64,
    pub breathing_intensity: BreathingIntensity,
    pub status: EpisodeStatus,
    pub total_duration_secs: f64,
    pub folder_id: Option<FolderId>,
    pub created_at: DateTime<Utc>,
    pub last_played_at: Option<DateTime<Utc>>,
}

impl Episode {
    /// Recompute aggregate status from chunk statuses, per the Episode
    /// lifecycle in the data model: ready iff all ready, error iff any
    /// error and none pending/generating, else generating.
    pub fn aggregate_status(chunk_statuses: &[crate::chunk::ChunkStatus]) -> EpisodeStatus {
        use crate::chunk::ChunkStatus::*;

        if chunk_statuses.is_empty() {
            return EpisodeStatus::Pending;
        }
        if chunk_statuses.iter().all(|s| *s == Ready) {
            return EpisodeStatus::Ready;
        }
        let has_in_flight = chunk_statuses
            .iter()
            .any(|s| matches!(s, Pending | Generating));
        if !has_in_flight && chunk_statuses.iter().any(|s| *s == Error) {
            return EpisodeStatus::Error;
        }
        EpisodeStatus::Generating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkStatus;

    #[test]
    fn all_ready_is_ready() {
        let statuses = vec![ChunkStatus::Ready, ChunkStatus::Ready];
        assert_eq!(Episode::aggregate_status(&statuses), EpisodeStatus::Ready);
    }

    #[test]
    fn terminal_with_error_is_error() {
        let statuses = vec![ChunkStatus::Ready, ChunkStatus::Error];
        assert_eq!(Episode::aggregate_status(&statuses), EpisodeStatus::Error);
    }

    #[test]
    fn pending_alongside_error_is_generating() {
        let statuses = vec![ChunkStatus::Error, ChunkStatus::Pending];
        assert_eq!(
            Episode::aggregate_status(&statuses),
            EpisodeStatus::Generating
        );
    }
}
