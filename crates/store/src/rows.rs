//! Row <-> entity mapping
//!
//! `sqlx::FromRow` gets us the flat columns; the handful of fields that
//! don't map 1:1 (JSON-encoded cleaning settings, RFC3339 timestamps
//! already handled by the `chrono` feature) are converted by hand in
//! `TryFrom`.

use chrono::{DateTime, Utc};
use episodeer_core::{
    BreathingIntensity, Chunk, ChunkStatus, ChunkStrategy, CleaningConfig, Episode, EpisodeId,
    EpisodeStatus, Folder, FolderId, PlaybackState, Settings, Source, SourceId, SourceType, Tag,
    TagId,
};
use episodeer_core::{AudioFormat, Error, Result};

#[derive(sqlx::FromRow)]
pub struct SourceRow {
    pub id: SourceId,
    pub title: String,
    pub source_type: SourceType,
    pub raw_text: String,
    pub cleaned_text: String,
    pub cleaning_settings: String,
    pub cover_art: Option<String>,
    pub folder_id: Option<FolderId>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SourceRow> for Source {
    type Error = Error;

    fn try_from(row: SourceRow) -> Result<Self> {
        let cleaning_settings: CleaningConfig = serde_json::from_str(&row.cleaning_settings)
            .map_err(|e| Error::Internal(format!("corrupt cleaning_settings: {e}")))?;
        Ok(Source {
            id: row.id,
            title: row.title,
            source_type: row.source_type,
            raw_text: row.raw_text,
            cleaned_text: row.cleaned_text,
            cleaning_settings,
            cover_art: row.cover_art,
            folder_id: row.folder_id,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct EpisodeRow {
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

impl From<EpisodeRow> for Episode {
    fn from(row: EpisodeRow) -> Self {
        Episode {
            id: row.id,
            source_id: row.source_id,
            title: row.title,
            voice_id: row.voice_id,
            output_format: row.output_format,
            chunk_strategy: row.chunk_strategy,
            chunk_max_length: row.chunk_max_length,
            breathing_intensity: row.breathing_intensity,
            status: row.status,
            total_duration_secs: row.total_duration_secs,
            folder_id: row.folder_id,
            created_at: row.created_at,
            last_played_at: row.last_played_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct ChunkRow {
    pub episode_id: EpisodeId,
    pub chunk_index: i64,
    pub text: String,
    pub status: ChunkStatus,
    pub duration_secs: Option<f64>,
    pub audio_path: Option<String>,
    pub error_message: Option<String>,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChunkRow> for Chunk {
    fn from(row: ChunkRow) -> Self {
        Chunk {
            episode_id: row.episode_id,
            chunk_index: row.chunk_index,
            text: row.text,
            status: row.status,
            duration_secs: row.duration_secs,
            audio_path: row.audio_path,
            error_message: row.error_message,
            label: row.label,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct FolderRow {
    pub id: FolderId,
    pub name: String,
    pub parent_id: Option<FolderId>,
}

impl From<FolderRow> for Folder {
    fn from(row: FolderRow) -> Self {
        Folder {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct TagRow {
    pub id: TagId,
    pub name: String,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct PlaybackRow {
    pub episode_id: EpisodeId,
    pub current_chunk_index: i64,
    pub position_secs: f64,
    pub percent_listened: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<PlaybackRow> for PlaybackState {
    fn from(row: PlaybackRow) -> Self {
        PlaybackState {
            episode_id: row.episode_id,
            current_chunk_index: row.current_chunk_index,
            position_secs: row.position_secs,
            percent_listened: row.percent_listened,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct SettingsRow {
    pub default_voice_id: String,
    pub default_output_format: AudioFormat,
    pub default_chunk_strategy: ChunkStrategy,
    pub default_chunk_max_length: i64,
    pub default_breathing_intensity: BreathingIntensity,
    pub default_cleaning_json: String,
    pub undo_window_secs: i64,
}

impl TryFrom<SettingsRow> for Settings {
    type Error = Error;

    fn try_from(row: SettingsRow) -> Result<Self> {
        let default_cleaning: CleaningConfig = serde_json::from_str(&row.default_cleaning_json)
            .map_err(|e| Error::Internal(format!("corrupt settings: {e}")))?;
        Ok(Settings {
            default_voice_id: row.default_voice_id,
            default_output_format: row.default_output_format,
            default_chunk_strategy: row.default_chunk_strategy,
            default_chunk_max_length: row.default_chunk_max_length,
            default_breathing_intensity: row.default_breathing_intensity,
            default_cleaning,
            undo_window_secs: row.undo_window_secs,
        })
    }
}
