//! Source entity — imported raw content before chunking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cleaning::CleaningConfig;
use crate::ids::{FolderId, SourceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Text,
    File,
    Url,
    Git,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub id: SourceId,
    pub title: String,
    pub source_type: SourceType,
    pub raw_text: String,
    pub cleaned_text: String,
    pub cleaning_settings: CleaningConfig,
    /// Path to a cover art blob beneath `<data>/sources/<id>/`, if any.
    pub cover_art: Option<String>,
    pub folder_id: Option<FolderId>,
    pub created_at: DateTime<Utc>,
}
