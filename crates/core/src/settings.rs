//! Settings entity — process-wide preferences, persisted as a singleton row

use serde::{Deserialize, Serialize};

use crate::cleaning::CleaningConfig;
use crate::episode::{BreathingIntensity, ChunkStrategy};
use crate::traits::AudioFormat;

/// Row id of the singleton Settings record.
pub const SETTINGS_SINGLETON_ID: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub default_voice_id: String,
    pub default_output_format: AudioFormat,
    pub default_chunk_strategy: ChunkStrategy,
    pub default_chunk_max_length: i64,
    pub default_breathing_intensity: BreathingIntensity,
    pub default_cleaning: CleaningConfig,
    /// How long a `regenerate_with_settings` undo ticket stays valid.
    pub undo_window_secs: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_voice_id: "default".to_string(),
            default_output_format: AudioFormat::Mp3,
            default_chunk_strategy: ChunkStrategy::Paragraph,
            default_chunk_max_length: 1000,
            default_breathing_intensity: BreathingIntensity::Normal,
            default_cleaning: CleaningConfig::default(),
            undo_window_secs: 120,
        }
    }
}
