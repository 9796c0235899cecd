//! Audio codec trait
//!
//! External collaborator that re-encodes assembled PCM into a delivery
//! format. Consumed by `episodeer-audio`; never implemented here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    Wav,
    Mp3,
    Opus,
    Flac,
    Pcm,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Opus => "opus",
            AudioFormat::Flac => "flac",
            AudioFormat::Pcm => "pcm",
        }
    }

    /// Whether concatenating then encoding this format is byte-identical
    /// to encoding each chunk then concatenating (testable property #8).
    pub fn is_lossless(&self) -> bool {
        matches!(self, AudioFormat::Wav | AudioFormat::Flac | AudioFormat::Pcm)
    }
}

/// Audio codec backend: encodes 24 kHz mono 16-bit PCM into a target
/// format. `wav` and `pcm` are handled natively by `episodeer-audio`
/// without this collaborator; `mp3`/`opus`/`flac` go through it.
#[async_trait]
pub trait AudioCodec: Send + Sync + 'static {
    async fn encode(&self, pcm: &[u8], target_format: AudioFormat) -> Result<Vec<u8>>;
}
