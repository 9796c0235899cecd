//! Speech synthesis trait
//!
//! This is the only point of contact with the TTS model. Implementations
//! live outside this crate; the worker and the rest of the pipeline never
//! see model internals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A voice a `TextToSpeech` backend can synthesize with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub id: String,
    pub name: String,
    pub kind: VoiceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceKind {
    Builtin,
    Custom,
}

/// Text-to-speech backend.
///
/// Contract: `synthesize` returns 24 kHz mono signed-16-bit little-endian
/// PCM. The worker calls this outside any database transaction and holds
/// no lock across the call; it may take seconds per chunk.
///
/// # Example
///
/// ```ignore
/// let tts: Arc<dyn TextToSpeech> = ...;
/// let pcm = tts.synthesize("Hello, world.", "voice-en-1").await?;
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Synthesize `text` with the given voice. Returns raw PCM bytes
    /// (24 kHz, mono, signed 16-bit little-endian).
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>>;

    /// List the voices this backend can synthesize with.
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>>;
}
