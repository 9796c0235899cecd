//! Placeholder `TextToSpeech` so the bootstrap sequence is runnable and
//! testable without pulling in a real TTS vendor integration, which is
//! an external collaborator per the crate's scope. A production
//! deployment swaps this for a real backend before starting the worker.

use async_trait::async_trait;
use episodeer_core::{Error, Result, TextToSpeech, VoiceInfo};

pub struct UnconfiguredTts;

#[async_trait]
impl TextToSpeech for UnconfiguredTts {
    async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>> {
        Err(Error::SynthesisFailed(
            "no TextToSpeech backend configured".into(),
        ))
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        Ok(Vec::new())
    }
}
