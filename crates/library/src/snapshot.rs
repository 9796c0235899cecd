//! The serialized snapshot an `UndoTicket` carries for
//! `regenerate_with_settings`: enough of the prior episode and its
//! chunk plan to restore both atomically.

use serde::{Deserialize, Serialize};

use episodeer_core::{AudioFormat, BreathingIntensity, Chunk, ChunkStrategy};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeSnapshot {
    pub voice_id: String,
    pub output_format: AudioFormat,
    pub chunk_strategy: ChunkStrategy,
    pub chunk_max_length: i64,
    pub breathing_intensity: BreathingIntensity,
    pub chunks: Vec<Chunk>,
}
