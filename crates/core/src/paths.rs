//! On-disk layout shared by the Synthesis Worker, Audio Assembler, and
//! Library Service — kept in one place so all three agree on where a
//! chunk's PCM and an episode's assembled artifact live.

use std::path::PathBuf;

use crate::ids::EpisodeId;
use crate::traits::AudioFormat;

pub fn episode_audio_dir(data_dir: &std::path::Path, episode_id: EpisodeId) -> PathBuf {
    data_dir.join("audio").join(episode_id.to_string())
}

/// Per-chunk PCM, always a 24 kHz mono 16-bit WAV regardless of the
/// episode's target `output_format` — the Assembler transcodes on read.
pub fn chunk_audio_path(data_dir: &std::path::Path, episode_id: EpisodeId, chunk_index: i64) -> PathBuf {
    episode_audio_dir(data_dir, episode_id).join(format!("{chunk_index}.wav"))
}

/// The cached, assembled full-episode artifact in its target format.
pub fn episode_artifact_path(data_dir: &std::path::Path, episode_id: EpisodeId, format: AudioFormat) -> PathBuf {
    episode_audio_dir(data_dir, episode_id).join(format!("full.{}", format.extension()))
}
