//! The audio assembler — turns a `ready` episode's per-chunk WAV files
//! into a single contiguous artifact in the episode's requested codec.

mod assembler;
mod wav;

pub use assembler::AudioAssembler;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use episodeer_core::{
        AudioCodec, AudioFormat, BreathingIntensity, Chunk, ChunkStatus, ChunkStrategy, Episode,
        EpisodeStatus, Result, SourceId,
    };
    use episodeer_store::{ChunkRepo, EpisodeRepo};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use super::*;

    struct UppercaseCodec;

    #[async_trait]
    impl AudioCodec for UppercaseCodec {
        async fn encode(&self, pcm: &[u8], _target_format: AudioFormat) -> Result<Vec<u8>> {
            Ok(pcm.iter().map(|b| b.wrapping_add(1)).collect())
        }
    }

    async fn setup() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        episodeer_store::migrate(&pool).await.unwrap();
        pool
    }

    fn ready_episode(source_id: SourceId) -> Episode {
        Episode {
            id: episodeer_core::EpisodeId::new(),
            source_id,
            title: "test".into(),
            voice_id: "mock".into(),
            output_format: AudioFormat::Wav,
            chunk_strategy: ChunkStrategy::Paragraph,
            chunk_max_length: 1000,
            breathing_intensity: BreathingIntensity::Normal,
            status: EpisodeStatus::Ready,
            total_duration_secs: 2.0,
            folder_id: None,
            created_at: chrono::Utc::now(),
            last_played_at: None,
        }
    }

    async fn write_ready_chunk(
        pool: &SqlitePool,
        data_dir: &std::path::Path,
        episode_id: episodeer_core::EpisodeId,
        index: i64,
        samples: usize,
    ) {
        let path = episodeer_core::chunk_audio_path(data_dir, episode_id, index);
        let pcm = vec![0u8; samples * 2];
        crate::wav::write_pcm(&path, &pcm).unwrap();

        let chunk = Chunk {
            episode_id,
            chunk_index: index,
            text: format!("chunk {index}"),
            status: ChunkStatus::Ready,
            duration_secs: Some(samples as f64 / 24_000.0),
            audio_path: Some(path.to_string_lossy().into_owned()),
            error_message: None,
            label: format!("paragraph {index}"),
            created_at: chrono::Utc::now(),
        };
        let mut conn = pool.acquire().await.unwrap();
        ChunkRepo::insert_plan(&mut conn, &[chunk]).await.unwrap();
    }

    #[tokio::test]
    async fn assembles_wav_by_concatenating_chunks_sample_accurately() {
        let pool = setup().await;
        let dir = tempfile::tempdir().unwrap();
        let episode = ready_episode(SourceId::new());
        EpisodeRepo::insert(&pool, &episode).await.unwrap();
        write_ready_chunk(&pool, dir.path(), episode.id, 0, 100).await;
        write_ready_chunk(&pool, dir.path(), episode.id, 1, 200).await;

        let assembler = AudioAssembler::new(None);
        let artifact = assembler
            .assemble(&pool, dir.path(), episode.id, AudioFormat::Wav)
            .await
            .unwrap();

        let reader = hound::WavReader::open(&artifact).unwrap();
        assert_eq!(reader.len(), 300);
    }

    #[tokio::test]
    async fn rejects_assembly_of_a_non_ready_episode() {
        let pool = setup().await;
        let dir = tempfile::tempdir().unwrap();
        let mut episode = ready_episode(SourceId::new());
        episode.status = EpisodeStatus::Generating;
        EpisodeRepo::insert(&pool, &episode).await.unwrap();

        let assembler = AudioAssembler::new(None);
        let result = assembler
            .assemble(&pool, dir.path(), episode.id, AudioFormat::Wav)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn mp3_target_without_a_codec_fails() {
        let pool = setup().await;
        let dir = tempfile::tempdir().unwrap();
        let episode = ready_episode(SourceId::new());
        EpisodeRepo::insert(&pool, &episode).await.unwrap();
        write_ready_chunk(&pool, dir.path(), episode.id, 0, 10).await;

        let assembler = AudioAssembler::new(None);
        let result = assembler
            .assemble(&pool, dir.path(), episode.id, AudioFormat::Mp3)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn mp3_target_with_a_codec_delegates_and_caches() {
        let pool = setup().await;
        let dir = tempfile::tempdir().unwrap();
        let episode = ready_episode(SourceId::new());
        EpisodeRepo::insert(&pool, &episode).await.unwrap();
        write_ready_chunk(&pool, dir.path(), episode.id, 0, 10).await;

        let assembler = AudioAssembler::new(Some(Arc::new(UppercaseCodec)));
        let artifact = assembler
            .assemble(&pool, dir.path(), episode.id, AudioFormat::Mp3)
            .await
            .unwrap();
        assert!(artifact.exists());

        // second call hits the on-disk cache, not the codec again
        let artifact2 = assembler
            .assemble(&pool, dir.path(), episode.id, AudioFormat::Mp3)
            .await
            .unwrap();
        assert_eq!(artifact, artifact2);
    }

    #[test]
    fn invalidate_removes_only_the_episode_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let episode_id = episodeer_core::EpisodeId::new();
        let audio_dir = episodeer_core::episode_audio_dir(dir.path(), episode_id);
        std::fs::create_dir_all(&audio_dir).unwrap();
        std::fs::write(audio_dir.join("full.wav"), b"artifact").unwrap();
        std::fs::write(audio_dir.join("0.wav"), b"chunk").unwrap();

        let assembler = AudioAssembler::new(None);
        assembler.invalidate(dir.path(), episode_id).unwrap();

        assert!(!audio_dir.join("full.wav").exists());
        assert!(audio_dir.join("0.wav").exists());
    }
}
