//! The synthesis worker — the single cooperative consumer of the
//! episode admission queue.
//!
//! Exactly one worker task runs per process, and that task never holds
//! more than one chunk `generating` at a time (the single-generating-
//! chunk invariant). Library Service operations enqueue episode ids;
//! the worker drains them one episode at a time, one chunk at a time,
//! calling out to a `TextToSpeech` backend for the actual synthesis.

mod pcm;
mod queue;
mod status;
mod worker;

pub use queue::AdmissionQueue;
pub use status::WorkerStatus;

use std::path::PathBuf;
use std::sync::Arc;

use episodeer_core::{EpisodeId, Result, TextToSpeech};
use sqlx::SqlitePool;

use status::StatusCell;

/// Owns the admission queue and status cell, and drives the run-loop.
///
/// Cheaply cloned: everything inside is an `Arc` or a pool handle.
#[derive(Clone)]
pub struct Worker {
    pool: SqlitePool,
    tts: Arc<dyn TextToSpeech>,
    data_dir: PathBuf,
    queue: Arc<AdmissionQueue>,
    status: Arc<StatusCell>,
}

impl Worker {
    pub fn new(pool: SqlitePool, tts: Arc<dyn TextToSpeech>, data_dir: PathBuf) -> Self {
        Self {
            pool,
            tts,
            data_dir,
            queue: Arc::new(AdmissionQueue::new()),
            status: Arc::new(StatusCell::new()),
        }
    }

    /// Enqueue an episode for (re)generation. Idempotent: an episode
    /// already queued is not queued twice.
    pub fn enqueue(&self, episode_id: EpisodeId) {
        self.queue.enqueue(episode_id);
        self.status.set_queue_size(self.queue.len());
    }

    pub fn status(&self) -> WorkerStatus {
        self.status.snapshot()
    }

    /// Run forever, draining the queue one episode at a time. A failure
    /// while driving a single episode is logged and does not stop the
    /// loop — the next queued episode still gets its turn.
    pub async fn run(self) -> Result<()> {
        loop {
            let episode_id = self.queue.pop().await;
            self.status.set_queue_size(self.queue.len());

            if let Err(err) =
                worker::process_episode(&self.pool, &self.tts, &self.data_dir, &self.status, episode_id)
                    .await
            {
                tracing::error!(%episode_id, error = %err, "episode generation pass failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use episodeer_core::{
        BreathingIntensity, Chunk, ChunkStatus, ChunkStrategy, Episode, EpisodeStatus, SourceId,
        VoiceInfo,
    };
    use episodeer_store::{ChunkRepo, EpisodeRepo};
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    struct EchoTts;

    #[async_trait]
    impl TextToSpeech for EchoTts {
        async fn synthesize(&self, text: &str, _voice_id: &str) -> Result<Vec<u8>> {
            // one sample per character, 24kHz mono s16le silence.
            Ok(vec![0u8; text.len().max(1) * 2])
        }

        async fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
            Ok(vec![])
        }
    }

    struct AlwaysFailsTts;

    #[async_trait]
    impl TextToSpeech for AlwaysFailsTts {
        async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>> {
            Err(episodeer_core::Error::SynthesisFailed("mock failure".into()))
        }

        async fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
            Ok(vec![])
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

    fn new_episode(source_id: SourceId) -> Episode {
        Episode {
            id: EpisodeId::new(),
            source_id,
            title: "test episode".into(),
            voice_id: "mock".into(),
            output_format: episodeer_core::AudioFormat::Wav,
            chunk_strategy: ChunkStrategy::Paragraph,
            chunk_max_length: 1000,
            breathing_intensity: BreathingIntensity::Normal,
            status: EpisodeStatus::Pending,
            total_duration_secs: 0.0,
            folder_id: None,
            created_at: chrono::Utc::now(),
            last_played_at: None,
        }
    }

    fn new_chunk(episode_id: EpisodeId, index: i64, text: &str) -> Chunk {
        Chunk {
            episode_id,
            chunk_index: index,
            text: text.to_string(),
            status: ChunkStatus::Pending,
            duration_secs: None,
            audio_path: None,
            error_message: None,
            label: format!("paragraph {index}"),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn drains_all_chunks_and_marks_episode_ready() {
        let pool = setup().await;
        let source_id = SourceId::new();
        let episode = new_episode(source_id);
        EpisodeRepo::insert(&pool, &episode).await.unwrap();
        let chunks = vec![
            new_chunk(episode.id, 0, "first chunk"),
            new_chunk(episode.id, 1, "second chunk"),
        ];
        let mut conn = pool.acquire().await.unwrap();
        ChunkRepo::insert_plan(&mut conn, &chunks).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let worker = Worker::new(pool.clone(), Arc::new(EchoTts), dir.path().to_path_buf());
        worker.enqueue(episode.id);

        let run_handle = tokio::spawn(worker.clone().run());
        tokio::time::sleep(Duration::from_millis(200)).await;
        run_handle.abort();

        let reloaded = EpisodeRepo::get(&pool, episode.id).await.unwrap();
        assert_eq!(reloaded.status, EpisodeStatus::Ready);
        assert!(reloaded.total_duration_secs > 0.0);

        for chunk in ChunkRepo::list_by_episode(&pool, episode.id).await.unwrap() {
            assert_eq!(chunk.status, ChunkStatus::Ready);
            assert!(chunk.audio_path.is_some());
        }
    }

    #[tokio::test]
    async fn synthesis_failure_marks_chunk_error_without_aborting_episode() {
        let pool = setup().await;
        let source_id = SourceId::new();
        let episode = new_episode(source_id);
        EpisodeRepo::insert(&pool, &episode).await.unwrap();
        let chunks = vec![
            new_chunk(episode.id, 0, "will fail"),
            new_chunk(episode.id, 1, "will also fail"),
        ];
        let mut conn = pool.acquire().await.unwrap();
        ChunkRepo::insert_plan(&mut conn, &chunks).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let worker = Worker::new(pool.clone(), Arc::new(AlwaysFailsTts), dir.path().to_path_buf());
        worker.enqueue(episode.id);

        let run_handle = tokio::spawn(worker.clone().run());
        tokio::time::sleep(Duration::from_millis(200)).await;
        run_handle.abort();

        let reloaded = EpisodeRepo::get(&pool, episode.id).await.unwrap();
        assert_eq!(reloaded.status, EpisodeStatus::Error);

        for chunk in ChunkRepo::list_by_episode(&pool, episode.id).await.unwrap() {
            assert_eq!(chunk.status, ChunkStatus::Error);
            assert!(chunk.error_message.is_some());
        }
    }

    #[tokio::test]
    async fn cancelled_episode_stops_claiming_new_chunks() {
        let pool = setup().await;
        let source_id = SourceId::new();
        let mut episode = new_episode(source_id);
        episode.status = EpisodeStatus::Cancelled;
        EpisodeRepo::insert(&pool, &episode).await.unwrap();
        let chunks = vec![new_chunk(episode.id, 0, "never synthesized")];
        let mut conn = pool.acquire().await.unwrap();
        ChunkRepo::insert_plan(&mut conn, &chunks).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let worker = Worker::new(pool.clone(), Arc::new(EchoTts), dir.path().to_path_buf());
        worker.enqueue(episode.id);

        let run_handle = tokio::spawn(worker.clone().run());
        tokio::time::sleep(Duration::from_millis(100)).await;
        run_handle.abort();

        let chunk = ChunkRepo::get(&pool, episode.id, 0).await.unwrap();
        assert_eq!(chunk.status, ChunkStatus::Pending);
    }
}
