//! Process wiring: config load, store connect + migrate, startup
//! recovery, and the long-running worker task. Kept as a library so
//! the bootstrap sequence is exercised by tests without a real `main`.

mod unconfigured;

pub use unconfigured::UnconfiguredTts;

use std::sync::Arc;

use episodeer_audio::AudioAssembler;
use episodeer_config::ProcessConfig;
use episodeer_core::{Result, TextToSpeech};
use episodeer_library::LibraryService;
use episodeer_worker::Worker;

/// Everything a running process needs, after bootstrap has completed.
pub struct App {
    pub library: LibraryService,
    pub worker: Worker,
}

/// Connect to the store, run migrations, recover any orphaned
/// `generating` chunks, and build the `Worker`/`LibraryService` pair.
/// Does not start the worker loop — callers spawn `app.worker.clone().run()`
/// on their own task so they control shutdown.
pub async fn bootstrap(config: &ProcessConfig, tts: Arc<dyn TextToSpeech>) -> Result<App> {
    std::fs::create_dir_all(&config.data_dir)?;
    std::fs::create_dir_all(config.audio_dir())?;
    std::fs::create_dir_all(config.sources_dir())?;

    let pool = episodeer_store::connect(&config.database_path(), config.database_max_connections).await?;
    episodeer_store::migrate(&pool).await?;

    let reset = episodeer_store::recover_startup_state(&pool).await?;
    if reset > 0 {
        tracing::warn!(chunks_reset = reset, "recovered orphaned generating chunks on startup");
    }

    let worker = Worker::new(pool.clone(), tts.clone(), config.audio_dir());
    let assembler = Arc::new(AudioAssembler::new(None));
    let library = LibraryService::new(pool, worker.clone(), assembler, tts, config.audio_dir());

    Ok(App { library, worker })
}

/// Install a `tracing-subscriber` that honors `RUST_LOG`, falling back
/// to the configured `log_level`.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).json().init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_creates_data_dirs_and_runs_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProcessConfig {
            data_dir: dir.path().to_path_buf(),
            voices_dir: None,
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 8080,
            database_max_connections: 5,
            undo_window_secs: 120,
        };

        let app = bootstrap(&config, Arc::new(UnconfiguredTts)).await.unwrap();
        assert!(dir.path().join("library.db").exists());
        assert!(config.audio_dir().exists());
        assert!(config.sources_dir().exists());

        let settings = app.library.get_settings().await.unwrap();
        assert!(settings.undo_window_secs > 0);
    }
}
