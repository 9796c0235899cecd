use std::sync::Arc;

use episodeer_app::UnconfiguredTts;
use episodeer_config::ProcessConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("EPISODEER_CONFIG").ok().map(std::path::PathBuf::from);
    let config = ProcessConfig::load(config_path.as_deref())?;

    episodeer_app::init_tracing(&config.log_level);
    tracing::info!(host = %config.host, port = config.port, "starting episodeer");

    if let Err(err) = metrics_exporter_prometheus::PrometheusBuilder::new().install() {
        tracing::warn!(error = %err, "failed to install prometheus exporter");
    }

    let app = episodeer_app::bootstrap(&config, Arc::new(UnconfiguredTts)).await?;

    let worker_handle = tokio::spawn(app.worker.clone().run());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    worker_handle.abort();

    Ok(())
}
