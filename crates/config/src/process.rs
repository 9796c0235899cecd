//! Process-wide configuration
//!
//! Recognized options per the external interface: `data_dir` (required),
//! `voices_dir` (optional), `log_level`, `host`, `port`. The connection
//! pool size and undo window live here too — they shape construction of
//! the Store and Library Service, not per-request behavior.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Root of `<data>/library.db`, `<data>/sources/`, `<data>/audio/`.
    pub data_dir: PathBuf,
    /// Directory of installed custom voices, if any.
    #[serde(default)]
    pub voices_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_undo_window_secs")]
    pub undo_window_secs: i64,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_max_connections() -> u32 {
    5
}
fn default_undo_window_secs() -> i64 {
    120
}

impl ProcessConfig {
    /// Load from an optional TOML file, overlaid with `EPISODEER_`
    /// environment variables (double-underscore separated keys).
    pub fn load(file_path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = file_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("EPISODEER")
                .separator("__")
                .try_parsing(true),
        );

        let settled = builder.build()?;
        let cfg: ProcessConfig = settled.try_deserialize()?;

        if cfg.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("data_dir".to_string()));
        }

        Ok(cfg)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("library.db")
    }

    pub fn sources_dir(&self) -> PathBuf {
        self.data_dir.join("sources")
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.data_dir.join("audio")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"data_dir = "/tmp/episodeer-data""#).unwrap();
        writeln!(file, "port = 9090").unwrap();

        let cfg = ProcessConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/episodeer-data"));
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ProcessConfig::load(Some(std::path::Path::new("/no/such/file.toml")));
        assert!(matches!(err, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn derives_subpaths_from_data_dir() {
        let cfg = ProcessConfig {
            data_dir: PathBuf::from("/data"),
            voices_dir: None,
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 8080,
            database_max_connections: 5,
            undo_window_secs: 120,
        };
        assert_eq!(cfg.database_path(), PathBuf::from("/data/library.db"));
        assert_eq!(cfg.sources_dir(), PathBuf::from("/data/sources"));
        assert_eq!(cfg.audio_dir(), PathBuf::from("/data/audio"));
    }
}
