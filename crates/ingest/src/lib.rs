//! Dispatches raw input (text/file/url/git) into a `Source`-shaped
//! `{title, source_type, raw_text}` triple for the Store to persist.
//!
//! Nothing here cleans the text — that is the Normalizer's job, run
//! afterwards over `raw_text`.

mod file;
mod git;
mod text;
mod title;
mod url;

use std::time::Duration;

use episodeer_core::{Result, SourceType};

/// What the caller wants ingested.
pub enum IngestInput {
    Text {
        content: String,
        title: Option<String>,
    },
    File {
        filename: String,
        bytes: Vec<u8>,
    },
    Url {
        url: String,
    },
    Git {
        repo_url: String,
        subpath: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub request_timeout: Duration,
    pub max_bytes: usize,
    pub max_redirects: usize,
    pub git_clone_timeout: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(20),
            max_bytes: 10 * 1024 * 1024,
            max_redirects: 5,
            git_clone_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestResult {
    pub title: String,
    pub source_type: SourceType,
    pub raw_text: String,
}

/// Dispatch `input` to its variant handler.
pub async fn ingest(input: IngestInput, config: &IngestConfig) -> Result<IngestResult> {
    match input {
        IngestInput::Text { content, title } => Ok(text::ingest(content, title)),
        IngestInput::File { filename, bytes } => file::ingest(filename, bytes),
        IngestInput::Url { url } => url::ingest(&url, config).await,
        IngestInput::Git { repo_url, subpath } => {
            // git2 is synchronous (libgit2 bindings); run it on a
            // blocking thread so it doesn't stall the async runtime.
            // Wrapped in a wall-clock timeout per spec — a hung clone
            // against a slow/unreachable remote must not block forever.
            let subpath_owned = subpath;
            let task = tokio::task::spawn_blocking(move || {
                git::ingest(&repo_url, subpath_owned.as_deref())
            });
            match tokio::time::timeout(config.git_clone_timeout, task).await {
                Ok(join_result) => join_result.map_err(|e| {
                    episodeer_core::Error::Internal(format!("git ingest task panicked: {e}"))
                })?,
                Err(_elapsed) => Err(episodeer_core::Error::Timeout),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn text_variant_passes_through() {
        let result = ingest(
            IngestInput::Text {
                content: "Hello there.".to_string(),
                title: Some("Greeting".to_string()),
            },
            &IngestConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(result.title, "Greeting");
        assert_eq!(result.source_type, SourceType::Text);
        assert_eq!(result.raw_text, "Hello there.");
    }

    #[tokio::test]
    async fn file_variant_rejects_non_utf8() {
        let result = ingest(
            IngestInput::File {
                filename: "bin.dat".to_string(),
                bytes: vec![0xff, 0xfe],
            },
            &IngestConfig::default(),
        )
        .await;
        assert!(result.is_err());
    }
}
