//! `url` ingest variant — bounded HTTP GET with a content-type allow-list
//!
//! Grounded on the teacher's `OllamaBackend` (a `reqwest::Client` built
//! once per call with an explicit timeout, status checked before the
//! body is touched).

use futures::StreamExt;
use reqwest::Client;

use episodeer_core::{Error, Result, SourceType};

use crate::{IngestConfig, IngestResult};

const ALLOWED_CONTENT_TYPES: &[&str] = &["text/html", "text/plain", "text/markdown"];

pub async fn ingest(url: &str, config: &IngestConfig) -> Result<IngestResult> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| Error::Internal(format!("building http client: {e}")))?;

    let response = client.get(url).send().await.map_err(classify_send_error)?;

    if !response.status().is_success() {
        return Err(Error::FetchFailed(format!(
            "unexpected status {}",
            response.status()
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    if !ALLOWED_CONTENT_TYPES.iter().any(|allowed| content_type == *allowed) {
        return Err(Error::UnsupportedType(format!(
            "content-type '{content_type}' is not allowed"
        )));
    }

    let body = read_capped(response, config.max_bytes).await?;
    let text = String::from_utf8_lossy(&body).into_owned();

    let (title, raw_text) = if content_type == "text/html" {
        let (title, body) = episodeer_normalize::extract_readable(&text);
        (title, body)
    } else {
        (None, text)
    };

    Ok(IngestResult {
        title: title.unwrap_or_else(|| crate::title::derive_from_content(&raw_text)),
        source_type: SourceType::Url,
        raw_text,
    })
}

async fn read_capped(response: reqwest::Response, max_bytes: usize) -> Result<Vec<u8>> {
    if let Some(len) = response.content_length() {
        if len as usize > max_bytes {
            return Err(Error::TooLarge(format!("content-length {len} exceeds cap {max_bytes}")));
        }
    }

    let mut buf = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(classify_stream_error)?;
        if buf.len() + chunk.len() > max_bytes {
            return Err(Error::TooLarge(format!("response exceeds cap of {max_bytes} bytes")));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn classify_send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::FetchFailed(err.to_string())
    }
}

fn classify_stream_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::FetchFailed(err.to_string())
    }
}
