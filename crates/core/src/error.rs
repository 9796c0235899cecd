//! Error kinds shared across the workspace
//!
//! Every crate's internal error type converts into this one at its
//! boundary (`From` impls in each crate), so the Library Service surface
//! always reports a single `{error_kind, message}` shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("empty content")]
    EmptyContent,

    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("request timed out")]
    Timeout,

    #[error("content too large: {0}")]
    TooLarge(String),

    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("audio contract mismatch: {0}")]
    AudioContractMismatch(String),

    #[error("undo ticket expired")]
    UndoExpired,

    #[error("invalid index: {0}")]
    InvalidIndex(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable tag for the Library Service surface.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "not_found",
            Error::InvalidState(_) => "invalid_state",
            Error::EmptyContent => "empty_content",
            Error::FetchFailed(_) => "fetch_failed",
            Error::Timeout => "timeout",
            Error::TooLarge(_) => "too_large",
            Error::UnsupportedType(_) => "unsupported_type",
            Error::SynthesisFailed(_) => "synthesis_failed",
            Error::AudioContractMismatch(_) => "audio_contract_mismatch",
            Error::UndoExpired => "undo_expired",
            Error::InvalidIndex(_) => "invalid_index",
            Error::Internal(_) => "internal",
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("row not found".to_string()),
            other => Error::Internal(other.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Internal(err.to_string())
    }
}
