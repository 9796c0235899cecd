//! Core types and traits for the episode generation workspace
//!
//! This crate provides the vocabulary every other crate builds on:
//! - the entity records of the data model (Source, Episode, Chunk, …)
//! - the `Error`/`Result` pair every crate's own errors convert into
//! - the two external-collaborator traits (`TextToSpeech`, `AudioCodec`)
//!
//! Nothing here touches the database, the filesystem, or the network;
//! those live in `episodeer-store`, `episodeer-ingest`, and friends.

pub mod chunk;
pub mod cleaning;
pub mod episode;
pub mod error;
pub mod folder;
pub mod ids;
pub mod paths;
pub mod playback;
pub mod settings;
pub mod source;
pub mod tag;
pub mod traits;
pub mod undo;

pub use chunk::{truncate_error_message, Chunk, ChunkStatus, CHUNK_ERROR_MESSAGE_MAX_LEN};
pub use cleaning::{CleaningConfig, CodeBlockRule};
pub use episode::{BreathingIntensity, ChunkStrategy, Episode, EpisodeStatus};
pub use error::{Error, Result};
pub use folder::Folder;
pub use ids::{EpisodeId, FolderId, SourceId, TagId, UndoTicketId};
pub use paths::{chunk_audio_path, episode_artifact_path, episode_audio_dir};
pub use playback::PlaybackState;
pub use settings::{Settings, SETTINGS_SINGLETON_ID};
pub use source::{Source, SourceType};
pub use tag::Tag;
pub use traits::{AudioCodec, AudioFormat, TextToSpeech, VoiceInfo, VoiceKind};
pub use undo::{OperationKind, UndoTicket};
