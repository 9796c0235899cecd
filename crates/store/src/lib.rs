//! Persistence layer for the episode generation service.
//!
//! A thin, transactional wrapper around a single SQLite file. Every
//! repository method takes a `sqlx::Executor` so callers choose whether
//! an operation runs standalone against the pool or composed into a
//! caller-managed transaction — the Library service leans on the latter
//! for anything that must appear atomic (e.g. inserting an episode
//! alongside its chunk plan).

mod chunk;
mod episode;
mod folder;
mod playback;
mod pool;
mod recovery;
mod rows;
mod settings;
mod source;
mod tag;
mod undo;

pub use chunk::ChunkRepo;
pub use episode::EpisodeRepo;
pub use folder::FolderRepo;
pub use playback::PlaybackRepo;
pub use pool::{connect, migrate};
pub use recovery::recover_startup_state;
pub use settings::SettingsRepo;
pub use source::SourceRepo;
pub use tag::TagRepo;
pub use undo::UndoRepo;
