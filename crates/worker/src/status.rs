//! Point-in-time worker snapshot for external status polling

use parking_lot::RwLock;

use episodeer_core::EpisodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStatus {
    pub queue_size: usize,
    pub current_episode_id: Option<EpisodeId>,
    pub current_chunk_index: Option<i64>,
}

/// Shared, lock-guarded status the worker updates as it picks and
/// finishes chunks. Readers (the Library Service's status endpoint) see
/// a value that was consistent with the Store within one transaction
/// boundary — the worker only flips this after its own transaction
/// commits.
#[derive(Default)]
pub struct StatusCell(RwLock<WorkerStatus>);

impl StatusCell {
    pub fn new() -> Self {
        Self(RwLock::new(WorkerStatus::default()))
    }

    pub fn snapshot(&self) -> WorkerStatus {
        self.0.read().clone()
    }

    pub fn set_queue_size(&self, size: usize) {
        self.0.write().queue_size = size;
    }

    pub fn set_current(&self, episode_id: Option<EpisodeId>, chunk_index: Option<i64>) {
        let mut status = self.0.write();
        status.current_episode_id = episode_id;
        status.current_chunk_index = chunk_index;
    }
}
