//! The episode admission queue
//!
//! Strict FIFO on episode id, deduplicated so enqueuing an already
//! queued episode is a no-op. `parking_lot::Mutex` guards the deque (the
//! teacher's concurrency primitive of choice throughout its buffered
//! processors); `tokio::sync::Notify` wakes the worker instead of
//! busy-polling.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::Notify;

use episodeer_core::EpisodeId;

pub struct AdmissionQueue {
    items: Mutex<VecDeque<EpisodeId>>,
    notify: Notify,
}

impl AdmissionQueue {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    /// Push `episode_id` to the tail unless it's already queued.
    /// Regeneration requests use this same path to requeue an episode
    /// that has already drained its pass.
    pub fn enqueue(&self, episode_id: EpisodeId) {
        let mut items = self.items.lock();
        if !items.contains(&episode_id) {
            items.push_back(episode_id);
            drop(items);
            self.notify.notify_one();
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Wait until an episode is available, then pop it from the head.
    pub async fn pop(&self) -> EpisodeId {
        loop {
            if let Some(id) = self.items.lock().pop_front() {
                return id;
            }
            self.notify.notified().await;
        }
    }
}

impl Default for AdmissionQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fifo_order_preserved() {
        let queue = AdmissionQueue::new();
        let a = EpisodeId::new();
        let b = EpisodeId::new();
        queue.enqueue(a);
        queue.enqueue(b);
        assert_eq!(queue.pop().await, a);
        assert_eq!(queue.pop().await, b);
    }

    #[test]
    fn duplicate_enqueue_is_a_no_op() {
        let queue = AdmissionQueue::new();
        let a = EpisodeId::new();
        queue.enqueue(a);
        queue.enqueue(a);
        assert_eq!(queue.len(), 1);
    }
}
