use crate::models::SwipeRecord;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Derived state of a per-user queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// No queue computed yet, or exhausted
    Empty,
    /// Candidates waiting, none served
    Loaded,
    /// One candidate is outstanding, awaiting a swipe decision
    Serving,
}

/// The most recent committed swipe, kept for single-level undo.
///
/// A single slot, not a history stack: taking it empties it, and only the
/// next committed swipe refills it.
#[derive(Debug, Clone)]
pub struct UndoSlot {
    pub record: SwipeRecord,
    pub match_id: Option<String>,
}

/// Per-user candidate queue: ordered not-yet-swiped candidate ids plus the
/// currently served candidate. Session-scoped and derivable at any time from
/// the profile store and the ledger.
#[derive(Debug, Default)]
pub struct UserQueue {
    pub queue: VecDeque<String>,
    pub serving: Option<String>,
    pub last_swipe: Option<UndoSlot>,
}

impl UserQueue {
    pub fn state(&self) -> QueueState {
        if self.serving.is_some() {
            QueueState::Serving
        } else if !self.queue.is_empty() {
            QueueState::Loaded
        } else {
            QueueState::Empty
        }
    }

    /// Remove a swiped target wherever it sits; clears `serving` when the
    /// target was the served candidate.
    pub fn consume(&mut self, target_id: &str) {
        if self.serving.as_deref() == Some(target_id) {
            self.serving = None;
        }
        self.queue.retain(|id| id != target_id);
    }

    /// Make a candidate the served one again. A previously serving candidate
    /// returns to the queue head, directly behind it.
    pub fn reserve_front(&mut self, candidate_id: String) {
        if let Some(current) = self.serving.take() {
            self.queue.push_front(current);
        }
        self.serving = Some(candidate_id);
    }
}

/// Keyed store of per-user queues.
///
/// The outer map lock is held only long enough to fetch a user's slot; all
/// queue work and every external call happen under the per-user mutex, so
/// operations for one user are serialized while different users proceed in
/// parallel.
#[derive(Debug, Default)]
pub struct QueueStore {
    inner: RwLock<HashMap<String, Arc<Mutex<UserQueue>>>>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch (or create) the queue slot for a user.
    pub async fn user(&self, user_id: &str) -> Arc<Mutex<UserQueue>> {
        {
            let map = self.inner.read().await;
            if let Some(slot) = map.get(user_id) {
                return slot.clone();
            }
        }

        let mut map = self.inner.write().await;
        map.entry(user_id.to_string()).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SwipeDirection;

    fn record(swiper: &str, target: &str) -> SwipeRecord {
        SwipeRecord {
            id: "swipe-1".to_string(),
            swiper_id: swiper.to_string(),
            target_id: target.to_string(),
            direction: SwipeDirection::Right,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut q = UserQueue::default();
        assert_eq!(q.state(), QueueState::Empty);

        q.queue.push_back("a".to_string());
        assert_eq!(q.state(), QueueState::Loaded);

        let head = q.queue.pop_front().unwrap();
        q.serving = Some(head);
        assert_eq!(q.state(), QueueState::Serving);

        q.consume("a");
        assert_eq!(q.state(), QueueState::Empty);
    }

    #[test]
    fn test_consume_removes_target_from_queue_body() {
        let mut q = UserQueue::default();
        q.serving = Some("a".to_string());
        q.queue.extend(["b".to_string(), "c".to_string()]);

        // Swiping a queued (not served) candidate leaves the served one alone
        q.consume("c");
        assert_eq!(q.serving.as_deref(), Some("a"));
        assert_eq!(q.queue, VecDeque::from(vec!["b".to_string()]));
    }

    #[test]
    fn test_reserve_front_pushes_current_back() {
        let mut q = UserQueue::default();
        q.serving = Some("current".to_string());
        q.queue.push_back("later".to_string());

        q.reserve_front("undone".to_string());

        assert_eq!(q.serving.as_deref(), Some("undone"));
        assert_eq!(
            q.queue,
            VecDeque::from(vec!["current".to_string(), "later".to_string()])
        );
    }

    #[test]
    fn test_undo_slot_is_single_level() {
        let mut q = UserQueue::default();
        q.last_swipe = Some(UndoSlot {
            record: record("a", "b"),
            match_id: None,
        });

        assert!(q.last_swipe.take().is_some());
        assert!(q.last_swipe.take().is_none());
    }

    #[test]
    fn test_queue_store_returns_same_slot_per_user() {
        tokio_test::block_on(async {
            let store = QueueStore::new();

            let first = store.user("alice").await;
            first.lock().await.queue.push_back("bob".to_string());

            let second = store.user("alice").await;
            assert_eq!(second.lock().await.queue.len(), 1);

            let other = store.user("carol").await;
            assert!(other.lock().await.queue.is_empty());
        });
    }
}
