// Engine exports
pub mod error;
pub mod events;
pub mod queue;
mod swipe;
mod undo;

pub use error::EngineError;
pub use events::{MatchCreated, MatchNotifier};
pub use queue::{QueueState, QueueStore, UndoSlot, UserQueue};

use crate::core::Ranker;
use crate::models::HackerProfile;
use crate::services::ledger::SwipeStore;
use crate::services::profiles::{ProfileError, ProfileStore};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Result of asking for the next candidate.
///
/// `Exhausted` is the normal terminal state when the eligible pool is used
/// up for now; callers surface it as "check back later", not as an error.
#[derive(Debug, Clone)]
pub enum NextMatch {
    Candidate(HackerProfile),
    Exhausted,
}

/// Result of committing a swipe decision
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub accepted: bool,
    pub matched: bool,
    pub match_id: Option<String>,
}

/// The teammate-matching engine.
///
/// Facade over the candidate ranker, the per-user match queues, the swipe
/// ledger, and match-event emission. All mutation for a single user runs
/// under that user's queue lock, so swipe and undo are serialized per user
/// while different users never contend.
pub struct MatchEngine {
    profiles: Arc<dyn ProfileStore>,
    ledger: Arc<dyn SwipeStore>,
    ranker: Ranker,
    queues: QueueStore,
    notifier: MatchNotifier,
}

impl MatchEngine {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        ledger: Arc<dyn SwipeStore>,
        ranker: Ranker,
    ) -> Self {
        Self {
            profiles,
            ledger,
            ranker,
            queues: QueueStore::new(),
            notifier: MatchNotifier::default(),
        }
    }

    /// Subscribe to mutual-match events.
    pub fn notifier(&self) -> &MatchNotifier {
        &self.notifier
    }

    pub(crate) fn profiles(&self) -> &Arc<dyn ProfileStore> {
        &self.profiles
    }

    pub(crate) fn ledger(&self) -> &Arc<dyn SwipeStore> {
        &self.ledger
    }

    pub(crate) fn queues(&self) -> &QueueStore {
        &self.queues
    }

    /// Serve the next candidate for a user.
    ///
    /// Idempotent while a candidate is outstanding: a retried call returns
    /// the same candidate instead of skipping ahead. Refills lazily from the
    /// ranker when the queue is exhausted; a failed profile-store call
    /// leaves the queue state untouched.
    pub async fn get_next_match(&self, user_id: &str) -> Result<NextMatch, EngineError> {
        let slot = self.queues.user(user_id).await;
        let mut queue = slot.lock().await;

        if let Some(serving) = queue.serving.clone() {
            match self.profiles.get_profile(&serving).await {
                Ok(profile) => return Ok(NextMatch::Candidate(profile)),
                // The served profile vanished from the store; drop it and
                // advance rather than dead-ending the user.
                Err(ProfileError::NotFound(_)) => queue.serving = None,
                Err(e) => return Err(e.into()),
            }
        }

        if queue.queue.is_empty() {
            queue.queue = self.refill(user_id).await?;
        }

        while let Some(candidate_id) = queue.queue.pop_front() {
            match self.profiles.get_profile(&candidate_id).await {
                Ok(profile) => {
                    queue.serving = Some(candidate_id);
                    return Ok(NextMatch::Candidate(profile));
                }
                Err(ProfileError::NotFound(_)) => continue,
                Err(e) => {
                    // Put the head back so a retry resumes here.
                    queue.queue.push_front(candidate_id);
                    return Err(e.into());
                }
            }
        }

        Ok(NextMatch::Exhausted)
    }

    /// Recompute the ranked candidate queue from the latest ledger and
    /// profile store state.
    async fn refill(&self, user_id: &str) -> Result<VecDeque<String>, EngineError> {
        let swiped = self.ledger.swiped_target_ids(user_id).await?;
        let requester = self.profiles.get_profile(user_id).await?;
        let pool = self
            .profiles
            .get_eligible_profiles(user_id, &swiped)
            .await?;

        let exclude: HashSet<String> = swiped.into_iter().collect();
        let ranked = self.ranker.rank(&requester, pool, &exclude);

        tracing::debug!(
            "Refilled queue for {} with {} candidates",
            user_id,
            ranked.len()
        );

        Ok(ranked.into_iter().map(|c| c.user_id).collect())
    }
}
