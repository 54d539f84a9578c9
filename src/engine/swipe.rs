use crate::engine::events::MatchCreated;
use crate::engine::queue::UndoSlot;
use crate::engine::{EngineError, MatchEngine, SwipeOutcome};
use crate::models::SwipeDirection;
use crate::services::profiles::ProfileError;

impl MatchEngine {
    /// Record interest in a candidate.
    pub async fn swipe_right(
        &self,
        user_id: &str,
        target_id: &str,
    ) -> Result<SwipeOutcome, EngineError> {
        self.swipe(user_id, target_id, SwipeDirection::Right).await
    }

    /// Record disinterest in a candidate.
    pub async fn swipe_left(
        &self,
        user_id: &str,
        target_id: &str,
    ) -> Result<SwipeOutcome, EngineError> {
        self.swipe(user_id, target_id, SwipeDirection::Left).await
    }

    /// Validate and commit a swipe decision.
    ///
    /// Validation happens before any write: self-swipes are rejected, the
    /// target must resolve to a profile, and a pair already in the ledger
    /// surfaces as `DuplicateSwipe` (the ledger's uniqueness constraint is
    /// the arbiter, so a retried request can never commit twice). The swipe
    /// insert and any match creation share one ledger transaction.
    pub async fn swipe(
        &self,
        user_id: &str,
        target_id: &str,
        direction: SwipeDirection,
    ) -> Result<SwipeOutcome, EngineError> {
        if user_id == target_id {
            return Err(EngineError::InvalidTarget);
        }

        let slot = self.queues().user(user_id).await;
        let mut queue = slot.lock().await;

        match self.profiles().get_profile(target_id).await {
            Ok(_) => {}
            Err(ProfileError::NotFound(id)) => return Err(EngineError::CandidateNotFound(id)),
            Err(e) => return Err(e.into()),
        }

        let committed = self
            .ledger()
            .commit_swipe(user_id, target_id, direction)
            .await?;

        let match_id = committed.matched.as_ref().map(|m| m.id.clone());

        // Advance the queue and arm the single-level undo slot.
        queue.consume(target_id);
        queue.last_swipe = Some(UndoSlot {
            record: committed.record,
            match_id: match_id.clone(),
        });

        if let Some(matched) = &committed.matched {
            tracing::info!(
                "Mutual match {} created for {} and {}",
                matched.id,
                matched.user_a_id,
                matched.user_b_id
            );
            self.notifier().notify(MatchCreated {
                match_id: matched.id.clone(),
                user_a_id: matched.user_a_id.clone(),
                user_b_id: matched.user_b_id.clone(),
            });
        }

        Ok(SwipeOutcome {
            accepted: true,
            matched: match_id.is_some(),
            match_id,
        })
    }
}
