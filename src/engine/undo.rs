use crate::engine::{EngineError, MatchEngine};
use crate::models::HackerProfile;

impl MatchEngine {
    /// Revert the user's most recent swipe and re-serve the candidate.
    ///
    /// Exactly one level: the undo slot is emptied on success, so a second
    /// consecutive call fails with `NothingToUndo`. When the undone swipe
    /// produced a match, the MatchRecord is retracted in the same ledger
    /// transaction as the swipe deletion.
    pub async fn undo_last_swipe(&self, user_id: &str) -> Result<HackerProfile, EngineError> {
        let slot = self.queues().user(user_id).await;
        let mut queue = slot.lock().await;

        let undo = queue.last_swipe.take().ok_or(EngineError::NothingToUndo)?;

        if let Err(e) = self
            .ledger()
            .revert_swipe(&undo.record, undo.match_id.as_deref())
            .await
        {
            // Ledger untouched on failure; restore the slot so the user can
            // retry the undo.
            queue.last_swipe = Some(undo);
            return Err(e.into());
        }

        let target_id = undo.record.target_id;
        queue.reserve_front(target_id.clone());

        tracing::info!("Swipe by {} on {} undone", user_id, target_id);

        self.profiles()
            .get_profile(&target_id)
            .await
            .map_err(Into::into)
    }
}
