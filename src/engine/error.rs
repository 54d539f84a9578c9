use crate::services::ledger::LedgerError;
use crate::services::profiles::ProfileError;
use thiserror::Error;

/// Engine error taxonomy.
///
/// `NoMoreCandidates` is deliberately absent: an exhausted pool is a normal
/// terminal state (`NextMatch::Exhausted`), not an error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Profile store or ledger storage unreachable; retryable with backoff.
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),

    /// The target is already in the ledger for this swiper. Not retryable;
    /// callers treat it as a benign no-op and advance.
    #[error("Target already swiped")]
    DuplicateSwipe,

    /// The target id does not resolve to a profile.
    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),

    /// A user may not swipe on themselves.
    #[error("Invalid swipe target")]
    InvalidTarget,

    /// No swipe record is available to undo.
    #[error("Nothing to undo")]
    NothingToUndo,
}

impl From<ProfileError> for EngineError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(id) => EngineError::CandidateNotFound(id),
            other => EngineError::DependencyUnavailable(other.to_string()),
        }
    }
}

impl From<LedgerError> for EngineError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::DuplicateSwipe(_, _) => EngineError::DuplicateSwipe,
            other => EngineError::DependencyUnavailable(other.to_string()),
        }
    }
}
