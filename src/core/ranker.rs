use crate::core::scoring::{compatibility_score, GithubBounds, SCORE_EPSILON};
use crate::models::{HackerProfile, RankedCandidate, ScoringWeights};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Candidate ranker - scores an eligible pool against a requesting user and
/// produces a descending-ranked list.
///
/// # Pipeline
/// 1. Eligibility filter (self, already-swiped ids, recruitment opt-outs)
/// 2. Pool-relative GitHub bounds
/// 3. Per-candidate compatibility score
/// 4. Deterministic sort (score descending, id ascending within epsilon)
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank an eligible candidate pool for a requester.
    ///
    /// The pool is expected to already exclude swiped targets (the profile
    /// store query takes the exclusion list), but the filter is re-applied
    /// here so the ordering never depends on how the pool was fetched. An
    /// empty eligible pool yields an empty list.
    pub fn rank(
        &self,
        requester: &HackerProfile,
        candidates: Vec<HackerProfile>,
        exclude: &HashSet<String>,
    ) -> Vec<RankedCandidate> {
        let eligible: Vec<HackerProfile> = candidates
            .into_iter()
            .filter(|c| c.user_id != requester.user_id)
            .filter(|c| c.open_to_recruitment)
            .filter(|c| !exclude.contains(&c.user_id))
            .collect();

        let bounds = GithubBounds::from_pool(&eligible);

        let mut ranked: Vec<RankedCandidate> = eligible
            .iter()
            .map(|candidate| RankedCandidate {
                user_id: candidate.user_id.clone(),
                score: compatibility_score(requester, candidate, bounds.as_ref(), &self.weights),
            })
            .collect();

        // Equal scores (within epsilon) order by candidate id ascending so
        // repeated calls over the same snapshot produce the same list.
        ranked.sort_by(|a, b| {
            if (a.score - b.score).abs() <= SCORE_EPSILON {
                a.user_id.cmp(&b.user_id)
            } else {
                b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
            }
        });

        ranked
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
