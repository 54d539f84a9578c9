// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    canonical_pair, ExperienceLevel, GithubStats, HackathonRecord, HackerProfile, MatchRecord,
    RankedCandidate, ScoringWeights, SwipeDirection, SwipeRecord,
};
pub use requests::{NextMatchRequest, SwipeRequest, UndoRequest};
pub use responses::{ErrorResponse, HealthResponse, NextMatchResponse, SwipeResponse};
