// Core algorithm exports
pub mod ranker;
pub mod scoring;

pub use ranker::Ranker;
pub use scoring::{
    compatibility_score, experience_proximity, github_activity, jaccard, location_proximity,
    GithubBounds, SCORE_EPSILON,
};
