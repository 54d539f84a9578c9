use crate::models::{ExperienceLevel, GithubStats, HackerProfile, ScoringWeights};
use std::collections::HashSet;

/// Scores closer than this are considered tied and fall back to the id
/// tie-break in the ranker.
pub const SCORE_EPSILON: f64 = 1e-6;

/// Jaccard similarity between two string sets (|A ∩ B| / |A ∪ B|).
///
/// Comparison is ASCII-case-insensitive. The Jaccard of two empty sets is
/// defined as 0, not NaN.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<String> = a.iter().map(|s| s.to_ascii_lowercase()).collect();
    let set_b: HashSet<String> = b.iter().map(|s| s.to_ascii_lowercase()).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Experience proximity: 1.0 for equal levels, 0.5 for adjacent levels
/// (beginner/intermediate, intermediate/advanced), 0.0 otherwise.
#[inline]
pub fn experience_proximity(a: ExperienceLevel, b: ExperienceLevel) -> f64 {
    match a.ordinal().abs_diff(b.ordinal()) {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    }
}

/// Min-max bounds for GitHub stats across an eligible pool.
///
/// Computed once per ranking pass so that github_activity is normalized
/// relative to the candidates actually under consideration.
#[derive(Debug, Clone, Copy)]
pub struct GithubBounds {
    min_stars: u32,
    max_stars: u32,
    min_streak: u32,
    max_streak: u32,
}

impl GithubBounds {
    /// Bounds over the connected candidates of a pool. None when no
    /// candidate has a GitHub connection.
    pub fn from_pool(pool: &[HackerProfile]) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for stats in pool.iter().filter_map(|p| p.github.as_ref()) {
            bounds = Some(match bounds {
                None => Self {
                    min_stars: stats.stars,
                    max_stars: stats.stars,
                    min_streak: stats.streak,
                    max_streak: stats.streak,
                },
                Some(b) => Self {
                    min_stars: b.min_stars.min(stats.stars),
                    max_stars: b.max_stars.max(stats.stars),
                    min_streak: b.min_streak.min(stats.streak),
                    max_streak: b.max_streak.max(stats.streak),
                },
            });
        }
        bounds
    }
}

/// Normalize a value into [0, 1] against min-max bounds. A degenerate range
/// (max == min) maps to 1.0; values outside the bounds clamp to the range.
#[inline]
fn min_max(value: u32, min: u32, max: u32) -> f64 {
    if max > min {
        (value.saturating_sub(min) as f64 / (max - min) as f64).min(1.0)
    } else {
        1.0
    }
}

/// GitHub activity score (0-1): average of pool-normalized star count and
/// current streak. Candidates with no GitHub connection score 0.
pub fn github_activity(stats: Option<&GithubStats>, bounds: Option<&GithubBounds>) -> f64 {
    match (stats, bounds) {
        (Some(stats), Some(b)) => {
            let stars = min_max(stats.stars, b.min_stars, b.max_stars);
            let streak = min_max(stats.streak, b.min_streak, b.max_streak);
            (stars + streak) / 2.0
        }
        _ => 0.0,
    }
}

/// Location proximity: 1.0 for the same city (and state), 0.5 for the same
/// state, 0.0 otherwise. Comparison is ASCII-case-insensitive.
#[inline]
pub fn location_proximity(a: &HackerProfile, b: &HackerProfile) -> f64 {
    if !a.state.eq_ignore_ascii_case(&b.state) {
        return 0.0;
    }
    if a.city.eq_ignore_ascii_case(&b.city) {
        1.0
    } else {
        0.5
    }
}

/// Compatibility score (0-1) between a requester and one candidate.
///
/// Weighted sum of the five terms; weights default to
/// skill 0.40, framework 0.15, experience 0.15, github 0.15, location 0.15
/// and come from configuration rather than being hard-coded at call sites.
pub fn compatibility_score(
    requester: &HackerProfile,
    candidate: &HackerProfile,
    bounds: Option<&GithubBounds>,
    weights: &ScoringWeights,
) -> f64 {
    let skill = jaccard(&requester.languages, &candidate.languages);
    let framework = jaccard(&requester.frameworks, &candidate.frameworks);
    let experience = experience_proximity(requester.experience, candidate.experience);
    let github = github_activity(candidate.github.as_ref(), bounds);
    let location = location_proximity(requester, candidate);

    skill * weights.skill_overlap
        + framework * weights.framework_overlap
        + experience * weights.experience_proximity
        + github * weights.github_activity
        + location * weights.location_proximity
}
