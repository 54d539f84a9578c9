use serde::{Deserialize, Serialize};

/// Hacker profile with skills, location, and GitHub activity data.
///
/// Owned by the external profile service; the engine treats it as a
/// read-only snapshot within a single ranking pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackerProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    pub experience: ExperienceLevel,
    pub city: String,
    pub state: String,
    #[serde(rename = "openToRecruitment", default = "default_true")]
    pub open_to_recruitment: bool,
    #[serde(default)]
    pub github: Option<GithubStats>,
    #[serde(default)]
    pub hackathons: Vec<HackathonRecord>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl HackerProfile {
    /// Whether the profile has a connected GitHub account.
    pub fn has_github(&self) -> bool {
        self.github.is_some()
    }
}

fn default_true() -> bool {
    true
}

/// Self-declared experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Ordinal used for adjacency checks (beginner 0, intermediate 1, advanced 2)
    pub fn ordinal(self) -> u8 {
        match self {
            ExperienceLevel::Beginner => 0,
            ExperienceLevel::Intermediate => 1,
            ExperienceLevel::Advanced => 2,
        }
    }
}

/// Aggregate GitHub statistics imported by the surrounding application
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GithubStats {
    #[serde(default)]
    pub stars: u32,
    #[serde(default)]
    pub contributions: u32,
    #[serde(default)]
    pub streak: u32,
}

/// A past hackathon participation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackathonRecord {
    #[serde(rename = "hackathonId")]
    pub hackathon_id: String,
    pub name: String,
    pub year: u16,
}

/// Swipe direction: right = interested, left = not interested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "swipe_direction", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Right,
    Left,
}

/// One committed swipe decision.
///
/// Append-only: the (swiper_id, target_id) pair is unique, and a record is
/// only ever removed by undoing the swiper's most recent swipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRecord {
    pub id: String,
    pub swiper_id: String,
    pub target_id: String,
    pub direction: SwipeDirection,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A mutual match between two users.
///
/// Invariant: user_a_id < user_b_id, so at most one record exists per
/// unordered pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub user_a_id: String,
    pub user_b_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Canonicalize an unordered user pair (smaller id first).
pub fn canonical_pair<'a>(x: &'a str, y: &'a str) -> (&'a str, &'a str) {
    if x <= y {
        (x, y)
    } else {
        (y, x)
    }
}

/// A candidate with its compatibility score, as produced by the ranker.
/// Ephemeral: recomputed on every queue refill, never persisted.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub user_id: String,
    pub score: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skill_overlap: f64,
    pub framework_overlap: f64,
    pub experience_proximity: f64,
    pub github_activity: f64,
    pub location_proximity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_overlap: 0.40,
            framework_overlap: 0.15,
            experience_proximity: 0.15,
            github_activity: 0.15,
            location_proximity: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_pair_orders_ids() {
        assert_eq!(canonical_pair("bob", "alice"), ("alice", "bob"));
        assert_eq!(canonical_pair("alice", "bob"), ("alice", "bob"));
        assert_eq!(canonical_pair("same", "same"), ("same", "same"));
    }

    #[test]
    fn test_experience_ordinals_are_adjacent() {
        assert_eq!(
            ExperienceLevel::Intermediate.ordinal() - ExperienceLevel::Beginner.ordinal(),
            1
        );
        assert_eq!(
            ExperienceLevel::Advanced.ordinal() - ExperienceLevel::Intermediate.ordinal(),
            1
        );
    }
}
