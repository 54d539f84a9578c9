// Ranking behavior over realistic candidate pools

use hackmate_algo::core::scoring::{compatibility_score, GithubBounds};
use hackmate_algo::core::Ranker;
use hackmate_algo::models::{ExperienceLevel, GithubStats, HackerProfile, ScoringWeights};
use std::collections::HashSet;

fn create_profile(
    id: &str,
    languages: &[&str],
    experience: ExperienceLevel,
    city: &str,
    state: &str,
) -> HackerProfile {
    HackerProfile {
        user_id: id.to_string(),
        name: format!("User {}", id),
        languages: languages.iter().map(|s| s.to_string()).collect(),
        frameworks: vec![],
        experience,
        city: city.to_string(),
        state: state.to_string(),
        open_to_recruitment: true,
        github: None,
        hackathons: vec![],
        created_at: None,
    }
}

fn create_pool() -> Vec<HackerProfile> {
    let mut pool = vec![
        create_profile(
            "go-austin",
            &["Go", "Rust"],
            ExperienceLevel::Intermediate,
            "Austin",
            "TX",
        ),
        create_profile(
            "go-dallas",
            &["Go"],
            ExperienceLevel::Intermediate,
            "Dallas",
            "TX",
        ),
        create_profile(
            "py-denver",
            &["Python"],
            ExperienceLevel::Beginner,
            "Denver",
            "CO",
        ),
        create_profile(
            "hs-remote",
            &["Haskell"],
            ExperienceLevel::Advanced,
            "Portland",
            "OR",
        ),
    ];

    pool[1].github = Some(GithubStats {
        stars: 120,
        contributions: 900,
        streak: 45,
    });

    pool
}

#[test]
fn test_skill_overlap_scenario() {
    // A: [Go, React], B: [Go, Python] -> skill_overlap = 1/3.
    // With all weight on skills the compatibility score is exactly 1/3.
    let a = create_profile(
        "a",
        &["Go", "React"],
        ExperienceLevel::Intermediate,
        "Austin",
        "TX",
    );
    let b = create_profile(
        "b",
        &["Go", "Python"],
        ExperienceLevel::Intermediate,
        "Austin",
        "TX",
    );

    let weights = ScoringWeights {
        skill_overlap: 1.0,
        framework_overlap: 0.0,
        experience_proximity: 0.0,
        github_activity: 0.0,
        location_proximity: 0.0,
    };

    let pool = vec![b.clone()];
    let bounds = GithubBounds::from_pool(&pool);
    let score = compatibility_score(&a, &b, bounds.as_ref(), &weights);

    assert!((score - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_ranking_is_reproducible_across_calls() {
    let ranker = Ranker::with_default_weights();
    let requester = create_profile(
        "me",
        &["Go", "Rust"],
        ExperienceLevel::Intermediate,
        "Austin",
        "TX",
    );

    let orderings: Vec<Vec<String>> = (0..3)
        .map(|_| {
            ranker
                .rank(&requester, create_pool(), &HashSet::new())
                .into_iter()
                .map(|c| c.user_id)
                .collect()
        })
        .collect();

    assert_eq!(orderings[0], orderings[1]);
    assert_eq!(orderings[1], orderings[2]);
}

#[test]
fn test_best_skill_and_location_fit_ranks_first() {
    let ranker = Ranker::with_default_weights();
    let requester = create_profile(
        "me",
        &["Go", "Rust"],
        ExperienceLevel::Intermediate,
        "Austin",
        "TX",
    );

    let ranked = ranker.rank(&requester, create_pool(), &HashSet::new());

    assert_eq!(ranked.len(), 4);
    // Shared languages, same city, same experience level
    assert_eq!(ranked[0].user_id, "go-austin");
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score - 1e-6);
    }
}

#[test]
fn test_excluded_candidates_never_appear() {
    let ranker = Ranker::with_default_weights();
    let requester = create_profile(
        "me",
        &["Go"],
        ExperienceLevel::Intermediate,
        "Austin",
        "TX",
    );

    let mut exclude = HashSet::new();
    exclude.insert("go-austin".to_string());
    exclude.insert("py-denver".to_string());

    let ranked = ranker.rank(&requester, create_pool(), &exclude);

    let ids: HashSet<String> = ranked.into_iter().map(|c| c.user_id).collect();
    assert!(!ids.contains("go-austin"));
    assert!(!ids.contains("py-denver"));
    assert_eq!(ids.len(), 2);
}

#[test]
fn test_github_activity_breaks_otherwise_equal_candidates() {
    let ranker = Ranker::with_default_weights();
    let requester = create_profile(
        "me",
        &["Go"],
        ExperienceLevel::Intermediate,
        "Austin",
        "TX",
    );

    let mut active = create_profile(
        "active",
        &["Go"],
        ExperienceLevel::Intermediate,
        "Austin",
        "TX",
    );
    active.github = Some(GithubStats {
        stars: 300,
        contributions: 2000,
        streak: 90,
    });
    let quiet = create_profile(
        "quiet",
        &["Go"],
        ExperienceLevel::Intermediate,
        "Austin",
        "TX",
    );

    let ranked = ranker.rank(&requester, vec![quiet, active], &HashSet::new());

    assert_eq!(ranked[0].user_id, "active");
    assert!(ranked[0].score > ranked[1].score);
}
