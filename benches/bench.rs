// Criterion benchmarks for the HackMate matching engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hackmate_algo::core::scoring::{compatibility_score, jaccard, GithubBounds};
use hackmate_algo::core::Ranker;
use hackmate_algo::models::{ExperienceLevel, GithubStats, HackerProfile, ScoringWeights};
use std::collections::HashSet;

fn create_candidate(id: usize) -> HackerProfile {
    let languages = match id % 4 {
        0 => vec!["Go", "Rust"],
        1 => vec!["Python", "JavaScript"],
        2 => vec!["Go", "TypeScript", "React"],
        _ => vec!["Java"],
    };

    HackerProfile {
        user_id: format!("user-{:05}", id),
        name: format!("User {}", id),
        languages: languages.into_iter().map(String::from).collect(),
        frameworks: vec!["Actix".to_string()],
        experience: match id % 3 {
            0 => ExperienceLevel::Beginner,
            1 => ExperienceLevel::Intermediate,
            _ => ExperienceLevel::Advanced,
        },
        city: if id % 2 == 0 { "Austin" } else { "Dallas" }.to_string(),
        state: "TX".to_string(),
        open_to_recruitment: true,
        github: if id % 3 == 0 {
            Some(GithubStats {
                stars: (id * 7 % 500) as u32,
                contributions: (id * 13 % 3000) as u32,
                streak: (id % 90) as u32,
            })
        } else {
            None
        },
        hackathons: vec![],
        created_at: None,
    }
}

fn create_requester() -> HackerProfile {
    let mut requester = create_candidate(0);
    requester.user_id = "requester".to_string();
    requester
}

fn bench_jaccard(c: &mut Criterion) {
    let a: Vec<String> = ["Go", "Rust", "Python", "TypeScript"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let b: Vec<String> = ["Go", "Java", "Kotlin"].iter().map(|s| s.to_string()).collect();

    c.bench_function("jaccard", |bencher| {
        bencher.iter(|| jaccard(black_box(&a), black_box(&b)));
    });
}

fn bench_compatibility_score(c: &mut Criterion) {
    let requester = create_requester();
    let candidate = create_candidate(3);
    let pool: Vec<HackerProfile> = (0..100).map(create_candidate).collect();
    let bounds = GithubBounds::from_pool(&pool);
    let weights = ScoringWeights::default();

    c.bench_function("compatibility_score", |bencher| {
        bencher.iter(|| {
            compatibility_score(
                black_box(&requester),
                black_box(&candidate),
                bounds.as_ref(),
                black_box(&weights),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = Ranker::with_default_weights();
    let requester = create_requester();
    let exclude = HashSet::new();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<HackerProfile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |bencher, _| {
                bencher.iter(|| {
                    ranker.rank(
                        black_box(&requester),
                        black_box(candidates.clone()),
                        black_box(&exclude),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_jaccard, bench_compatibility_score, bench_ranking);

criterion_main!(benches);
