use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sugerir::graph::{BipartiteGraph, Node};
use sugerir::ratings::{Rating, RatingMatrix};
use sugerir::recommend::{recommend_for_user, UserRecConfig};
use sugerir::similarity::{Axis, SimilarityMatrix};
use sugerir::walk::{visit_counts, WalkConfig};

/// Synthetic rating history: `n_users` users rating ~20 of 200 movies
/// each, with a deterministic pattern so every run benches the same data.
fn generate_ratings(n_users: usize) -> Vec<Rating> {
    let n_movies = 200u32;
    let mut ratings = Vec::with_capacity(n_users * 20);
    for u in 0..n_users as u32 {
        for j in 0..20u32 {
            let movie = (u * 7 + j * 13) % n_movies;
            let score = 1 + ((u + j) % 5) as u8;
            ratings.push(Rating::new(u + 1, movie + 1, score, 0).expect("valid score"));
        }
    }
    ratings
}

fn bench_similarity_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_cosine");

    for size in [50, 200, 500].iter() {
        let matrix = RatingMatrix::from_ratings(&generate_ratings(*size)).expect("valid ratings");
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| SimilarityMatrix::cosine(black_box(&matrix), Axis::Users));
        });
    }

    group.finish();
}

fn bench_user_recommendation(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_user_based");
    group.sample_size(50);

    for size in [50, 200, 500].iter() {
        // Pre-build the model; bench the query alone.
        let matrix = RatingMatrix::from_ratings(&generate_ratings(*size)).expect("valid ratings");
        let sim = SimilarityMatrix::cosine(&matrix, Axis::Users);
        let config = UserRecConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| recommend_for_user(black_box(&matrix), &sim, 1, 10, &config));
        });
    }

    group.finish();
}

fn bench_walk_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_visit_counts");

    let graph = BipartiteGraph::from_ratings(&generate_ratings(200)).expect("valid ratings");
    for num_walks in [10, 100].iter() {
        let config = WalkConfig {
            walk_length: 80,
            num_walks: *num_walks,
            restart_probability: 0.15,
            ..WalkConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(num_walks),
            num_walks,
            |b, _| {
                b.iter(|| visit_counts(black_box(&graph), Node::User(1), &config));
            },
        );
    }

    group.finish();
}

fn bench_popularity_fallback(c: &mut Criterion) {
    let matrix = RatingMatrix::from_ratings(&generate_ratings(200)).expect("valid ratings");
    let exclude: HashSet<u32> = HashSet::new();
    c.bench_function("popularity_fallback", |b| {
        b.iter(|| sugerir::recommend::popularity(black_box(&matrix), 10, &exclude));
    });
}

criterion_group!(
    benches,
    bench_similarity_build,
    bench_user_recommendation,
    bench_walk_sampling,
    bench_popularity_fallback
);
criterion_main!(benches);
