use super::*;
use crate::ratings::Rating;

fn matrix(entries: &[(u32, u32, u8)]) -> RatingMatrix {
    let ratings: Vec<Rating> = entries
        .iter()
        .map(|&(u, m, s)| Rating::new(u, m, s, 0).expect("valid score"))
        .collect();
    RatingMatrix::from_ratings(&ratings).expect("valid ratings")
}

/// Three users: 1 and 3 overlap with the query user 2 on movie 10 only.
fn overlap_matrix() -> RatingMatrix {
    matrix(&[(1, 10, 5), (1, 20, 4), (2, 10, 5), (3, 10, 1), (3, 30, 5)])
}

#[test]
fn test_recommend_for_user_weighted_average() {
    let m = overlap_matrix();
    let sim = SimilarityMatrix::cosine(&m, Axis::Users);
    let recs = recommend_for_user(&m, &sim, 2, 10, &UserRecConfig::default())
        .expect("user 2 has neighbors");

    // Each candidate has a single neighborhood rater, so the weighted
    // average collapses to that rater's score: 30 → 5.0, 20 → 4.0.
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].0, 30);
    assert!((recs[0].1 - 5.0).abs() < 1e-6);
    assert_eq!(recs[1].0, 20);
    assert!((recs[1].1 - 4.0).abs() < 1e-6);
}

#[test]
fn test_recommend_never_returns_seen_movies() {
    let m = overlap_matrix();
    let sim = SimilarityMatrix::cosine(&m, Axis::Users);
    let recs = recommend_for_user(&m, &sim, 2, 10, &UserRecConfig::default())
        .expect("user 2 has neighbors");
    assert!(recs.iter().all(|&(movie, _)| movie != 10));
}

#[test]
fn test_recommend_exclude_seen_false_keeps_rated() {
    let m = overlap_matrix();
    let sim = SimilarityMatrix::cosine(&m, Axis::Users);
    let config = UserRecConfig {
        exclude_seen: false,
        ..UserRecConfig::default()
    };
    let recs = recommend_for_user(&m, &sim, 2, 10, &config).expect("user 2 has neighbors");
    assert!(recs.iter().any(|&(movie, _)| movie == 10));
}

#[test]
fn test_recommend_neighborhood_cutoff() {
    let m = overlap_matrix();
    let sim = SimilarityMatrix::cosine(&m, Axis::Users);
    // sim(2,1) > sim(2,3): user 1's vector points mostly along movie 10.
    let config = UserRecConfig {
        neighborhood: Some(1),
        ..UserRecConfig::default()
    };
    let recs = recommend_for_user(&m, &sim, 2, 10, &config).expect("user 2 has neighbors");
    // Only user 1 survives, so only movie 20 can be recommended.
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].0, 20);
}

#[test]
fn test_recommend_zero_neighborhood_rejected() {
    let m = overlap_matrix();
    let sim = SimilarityMatrix::cosine(&m, Axis::Users);
    let config = UserRecConfig {
        neighborhood: Some(0),
        ..UserRecConfig::default()
    };
    assert!(matches!(
        recommend_for_user(&m, &sim, 2, 10, &config),
        Err(SugerirError::InvalidHyperparameter { .. })
    ));
}

#[test]
fn test_recommend_empty_neighborhood() {
    // Users 1 and 2 share no movies: zero similarity both ways.
    let m = matrix(&[(1, 10, 5), (2, 20, 5)]);
    let sim = SimilarityMatrix::cosine(&m, Axis::Users);
    let err = recommend_for_user(&m, &sim, 2, 10, &UserRecConfig::default());
    assert!(matches!(
        err,
        Err(SugerirError::EmptyNeighborhood { user_id: 2 })
    ));

    // Documented fallback: the global popularity ranking still answers.
    let seen: HashSet<u32> = HashSet::from([20]);
    let fallback = popularity(&m, 10, &seen);
    assert_eq!(fallback, vec![(10, 1.0)]);
}

#[test]
fn test_recommend_unknown_user() {
    let m = overlap_matrix();
    let sim = SimilarityMatrix::cosine(&m, Axis::Users);
    assert!(matches!(
        recommend_for_user(&m, &sim, 99, 10, &UserRecConfig::default()),
        Err(SugerirError::UnknownEntity { .. })
    ));
}

#[test]
fn test_recommend_rejects_item_axis_matrix() {
    let m = overlap_matrix();
    let item_sim = SimilarityMatrix::cosine(&m, Axis::Items);
    assert!(recommend_for_user(&m, &item_sim, 2, 10, &UserRecConfig::default()).is_err());
}

#[test]
fn test_similar_items_excludes_query() {
    let m = matrix(&[(1, 10, 4), (1, 20, 4), (2, 10, 2), (2, 20, 2), (3, 30, 5)]);
    let item_sim = SimilarityMatrix::cosine(&m, Axis::Items);
    let recs = similar_items(&item_sim, 10, 10).expect("known movie");
    assert!(recs.iter().all(|&(movie, _)| movie != 10));
    // Movie 20 is rated identically to 10 by both raters.
    assert_eq!(recs[0].0, 20);
    assert!((recs[0].1 - 1.0).abs() < 1e-6);
}

#[test]
fn test_similar_items_unknown_movie() {
    let m = overlap_matrix();
    let item_sim = SimilarityMatrix::cosine(&m, Axis::Items);
    assert!(matches!(
        similar_items(&item_sim, 999, 5),
        Err(SugerirError::UnknownEntity { .. })
    ));
}

#[test]
fn test_similar_items_rejects_user_axis_matrix() {
    let m = overlap_matrix();
    let user_sim = SimilarityMatrix::cosine(&m, Axis::Users);
    assert!(similar_items(&user_sim, 10, 5).is_err());
}

#[test]
fn test_popularity_counts_and_ties() {
    let m = matrix(&[(1, 10, 1), (2, 10, 5), (1, 20, 3), (2, 20, 3), (3, 30, 4)]);
    let top = popularity(&m, 10, &HashSet::new());
    // 10 and 20 tie at two raters; lower movie id first.
    assert_eq!(top, vec![(10, 2.0), (20, 2.0), (30, 1.0)]);
}
