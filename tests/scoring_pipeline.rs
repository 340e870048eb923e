//! End-to-end pipeline tests over the offline stub scorer.

use crossrank::{OfflineBackend, RankingEngine, RankingError, ScoringClient};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn stub_client() -> ScoringClient {
    let backend = OfflineBackend::stub("stub-model").expect("Failed to build stub backend");
    ScoringClient::with_backend(Box::new(backend))
}

#[tokio::test]
async fn test_score_pair_echoes_inputs() {
    let client = stub_client();

    let result = client
        .score_pair("What is Rust?", "Rust is a systems programming language")
        .await
        .unwrap();

    assert_eq!(result.text_1, "What is Rust?");
    assert_eq!(result.text_2, "Rust is a systems programming language");
    assert!((0.0..=1.0).contains(&result.score));
}

#[tokio::test]
async fn test_batch_average_is_mean_of_scores() {
    let client = stub_client();

    let result = client
        .score_batch(
            "What is Rust?",
            &strings(&[
                "Rust is a systems programming language",
                "A guide to sourdough baking",
                "Rust has ownership and borrowing",
            ]),
        )
        .await
        .unwrap();

    assert_eq!(result.scores.len(), 3);
    assert_eq!(result.pairs.len(), 3);

    let mean = result.scores.iter().sum::<f64>() / result.scores.len() as f64;
    assert!((result.average_score - mean).abs() < 1e-12);
}

#[tokio::test]
async fn test_rank_documents_full_pipeline() {
    let engine = RankingEngine::new(stub_client());

    let documents = strings(&[
        "A guide to sourdough baking",
        "Rust is a systems programming language",
        "Growing tomatoes at home",
    ]);

    let ranked = engine
        .rank_documents("What is Rust?", &documents, None)
        .await
        .unwrap();

    assert_eq!(ranked.len(), documents.len());
    assert_eq!(ranked[0].document, "Rust is a systems programming language");
    assert_eq!(ranked[0].original_index, 1);

    for (position, item) in ranked.iter().enumerate() {
        assert_eq!(item.rank, position + 1);
    }
    for window in ranked.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[tokio::test]
async fn test_rank_documents_top_k() {
    let engine = RankingEngine::new(stub_client());

    let documents = strings(&["a", "b", "c", "d"]);

    let top_two = engine
        .rank_documents("query", &documents, Some(2))
        .await
        .unwrap();
    assert_eq!(top_two.len(), 2);

    let everything = engine
        .rank_documents("query", &documents, Some(0))
        .await
        .unwrap();
    assert_eq!(everything.len(), 4);
}

#[tokio::test]
async fn test_find_best_match_full_pipeline() {
    let engine = RankingEngine::new(stub_client());

    let candidates = strings(&[
        "Growing tomatoes at home",
        "Rust is a systems programming language",
    ]);

    let best = engine
        .find_best_match("What is Rust?", &candidates)
        .await
        .unwrap();

    assert_eq!(best.query, "What is Rust?");
    assert_eq!(best.best_match, "Rust is a systems programming language");
    assert_eq!(best.best_index, 1);
    assert_eq!(best.all_scores.len(), candidates.len());
    assert_eq!(best.best_score, best.all_scores[1]);
}

#[tokio::test]
async fn test_find_best_match_rejects_empty_candidates() {
    let engine = RankingEngine::new(stub_client());

    let err = engine.find_best_match("query", &[]).await.unwrap_err();

    assert!(matches!(err, RankingError::EmptyCandidates));
}
