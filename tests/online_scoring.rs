//! Online backend integration tests against a local stub scoring server.

mod common;

use common::{ScoreResponder, ScoreServer};

use serde_json::json;

use crossrank::{
    BackendError, ClientError, Config, OnlineConfig, RankingEngine, ScoringClient,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn online_client(server: &ScoreServer) -> ScoringClient {
    ScoringClient::online(OnlineConfig::new(&server.base_url, "test-model"))
        .expect("Failed to build online client")
}

#[tokio::test]
async fn test_score_pair_parses_score() {
    let server = ScoreServer::spawn_fixed(200, json!({"data": [{"score": 0.42}]})).await;
    let client = online_client(&server);

    let result = client.score_pair("x", "y").await.unwrap();

    assert_eq!(result.text_1, "x");
    assert_eq!(result.text_2, "y");
    assert_eq!(result.score, 0.42);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body["model"], json!("test-model"));
    assert_eq!(requests[0].body["text_1"], json!("x"));
    assert_eq!(requests[0].body["text_2"], json!("y"));
    assert_eq!(requests[0].body["encoding_format"], json!("float"));
}

#[tokio::test]
async fn test_user_agent_header_attached() {
    let server = ScoreServer::spawn_fixed(200, json!({"data": [{"score": 0.1}]})).await;
    let client = online_client(&server);

    client.score_pair("x", "y").await.unwrap();

    let requests = server.requests();
    let user_agent = requests[0].headers.get("user-agent").unwrap();
    assert!(user_agent.starts_with("crossrank/"));
}

#[tokio::test]
async fn test_auth_headers_passed_through() {
    let server = ScoreServer::spawn_fixed(200, json!({"data": [{"score": 0.1}]})).await;
    let config = OnlineConfig::new(&server.base_url, "test-model")
        .with_header("x-api-key", "secret-key");
    let client = ScoringClient::online(config).unwrap();

    client.score_pair("x", "y").await.unwrap();

    let requests = server.requests();
    assert_eq!(
        requests[0].headers.get("x-api-key").map(String::as_str),
        Some("secret-key")
    );
}

#[tokio::test]
async fn test_non_success_status_raises() {
    let server = ScoreServer::spawn_fixed(500, json!("boom")).await;
    let client = online_client(&server);

    let err = client.score_pair("x", "y").await.unwrap_err();

    match err {
        ClientError::Backend(BackendError::ScoreRequest { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected score request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_message_carries_status() {
    let server = ScoreServer::spawn_fixed(503, json!({"error": "overloaded"})).await;
    let client = online_client(&server);

    let err = client.score_pair("x", "y").await.unwrap_err();

    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_batch_scores_preserve_order() {
    let server = ScoreServer::spawn(ScoreResponder::Indexed).await;
    let client = online_client(&server);

    let result = client
        .score_batch("q", &strings(&["a", "b", "c"]))
        .await
        .unwrap();

    assert_eq!(result.scores, vec![0.1, 0.2, 0.3]);
    assert_eq!(
        result.pairs,
        vec![
            ("q".to_string(), "a".to_string()),
            ("q".to_string(), "b".to_string()),
            ("q".to_string(), "c".to_string()),
        ]
    );
    assert!((result.average_score - 0.2).abs() < 1e-12);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body["text_1"], json!("q"));
    assert_eq!(requests[0].body["text_2"], json!(["a", "b", "c"]));
}

#[tokio::test]
async fn test_elementwise_batch_sends_query_list() {
    let server = ScoreServer::spawn(ScoreResponder::Indexed).await;
    let client = online_client(&server);

    let result = client
        .score_batch(strings(&["q1", "q2"]), &strings(&["a", "b"]))
        .await
        .unwrap();

    assert_eq!(result.scores.len(), 2);

    let requests = server.requests();
    assert_eq!(requests[0].body["text_1"], json!(["q1", "q2"]));
}

#[tokio::test]
async fn test_missing_score_field_defaults_to_zero() {
    let server =
        ScoreServer::spawn_fixed(200, json!({"data": [{}, {"score": 0.9}]})).await;
    let client = online_client(&server);

    let result = client
        .score_batch("q", &strings(&["a", "b"]))
        .await
        .unwrap();

    assert_eq!(result.scores, vec![0.0, 0.9]);
}

#[tokio::test]
async fn test_score_count_mismatch_is_error() {
    let server = ScoreServer::spawn_fixed(200, json!({"data": [{"score": 0.1}]})).await;
    let client = online_client(&server);

    let err = client
        .score_batch("q", &strings(&["a", "b"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Backend(BackendError::MalformedResponse { .. })
    ));
}

#[tokio::test]
async fn test_ranking_over_online_backend() {
    let server = ScoreServer::spawn(ScoreResponder::Indexed).await;
    let engine = RankingEngine::new(online_client(&server));

    let ranked = engine
        .rank_documents("q", &strings(&["a", "b", "c"]), None)
        .await
        .unwrap();

    // Indexed responder scores later candidates higher.
    assert_eq!(ranked[0].document, "c");
    assert_eq!(ranked[0].rank, 1);
    assert_eq!(ranked[2].document, "a");
    assert_eq!(ranked[2].original_index, 0);
}

#[tokio::test]
async fn test_config_assembles_working_online_client() {
    let server = ScoreServer::spawn_fixed(200, json!({"data": [{"score": 0.7}]})).await;

    let config = Config {
        server_url: Some(server.base_url.clone()),
        api_key: Some("from-config".to_string()),
        ..Default::default()
    };

    let client = config.build_client().unwrap();
    let result = client.score_pair("x", "y").await.unwrap();

    assert_eq!(result.score, 0.7);

    let requests = server.requests();
    assert_eq!(
        requests[0].headers.get("x-api-key").map(String::as_str),
        Some("from-config")
    );
}
