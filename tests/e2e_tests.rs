//! End-to-end HTTP tests against a live server with mock providers.

mod common;

use common::{ARTICLE_URL, scripted_model, spawn_test_server};
use credence::MockLanguageModel;
use credence::constants::{MODEL_FAILURE_VERDICT, NO_CLAIMS_MESSAGE};

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let server = spawn_test_server(scripted_model()).await;

    let res = client().get(server.url("/healthz")).send().await.unwrap();
    assert!(res.status().is_success());
    assert_eq!(res.headers()["x-credence-status"], "healthy");
}

#[tokio::test]
async fn test_verify_article_end_to_end() {
    let server = spawn_test_server(scripted_model()).await;

    let res = client()
        .get(server.url("/verify"))
        .query(&[("url", ARTICLE_URL)])
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["article_url"], ARTICLE_URL);
    assert_eq!(body["extracted_claims"].as_array().unwrap().len(), 2);

    let results = body["verification_results"].as_object().unwrap();
    assert_eq!(
        results["The agency published a study on Tuesday."],
        "Misinformation Score: 5/100 - checked against evidence"
    );
    // One search per claim, two evidence pages per search.
    assert_eq!(server.search.calls(), 2);
    assert_eq!(server.fetcher.calls(), 1 + 2 * 2);
}

#[tokio::test]
async fn test_repeated_text_is_served_from_cache() {
    let server = spawn_test_server(scripted_model()).await;
    let body = serde_json::json!({ "text": "The agency published a study." });

    let model_calls_before = server.model.calls();
    let first: serde_json::Value = client()
        .post(server.url("/verify"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let after_first = server.model.calls();
    let searches_after_first = server.search.calls();

    let second: serde_json::Value = client()
        .post(server.url("/verify"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(after_first > model_calls_before);
    // Only the article's own claim extraction runs again.
    assert_eq!(server.model.calls(), after_first + 1);
    assert_eq!(server.search.calls(), searches_after_first);
    assert_eq!(first["verification_results"], second["verification_results"]);
}

#[tokio::test]
async fn test_model_outage_returns_sentinel_verdicts() {
    let server = spawn_test_server(MockLanguageModel::new(|prompt| {
        if prompt.starts_with("Claim:") {
            Err(credence::ProviderError::model("quota exhausted"))
        } else {
            Ok("Only claim.".to_string())
        }
    }))
    .await;

    let body: serde_json::Value = client()
        .post(server.url("/verify"))
        .json(&serde_json::json!({ "text": "anything" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["verification_results"]["Only claim."], MODEL_FAILURE_VERDICT);
}

#[tokio::test]
async fn test_empty_text_reports_no_claims() {
    let server = spawn_test_server(scripted_model()).await;

    let body: serde_json::Value = client()
        .post(server.url("/verify"))
        .json(&serde_json::json!({ "text": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, serde_json::json!({ "error": NO_CLAIMS_MESSAGE }));
    assert_eq!(server.model.calls(), 0);
    assert_eq!(server.search.calls(), 0);
}

#[tokio::test]
async fn test_score_and_check_news() {
    let server = spawn_test_server(scripted_model()).await;

    let score: serde_json::Value = client()
        .post(server.url("/score"))
        .json(&serde_json::json!({ "url": ARTICLE_URL }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(score["title"], "Health Agency Publishes Study");
    assert_eq!(score["domain"], "local.news");
    assert_eq!(score["source_reliability_score"], 1.0);

    let check: serde_json::Value = client()
        .get(server.url("/check_news"))
        .query(&[("url", "https://conspiracy.example/story")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(check["is_reliable"], false);
    assert_eq!(check["media_details"]["MBFC Fact"], "Very Low");
    assert_eq!(check["social_media_stats"]["reddit_mentions"], 12);
    assert_eq!(server.social.urls(), vec!["https://conspiracy.example/story".to_string()]);
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let server = spawn_test_server(scripted_model()).await;

    let res = client()
        .post(server.url("/score"))
        .json(&serde_json::json!({ "url": "not a url" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(res.headers()["x-credence-status"], "invalid_request");
}
