//! Integration tests for the competition endpoints
//!
//! Tests: bearer passcodes, guess submission, scoring, bonus

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::*;

#[tokio::test]
async fn test_guess_requires_passcode() {
    let app = TestApp::new().await;

    let response = app.get("/guess").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response_json(response).await["error"], "UNAUTHORIZED");

    let response = app.authed(Method::GET, "/guess", "wrong", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_blank_bearer_is_forbidden() {
    let app = TestApp::new().await;

    let response = app.authed(Method::GET, "/guess", "", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response_json(response).await["error"], "FORBIDDEN");

    let response = app.get_with("/guess", &[("Authorization", "")]).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_no_guesses_is_no_content() {
    let app = TestApp::new().await;
    let response = app.authed(Method::GET, "/guess", RED_PASSCODE, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_submit_json_guess_scores_after_beta() {
    let app = TestApp::new().await;
    let response = app
        .authed(Method::POST, "/guess", RED_PASSCODE, Some(json!({"bots": [2, "1"]})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["timestamp"], DETECTION_NOW);
    assert_eq!(body["guesses"], json!([2, 1]));
    assert_eq!(body["scores"]["2"], 1.0);
    assert_eq!(body["scores"]["1"], -0.25);
}

#[tokio::test]
async fn test_submit_form_guess() {
    let app = TestApp::new().await;
    let response = app.form(Method::PUT, "/guess", RED_PASSCODE, "bots=2&bots=3").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["guesses"], json!([2, 3]));
}

#[tokio::test]
async fn test_submit_empty_guess() {
    let app = TestApp::new().await;

    let response = app
        .authed(Method::POST, "/guess", RED_PASSCODE, Some(json!({"bots": []})))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.form(Method::POST, "/guess", RED_PASSCODE, "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.form(Method::POST, "/guess", RED_PASSCODE, "bots=bob").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scores_hidden_during_beta() {
    let app = TestApp::new().await;
    app.clock.set(BETA_START + DAY);

    let response = app
        .authed(Method::POST, "/guess", RED_PASSCODE, Some(json!({"bots": [2]})))
        .await;
    assert_eq!(response_json(response).await["scores"]["2"], -0.25);

    app.clock.set(DETECTION_NOW);
    let body = response_json(app.authed(Method::GET, "/guess", RED_PASSCODE, None).await).await;
    assert_eq!(body[0]["scores"]["2"], 1.0);
}

#[tokio::test]
async fn test_guesses_are_per_team() {
    let app = TestApp::new().await;
    let response = app
        .authed(Method::POST, "/guess", RED_PASSCODE, Some(json!({"bots": [1]})))
        .await;
    let guess_id = response_json(response).await["guess_id"].as_i64().unwrap();
    let uri = format!("/guess/{}", guess_id);

    let response = app.authed(Method::GET, &uri, RED_PASSCODE, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["guess_id"], guess_id);

    let response = app.authed(Method::GET, &uri, BLUE_PASSCODE, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.authed(Method::GET, "/guess", BLUE_PASSCODE, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_guessing_closes_after_detection() {
    let app = TestApp::new().await;
    app.clock.set(DETECTION_END);

    let response = app
        .authed(Method::POST, "/guess", RED_PASSCODE, Some(json!({"bots": [2]})))
        .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response_json(response).await["error"], "GUESSING_CLOSED");
}

#[tokio::test]
async fn test_score_bonus() {
    let app = TestApp::new().await;

    let body = response_json(app.authed(Method::GET, "/score", RED_PASSCODE, None).await).await;
    assert_eq!(body, json!({"finished": false, "bonus": 0}));

    app.authed(Method::POST, "/guess", RED_PASSCODE, Some(json!({"bots": [2]})))
        .await;

    // 17.96 days left: ceil to 18, minus one
    let body = response_json(app.authed(Method::GET, "/score", RED_PASSCODE, None).await).await;
    assert_eq!(body, json!({"finished": true, "bonus": 17}));
}
