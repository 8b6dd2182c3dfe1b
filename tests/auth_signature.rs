//! End-to-end tests for the signature (in-process) verification
//! deployment.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};

mod common;

const SECRET: &str = "integration-secret";

fn ocr_body() -> Value {
    json!({ "image": BASE64.encode(b"image-bytes") })
}

#[tokio::test]
async fn test_local_request_passes_without_credentials() {
    // require_local defaults to false: loopback callers are not gated.
    let addr = common::spawn_gateway(common::signature_config(Some(SECRET))).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/ocr"))
        .json(&ocr_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["text"], common::FAKE_ENGINE_TEXT);
}

#[tokio::test]
async fn test_remote_request_without_header_is_401() {
    let addr = common::spawn_gateway(common::signature_config(Some(SECRET))).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/ocr"))
        .header("X-Forwarded-For", "8.8.8.8")
        .json(&ocr_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Authorization header is missing.");
}

#[tokio::test]
async fn test_remote_request_with_valid_token_passes() {
    let addr = common::spawn_gateway(common::signature_config(Some(SECRET))).await;
    let token = common::sign_token(SECRET, 60);

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/ocr"))
        .header("X-Forwarded-For", "8.8.8.8")
        .bearer_auth(&token)
        .json(&ocr_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["text"], common::FAKE_ENGINE_TEXT);
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let addr = common::spawn_gateway(common::signature_config(Some(SECRET))).await;
    let token = common::sign_token(SECRET, -60);

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/ocr"))
        .header("X-Forwarded-For", "8.8.8.8")
        .bearer_auth(&token)
        .json(&ocr_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Token has expired.");
}

#[tokio::test]
async fn test_wrong_secret_is_403_with_detail() {
    let addr = common::spawn_gateway(common::signature_config(Some(SECRET))).await;
    let token = common::sign_token("a-different-secret", 60);

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/ocr"))
        .header("X-Forwarded-For", "8.8.8.8")
        .bearer_auth(&token)
        .json(&ocr_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 403);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid token.");
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_malformed_scheme_is_401() {
    let addr = common::spawn_gateway(common::signature_config(Some(SECRET))).await;

    let res = reqwest::Client::new()
        .post(format!("http://{addr}/ocr"))
        .header("X-Forwarded-For", "8.8.8.8")
        .header("Authorization", "Basic xyz")
        .json(&ocr_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Invalid Authorization header format. Expected 'Bearer <token>'."
    );
}

#[tokio::test]
async fn test_missing_secret_surfaces_when_gated() {
    // No secret configured: the server still starts, local traffic
    // still works, and the error appears only on a gated request.
    let addr = common::spawn_gateway(common::signature_config(None)).await;
    let client = reqwest::Client::new();

    let local = client
        .post(format!("http://{addr}/ocr"))
        .json(&ocr_body())
        .send()
        .await
        .unwrap();
    assert_eq!(local.status(), 200);

    let gated = client
        .post(format!("http://{addr}/ocr"))
        .header("X-Forwarded-For", "8.8.8.8")
        .bearer_auth("anything")
        .json(&ocr_body())
        .send()
        .await
        .unwrap();
    assert_eq!(gated.status(), 500);
    let body: Value = gated.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Server configuration error:"));
}

#[tokio::test]
async fn test_options_preflight_bypasses_the_gate() {
    let addr = common::spawn_gateway(common::signature_config(Some(SECRET))).await;

    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("http://{addr}/ocr"))
        .header("X-Forwarded-For", "8.8.8.8")
        .send()
        .await
        .unwrap();

    // The probe reaches the router (which has no OPTIONS route) instead
    // of being rejected by the gate.
    assert_eq!(res.status(), 405);
}

#[tokio::test]
async fn test_valid_token_is_reusable_within_its_window() {
    let addr = common::spawn_gateway(common::signature_config(Some(SECRET))).await;
    let token = common::sign_token(SECRET, 60);
    let client = reqwest::Client::new();

    for _ in 0..2 {
        let res = client
            .post(format!("http://{addr}/ocr"))
            .header("X-Forwarded-For", "8.8.8.8")
            .bearer_auth(&token)
            .json(&ocr_body())
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }
}

#[tokio::test]
async fn test_require_local_gates_loopback_callers() {
    let mut config = common::signature_config(Some(SECRET));
    config.auth.require_local = true;
    let addr = common::spawn_gateway(config).await;
    let client = reqwest::Client::new();

    let denied = client
        .post(format!("http://{addr}/ocr"))
        .json(&ocr_body())
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), 401);

    let allowed = client
        .post(format!("http://{addr}/ocr"))
        .bearer_auth(common::sign_token(SECRET, 60))
        .json(&ocr_body())
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);
}
