mod common;

use bfhl_service::services::dispatcher::one_word_prompt;
use bfhl_service::services::providers::mock::MockTextProvider;
use async_trait::async_trait;
use bfhl_service::services::providers::{ProviderError, ProviderResponse, TextProvider};
use common::{TestApp, TEST_EMAIL};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

const SLOW_REPLY_DELAY: Duration = Duration::from_secs(3);

/// Answers only after `SLOW_REPLY_DELAY`, like a sluggish upstream.
struct SlowTextProvider;

#[async_trait]
impl TextProvider for SlowTextProvider {
    async fn generate(&self, _prompt: &str) -> Result<ProviderResponse, ProviderError> {
        tokio::time::sleep(SLOW_REPLY_DELAY).await;
        Ok(ProviderResponse {
            text: "Late".to_string(),
            input_tokens: 0,
            output_tokens: 0,
        })
    }

    fn name(&self) -> &'static str {
        "slow"
    }

    fn is_configured(&self) -> bool {
        true
    }
}

async fn assert_rejected(app: &TestApp, body: Value) {
    let response = app.post_bfhl(body.clone()).await;
    assert_eq!(response.status().as_u16(), 400, "{} should be rejected", body);

    let envelope: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        envelope,
        json!({"is_success": false, "official_email": TEST_EMAIL, "data": null}),
        "{} should yield the error envelope",
        body
    );
}

async fn success_data(app: &TestApp, body: Value) -> Value {
    let response = app.post_bfhl(body.clone()).await;
    assert_eq!(response.status().as_u16(), 200, "{} should succeed", body);

    let envelope: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(envelope["is_success"], true);
    assert_eq!(envelope["official_email"], TEST_EMAIL);
    envelope["data"].clone()
}

#[tokio::test]
async fn prime_filters_in_order() {
    let app = TestApp::spawn().await;

    let response = app.post_bfhl(json!({"prime": [2, 3, 4, 5, 9]})).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({"is_success": true, "official_email": TEST_EMAIL, "data": [2, 3, 5]})
    );

    assert_eq!(success_data(&app, json!({"prime": []})).await, json!([]));
    assert_eq!(
        success_data(&app, json!({"prime": [-3, 0, 1, 17, 15, 2]})).await,
        json!([17, 2])
    );
}

#[tokio::test]
async fn fibonacci_returns_first_n_terms() {
    let app = TestApp::spawn().await;

    assert_eq!(
        success_data(&app, json!({"fibonacci": 7})).await,
        json!([0, 1, 1, 2, 3, 5, 8])
    );
    assert_eq!(success_data(&app, json!({"fibonacci": 0})).await, json!([]));
    assert_eq!(success_data(&app, json!({"fibonacci": 1})).await, json!([0]));
}

#[tokio::test]
async fn lcm_and_hcf() {
    let app = TestApp::spawn().await;

    assert_eq!(success_data(&app, json!({"lcm": [4, 6]})).await, json!(12));
    assert_eq!(success_data(&app, json!({"lcm": [2, 3, 5]})).await, json!(30));
    assert_eq!(success_data(&app, json!({"hcf": [8, 12]})).await, json!(4));
    assert_eq!(success_data(&app, json!({"hcf": [24, 36, 60]})).await, json!(12));
}

#[tokio::test]
async fn invalid_envelopes_are_rejected() {
    let app = TestApp::spawn().await;

    for body in [
        json!({}),
        json!({"fibonacci": 5, "prime": [2]}),
        json!({"factorial": 5}),
        json!([1, 2, 3]),
        json!(null),
    ] {
        assert_rejected(&app, body).await;
    }
}

#[tokio::test]
async fn invalid_values_are_rejected() {
    let app = TestApp::spawn().await;

    for body in [
        json!({"fibonacci": [1, 2]}),
        json!({"fibonacci": "10"}),
        json!({"fibonacci": -1}),
        json!({"fibonacci": 2.5}),
        json!({"fibonacci": 1000}),
        json!({"prime": "2,3"}),
        json!({"prime": [2, null]}),
        json!({"lcm": []}),
        json!({"lcm": [0, 0]}),
        json!({"hcf": []}),
        json!({"hcf": 12}),
        json!({"AI": 7}),
    ] {
        assert_rejected(&app, body).await;
    }
}

#[tokio::test]
async fn malformed_json_is_rejected_with_envelope() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/bfhl", app.address))
        .header("content-type", "application/json")
        .body("{\"prime\": [2, 3")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["is_success"], false);
    assert_eq!(body["data"], Value::Null);

    let response = app
        .client
        .post(format!("{}/bfhl", app.address))
        .body("{\"prime\": [2, 3]}")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn ai_returns_single_word() {
    let provider = Arc::new(MockTextProvider::replying("Mumbai\n"));
    let app = TestApp::spawn_with_provider(provider.clone()).await;

    assert_eq!(
        success_data(
            &app,
            json!({"AI": "What is the capital city of Maharashtra?"})
        )
        .await,
        json!("Mumbai")
    );
    assert_eq!(
        provider.prompts(),
        vec![one_word_prompt("What is the capital city of Maharashtra?")]
    );
}

#[tokio::test]
async fn ai_upstream_failure_is_rejected() {
    let provider = Arc::new(MockTextProvider::failing(ProviderError::ApiError(
        "Gemini API error 500".to_string(),
    )));
    let app = TestApp::spawn_with_provider(provider).await;

    assert_rejected(&app, json!({"AI": "What is the capital of France?"})).await;
}

#[tokio::test]
async fn ai_without_key_is_rejected_but_math_still_works() {
    let app = TestApp::spawn_without_ai_key(Some(TEST_EMAIL)).await;

    assert_rejected(&app, json!({"AI": "What is the capital of France?"})).await;
    assert_eq!(success_data(&app, json!({"hcf": [8, 12]})).await, json!(4));
}

#[tokio::test]
async fn slow_ai_call_does_not_stall_other_requests() {
    let app = TestApp::spawn_with_provider(Arc::new(SlowTextProvider)).await;

    let client = app.client.clone();
    let url = format!("{}/bfhl", app.address);
    let ai_request = tokio::spawn(async move {
        client
            .post(url)
            .json(&json!({"AI": "What is the capital of France?"}))
            .send()
            .await
            .expect("Failed to execute request")
    });

    // Let the AI request reach the provider before timing the next one.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let start = Instant::now();
    assert_eq!(
        success_data(&app, json!({"fibonacci": 10})).await,
        json!([0, 1, 1, 2, 3, 5, 8, 13, 21, 34])
    );
    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_secs(1),
        "fibonacci waited {:?} behind the AI call",
        elapsed
    );
    assert!(!ai_request.is_finished(), "AI call finished before its delay");

    let response = ai_request.await.expect("AI request task panicked");
    assert_eq!(response.status().as_u16(), 200);
    let envelope: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(envelope["data"], "Late");
}
