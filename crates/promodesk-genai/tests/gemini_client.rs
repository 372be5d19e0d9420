//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use promodesk_genai::{
    generate_marketing_content, GeminiClient, GenAiError, MarketingContentInput, TextGenerator,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", "test-model", 30, base_url)
        .expect("client construction should not fail")
}

fn candidate(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] } }
        ]
    })
}

#[tokio::test]
async fn generate_sends_key_and_json_mime_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": { "responseMimeType": "application/json" },
            "contents": [ { "role": "user", "parts": [ { "text": "hello" } ] } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{\"ok\":true}")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let text = client.generate("hello").await.expect("should return text");

    assert_eq!(text, "{\"ok\":true}");
}

#[tokio::test]
async fn non_success_status_maps_to_backend_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate("hello")
        .await
        .unwrap_err();

    match err {
        GenAiError::Backend { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected Backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_candidates_map_to_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate("hello")
        .await
        .unwrap_err();
    assert!(matches!(err, GenAiError::EmptyResponse), "got: {err:?}");
}

#[tokio::test]
async fn malformed_envelope_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .generate("hello")
        .await
        .unwrap_err();
    assert!(matches!(err, GenAiError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn marketing_flow_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(
            r#"{"headline":"Smart Home, Simplified","body":"Control every outlet from your phone.","callToAction":"Shop the plug"}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let input = MarketingContentInput {
        product_name: "NovaHome Smart Plug".to_string(),
        product_description:
            "Wi-Fi smart plug with energy monitoring, schedules, and voice assistant support."
                .to_string(),
        target_audience: "Homeowners new to smart devices".to_string(),
        key_features: "Energy monitoring, schedules, voice control".to_string(),
        tone: "Friendly".to_string(),
    };

    let client = test_client(&server.uri());
    let content = generate_marketing_content(&client, &input)
        .await
        .expect("flow should succeed");

    assert_eq!(content.headline, "Smart Home, Simplified");
    assert_eq!(content.call_to_action, "Shop the plug");
}

#[tokio::test]
async fn invalid_flow_input_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("{}")))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = generate_marketing_content(&client, &MarketingContentInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GenAiError::InvalidInput(_)));
}
