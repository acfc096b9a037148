//! Mock API tests for the Gemini client
//!
//! These tests use wiremock to simulate the `generateContent` endpoint.
//! Response formats follow https://ai.google.dev/api/generate-content

use artifact_lens::prelude::*;
use base64::Engine as _;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::JPEG_BYTES;

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn create_generate_content_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }
        ],
        "usageMetadata": {
            "promptTokenCount": 270,
            "candidatesTokenCount": 412,
            "totalTokenCount": 682
        },
        "modelVersion": "gemini-2.5-flash",
        "responseId": "resp_abc123"
    })
}

fn create_error_response(code: u16, message: &str, status: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "status": status
        }
    })
}

fn client_for(server: &MockServer, key: &str) -> GeminiClient {
    let config = AppConfig::default()
        .with_api_key(key)
        .with_gemini_base_url(format!("{}/v1beta", server.uri()));
    GeminiClient::from_app_config(&config).unwrap()
}

fn statue_request(text: &str) -> DescriptionRequest {
    let upload = Upload::new("statue.jpg", "image/jpeg", JPEG_BYTES.to_vec());
    DescriptionRequest::artifact(text, package_upload(Some(&upload)).unwrap())
}

#[tokio::test]
async fn test_gemini_describe_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(create_generate_content_response("A Greek kouros statue.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "test-api-key");
    let description = client.describe(statue_request("")).await.unwrap();

    assert_eq!(description.text, "A Greek kouros statue.");
    assert_eq!(description.model_version.as_deref(), Some("gemini-2.5-flash"));
}

#[tokio::test]
async fn test_gemini_request_body_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_generate_content_response("ok")),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "test-api-key");
    client
        .describe(statue_request("Is this Roman?"))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = requests[0].body_json().unwrap();

    let expected_data = base64::engine::general_purpose::STANDARD.encode(JPEG_BYTES);
    assert_eq!(
        body,
        json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": "Is this Roman?" },
                    { "inlineData": { "mimeType": "image/jpeg", "data": expected_data } },
                    { "text": SYSTEM_PROMPT }
                ]
            }]
        })
    );
}

#[tokio::test]
async fn test_gemini_empty_user_text_keeps_image_then_prompt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(create_generate_content_response("ok")),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "test-api-key");
    client.describe(statue_request("")).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(parts[1]["text"], SYSTEM_PROMPT);
}

#[tokio::test]
async fn test_gemini_auth_error_message_is_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(create_error_response(
            400,
            "invalid API key",
            "INVALID_ARGUMENT",
        )))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "invalid-key");
    let err = client.describe(statue_request("")).await.unwrap_err();

    assert_eq!(err.user_message(), "invalid API key");
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_gemini_unauthenticated_maps_to_authentication() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(create_error_response(
            401,
            "API key not valid. Please pass a valid API key.",
            "UNAUTHENTICATED",
        )))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "invalid-key");
    let err = client.describe(statue_request("")).await.unwrap_err();

    assert!(matches!(err, ArtifactError::Authentication(_)));
    assert_eq!(err.category(), ErrorCategory::Upstream);
}

#[tokio::test]
async fn test_gemini_quota_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(create_error_response(
            429,
            "Resource has been exhausted (e.g. check quota).",
            "RESOURCE_EXHAUSTED",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "test-api-key");
    let err = client.describe(statue_request("")).await.unwrap_err();

    assert!(matches!(err, ArtifactError::RateLimit(_)));
}

#[tokio::test]
async fn test_gemini_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "test-api-key");
    let err = client.describe(statue_request("")).await.unwrap_err();

    assert!(matches!(err, ArtifactError::Parse(_)));
}

#[tokio::test]
async fn test_gemini_blocked_prompt_is_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" },
            "usageMetadata": { "promptTokenCount": 12, "totalTokenCount": 12 }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "test-api-key");
    let err = client.describe(statue_request("")).await.unwrap_err();

    assert!(matches!(err, ArtifactError::EmptyResponse(_)));
    assert!(err.user_message().contains("SAFETY"));
}
