use querygpt_core::{HealthStatus, LlmConfig, LlmProvider, UserId};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::gateway::LlmGateway;

fn config_for(server: &MockServer) -> LlmConfig {
    LlmConfig {
        api_key: Some("sk-test".to_owned()),
        base_url: server.uri(),
        timeout_secs: 5,
        ..LlmConfig::default()
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn answers_with_trimmed_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  You need a visa.\n")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = LlmGateway::new(&config_for(&server));
    let user = UserId::from("user_1");
    let outcome = gateway.get_answer("Do I need a visa for Japan?", Some(&user), None).await;

    assert!(outcome.is_successful);
    assert_eq!(outcome.answer, "You need a visa.");
    assert_eq!(outcome.provider, "deepseek");
    assert!(outcome.error_message.is_none());
    assert!(outcome.response_time_ms >= 0);
}

#[tokio::test]
async fn sends_system_prompt_and_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&server)
        .await;

    let gateway = LlmGateway::new(&config_for(&server));
    gateway.get_answer("Passport rules?", None, Some("openai")).await;

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "deepseek-chat");
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], crate::SYSTEM_PROMPT);
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "Passport rules?");
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let gateway = LlmGateway::new(&config_for(&server));
    let outcome = gateway.get_answer("q", None, None).await;

    assert!(!outcome.is_successful);
    assert!(outcome.answer.is_empty());
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("Authentication failed. Please check your DeepSeek API key configuration.")
    );
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limit_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let gateway = LlmGateway::new(&config_for(&server));
    let outcome = gateway.get_answer("q", None, None).await;

    assert!(!outcome.is_successful);
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("Rate limit exceeded or quota exhausted. Please try again later.")
    );
}

#[tokio::test]
async fn empty_choices_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let gateway = LlmGateway::new(&config_for(&server));
    let outcome = gateway.get_answer("q", None, None).await;

    assert!(!outcome.is_successful);
    assert_eq!(outcome.error_message.as_deref(), Some("No choices in response from DeepSeek API"));
}

#[tokio::test]
async fn blank_content_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("   ")))
        .mount(&server)
        .await;

    let gateway = LlmGateway::new(&config_for(&server));
    let outcome = gateway.get_answer("q", None, None).await;

    assert!(!outcome.is_successful);
    assert_eq!(outcome.error_message.as_deref(), Some("Empty response from DeepSeek API"));
}

#[tokio::test]
async fn missing_key_fails_without_network_and_reports_unhealthy() {
    let gateway = LlmGateway::new(&LlmConfig::default());

    let outcome = gateway.get_answer("q", None, None).await;
    assert!(!outcome.is_successful);
    assert_eq!(outcome.error_message.as_deref(), Some("DeepSeek API key not configured"));

    let health = gateway.health_check();
    assert_eq!(health.status, HealthStatus::Unhealthy);
    assert!(!health.api_configured);
    assert_eq!(health.provider, "deepseek");
    assert!(health.error.is_some());
}

#[tokio::test]
async fn unimplemented_provider_fails_immediately() {
    let config = LlmConfig {
        provider: LlmProvider::Anthropic,
        api_key: Some("sk-test".to_owned()),
        ..LlmConfig::default()
    };
    let gateway = LlmGateway::new(&config);

    let outcome = gateway.get_answer("q", None, None).await;
    assert!(!outcome.is_successful);
    assert_eq!(outcome.provider, "anthropic");
    assert_eq!(outcome.error_message.as_deref(), Some("Anthropic integration not implemented"));
    assert_eq!(gateway.health_check().status, HealthStatus::Unhealthy);
}

#[test]
fn configured_gateway_reports_healthy() {
    let config = LlmConfig { api_key: Some("sk-test".to_owned()), ..LlmConfig::default() };
    let health = LlmGateway::new(&config).health_check();

    assert_eq!(health.status, HealthStatus::Healthy);
    assert!(health.api_configured);
    assert!(health.error.is_none());
    assert!(health.timestamp > 0.0);

    let json = serde_json::to_value(&health).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("error").is_none());
}
