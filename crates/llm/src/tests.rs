use crate::client::truncate;
use crate::error::{LlmError, LlmErrorKind, classify_message};

#[test]
fn test_truncate_within_limit() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exceeds_limit() {
    assert_eq!(truncate("hello world", 5), "hello");
}

#[test]
fn test_truncate_unicode_boundary() {
    let s = "привет";
    let result = truncate(s, 5);
    assert_eq!(result, "пр");
}

#[test]
fn test_classify_by_substring() {
    assert_eq!(classify_message("401 Unauthorized"), LlmErrorKind::Authentication);
    assert_eq!(classify_message("Authentication Fails"), LlmErrorKind::Authentication);
    assert_eq!(classify_message("You exceeded your QUOTA"), LlmErrorKind::RateLimit);
    assert_eq!(classify_message("rate limit reached"), LlmErrorKind::RateLimit);
    assert_eq!(classify_message("operation timed out"), LlmErrorKind::Timeout);
    assert_eq!(classify_message("connection reset by peer"), LlmErrorKind::Network);
    assert_eq!(classify_message("model overloaded"), LlmErrorKind::Other);
}

#[test]
fn test_status_codes_take_precedence() {
    let err = LlmError::HttpStatus { code: 429, body: "authentication".to_owned() };
    assert_eq!(err.kind(), LlmErrorKind::RateLimit);
    let err = LlmError::HttpStatus { code: 403, body: String::new() };
    assert_eq!(err.kind(), LlmErrorKind::Authentication);
    let err = LlmError::HttpStatus { code: 504, body: String::new() };
    assert_eq!(err.kind(), LlmErrorKind::Timeout);
}

#[test]
fn test_user_messages() {
    let auth = LlmError::HttpStatus { code: 401, body: String::new() };
    assert_eq!(
        auth.user_message("DeepSeek"),
        "Authentication failed. Please check your DeepSeek API key configuration."
    );
    let limited = LlmError::HttpStatus { code: 402, body: "Insufficient Balance".to_owned() };
    assert_eq!(
        limited.user_message("DeepSeek"),
        "Rate limit exceeded or quota exhausted. Please try again later."
    );
    assert_eq!(
        LlmError::EmptyResponse.user_message("DeepSeek"),
        "No choices in response from DeepSeek API"
    );
    assert_eq!(LlmError::EmptyAnswer.user_message("DeepSeek"), "Empty response from DeepSeek API");

    let other = LlmError::HttpStatus { code: 500, body: "boom".to_owned() };
    assert_eq!(other.user_message("DeepSeek"), "DeepSeek API error: HTTP status 500: boom");
}
