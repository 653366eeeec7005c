//! API key submission against a scripted backend.

mod common;

use common::ScriptedBackend;
use finsight::settings::{Notice, NoticeKind, submit_api_key, validate_api_key};
use serde_json::json;

#[tokio::test]
async fn blank_key_never_reaches_backend() {
    let err = validate_api_key("   ").unwrap_err();
    let notice = Notice::from(err);
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, "Missing API Key");
    assert_eq!(notice.description, "Please enter your API key before submitting.");
}

#[tokio::test]
async fn success_uses_backend_status_text() {
    let backend = ScriptedBackend {
        api_key: Some(Ok(json!({"status": "Gemini key registered"}))),
        ..ScriptedBackend::default()
    };
    let key = validate_api_key("  sk-test-123  ").unwrap();
    assert_eq!(key, "sk-test-123");

    let notice = submit_api_key(&backend, key).await;
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.title, "API Key Loaded");
    assert_eq!(notice.description, "Gemini key registered");
}

#[tokio::test]
async fn success_without_status_uses_default_text() {
    let backend = ScriptedBackend {
        api_key: Some(Ok(json!({}))),
        ..ScriptedBackend::default()
    };
    let notice = submit_api_key(&backend, "sk-test").await;
    assert_eq!(notice.description, "API key loaded successfully!");
}

#[tokio::test]
async fn rejection_surfaces_backend_detail() {
    let backend = ScriptedBackend {
        api_key: Some(Err((400, Some("Invalid API key".to_string())))),
        ..ScriptedBackend::default()
    };
    let notice = submit_api_key(&backend, "bad").await;
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, "Failed to Load API Key");
    assert_eq!(notice.description, "Invalid API key");
}

#[tokio::test]
async fn unreachable_backend_uses_generic_text() {
    let backend = ScriptedBackend::failing();
    let notice = submit_api_key(&backend, "sk-test").await;
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.description, "Could not connect to backend.");
}
