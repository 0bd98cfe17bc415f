// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Handler tests for POST /api/generate

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use diffusion_gateway::api::{generate_handler, ApiError, GenerateRequest};
use diffusion_gateway::upstream::ArtifactKind;

use super::helpers::{gateway_state, spawn_fake_upstream};

fn request(prompt: &str) -> GenerateRequest {
    serde_json::from_value(serde_json::json!({ "prompt": prompt })).unwrap()
}

#[tokio::test]
async fn empty_prompt_rejected_without_upstream_call() {
    let fake = spawn_fake_upstream(200, "application/json", r#"{"image_base64":"Zm9v"}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let state = gateway_state(&fake.base_url, dir.path());

    let result = generate_handler(State(state), Json(request("  "))).await;
    let err = result.err().expect("expected validation error");
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(fake.hit_count(), 0);
}

#[tokio::test]
async fn inline_payload_is_materialized_and_recorded() {
    let payload = BASE64.encode(b"hello png bytes");
    let body = serde_json::json!({ "image_base64": payload }).to_string();
    let fake = spawn_fake_upstream(200, "application/json", &body).await;
    let dir = tempfile::tempdir().unwrap();
    let state = gateway_state(&fake.base_url, dir.path());

    let response = generate_handler(State(state.clone()), Json(request("a misty forest")))
        .await
        .unwrap();
    assert!(response.output_url.starts_with("/outputs/gen_"));
    assert_eq!(response.kind, ArtifactKind::Image);
    assert_eq!(fake.hit_count(), 1);

    // the served file holds the decoded upstream bytes
    let filename = response.output_url.strip_prefix("/outputs/").unwrap();
    let written = tokio::fs::read(dir.path().join(filename)).await.unwrap();
    assert_eq!(written, b"hello png bytes");

    // and history gained exactly one entry, most recent first
    let history = state.history.read().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history.list().next().unwrap().url, response.output_url);
}

#[tokio::test]
async fn hosted_url_passes_through_unmaterialized() {
    let fake = spawn_fake_upstream(
        200,
        "application/json",
        r#"{"outputUrl": "https://cdn.example/out.png", "type": "image"}"#,
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let state = gateway_state(&fake.base_url, dir.path());

    let response = generate_handler(State(state), Json(request("a cat")))
        .await
        .unwrap();
    assert_eq!(response.output_url, "https://cdn.example/out.png");

    // nothing was written locally
    let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn html_error_page_maps_to_bad_gateway() {
    let fake = spawn_fake_upstream(
        502,
        "text/html",
        "<!DOCTYPE html><html><body>Bad Gateway</body></html>",
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let state = gateway_state(&fake.base_url, dir.path());

    let err = generate_handler(State(state), Json(request("a cat")))
        .await
        .err()
        .expect("expected upstream error");
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    assert!(matches!(err, ApiError::UpstreamHtml { status: 502 }));
}

#[tokio::test]
async fn structured_upstream_message_surfaced_verbatim() {
    let fake = spawn_fake_upstream(
        500,
        "application/json",
        r#"{"message": "model not loaded"}"#,
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let state = gateway_state(&fake.base_url, dir.path());

    let err = generate_handler(State(state), Json(request("a cat")))
        .await
        .err()
        .expect("expected upstream error");
    assert_eq!(err.to_response().message, "model not loaded");
}

#[tokio::test]
async fn successful_json_without_image_is_missing_artifact() {
    let fake = spawn_fake_upstream(200, "application/json", r#"{"ok": true}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let state = gateway_state(&fake.base_url, dir.path());

    let err = generate_handler(State(state), Json(request("a cat")))
        .await
        .err()
        .expect("expected missing artifact");
    assert!(matches!(err, ApiError::MissingArtifact));
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
}
