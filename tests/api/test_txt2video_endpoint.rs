// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Handler tests for POST /api/txt2video (stub backend)

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use diffusion_gateway::api::{txt2video_handler, AppState, Txt2VideoRequest};
use diffusion_gateway::upstream::ArtifactKind;

fn request(prompt: &str) -> Txt2VideoRequest {
    serde_json::from_value(serde_json::json!({ "prompt": prompt })).unwrap()
}

#[tokio::test]
async fn empty_prompt_rejected() {
    let state = AppState::new_for_test();
    let err = txt2video_handler(State(state), Json(request("")))
        .await
        .err()
        .expect("expected validation error");
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stub_returns_video_without_any_backend() {
    // new_for_test points at unreachable loopback ports; the stub must still work
    let state = AppState::new_for_test();

    let response = txt2video_handler(State(state.clone()), Json(request("a rocket launch")))
        .await
        .unwrap();
    assert_eq!(response.kind, ArtifactKind::Video);
    assert!(response.output_url.starts_with("http"));

    let history = state.history.read().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history.list().next().unwrap().kind, ArtifactKind::Video);
}
