// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Handler tests for GET /api/history and GET /api/history/:id

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use diffusion_gateway::api::{list_history_handler, select_history_handler, ApiError, AppState};
use diffusion_gateway::results::GenerationResult;
use diffusion_gateway::upstream::ArtifactKind;

#[tokio::test]
async fn list_is_most_recent_first() {
    let state = AppState::new_for_test();
    {
        let mut history = state.history.write().await;
        history.record(GenerationResult {
            id: "1".to_string(),
            url: "/outputs/gen_1.png".to_string(),
            kind: ArtifactKind::Image,
            created_at: chrono::Utc::now(),
        });
        history.record(GenerationResult {
            id: "2".to_string(),
            url: "/outputs/gen_2.png".to_string(),
            kind: ArtifactKind::Image,
            created_at: chrono::Utc::now(),
        });
    }

    let response = list_history_handler(State(state)).await;
    let ids: Vec<&str> = response.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[tokio::test]
async fn empty_history_lists_nothing() {
    let state = AppState::new_for_test();
    let response = list_history_handler(State(state)).await;
    assert!(response.items.is_empty());
}

#[tokio::test]
async fn select_returns_the_entry() {
    let state = AppState::new_for_test();
    let entry = GenerationResult {
        id: "42".to_string(),
        url: "/outputs/gen_42.png".to_string(),
        kind: ArtifactKind::Image,
        created_at: chrono::Utc::now(),
    };
    state.history.write().await.record(entry.clone());

    let response = select_history_handler(State(state), Path("42".to_string()))
        .await
        .unwrap();
    assert_eq!(*response, entry);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let state = AppState::new_for_test();
    let err = select_history_handler(State(state), Path("nope".to_string()))
        .await
        .err()
        .expect("expected not found");
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert!(matches!(err, ApiError::NotFound(_)));
}
