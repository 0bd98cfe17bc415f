// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! History endpoint handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::results::GenerationResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub items: Vec<GenerationResult>,
}

/// GET /api/history - entries most-recent-first
pub async fn list_history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state.history.read().await;
    Json(HistoryResponse {
        items: history.list().cloned().collect(),
    })
}

/// GET /api/history/:id - lookup by id, 404 when absent
pub async fn select_history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GenerationResult>, ApiError> {
    state
        .history
        .read()
        .await
        .select(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no history entry with id {}", id)))
}
