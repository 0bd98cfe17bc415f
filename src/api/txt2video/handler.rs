// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-video endpoint handler
//!
//! No video backend exists yet; the dispatcher answers with a fixed placeholder
//! asset. The request still flows through dispatch and normalize so the wiring
//! is identical to the other modes.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::response::OutputResponse;
use crate::results::GenerationResult;
use crate::upstream::{
    normalize, Artifact, ArtifactKind, GenerationMode, GenerationRequest, SamplingParams,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Txt2VideoRequest {
    #[serde(default)]
    pub prompt: String,
}

impl Txt2VideoRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.prompt.trim().is_empty() {
            return Err(ApiError::Validation {
                field: "prompt".to_string(),
                message: "prompt must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

pub async fn txt2video_handler(
    State(state): State<AppState>,
    Json(request): Json<Txt2VideoRequest>,
) -> Result<Json<OutputResponse>, ApiError> {
    if let Err(e) = request.validate() {
        warn!("txt2video validation failed: {}", e);
        return Err(e);
    }

    let upstream_request = GenerationRequest {
        prompt: request.prompt,
        mode: GenerationMode::Text2Video,
        source_image: None,
        params: SamplingParams::default(),
    };

    let raw = state.upstream.dispatch(&upstream_request).await?;
    let artifact = normalize(&raw)?;

    let (output_url, kind) = match artifact {
        Artifact::Image { base64 } => (
            state.materializer.materialize(&base64, "txt2video").await?,
            ArtifactKind::Image,
        ),
        Artifact::Url { url, kind } => (url, kind),
    };

    state
        .history
        .write()
        .await
        .record(GenerationResult::new(output_url.clone(), kind));

    info!("txt2video result: {}", output_url);

    Ok(Json(OutputResponse { output_url, kind }))
}
