// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-image endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info, warn};

use super::request::GenerateRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::response::OutputResponse;
use crate::results::GenerationResult;
use crate::upstream::{
    normalize, Artifact, ArtifactKind, GenerationMode, GenerationRequest, SamplingParams,
};

/// POST /api/generate - Generate an image from a text prompt
///
/// Pipeline:
/// 1. Validate request (no upstream call on failure)
/// 2. Dispatch to the generator service
/// 3. Normalize the raw response
/// 4. Materialize inline payloads under the output directory
/// 5. Record the artifact in history and respond
pub async fn generate_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<OutputResponse>, ApiError> {
    debug!(
        "generate request: prompt_len={}, {}x{}, steps={}",
        request.prompt.len(),
        request.width,
        request.height,
        request.steps
    );

    if let Err(e) = request.validate() {
        warn!("generate validation failed: {}", e);
        return Err(e);
    }

    let upstream_request = GenerationRequest {
        prompt: request.prompt.clone(),
        mode: GenerationMode::Text2Image,
        source_image: None,
        params: SamplingParams {
            width: request.width,
            height: request.height,
            steps: request.steps,
            ..SamplingParams::default()
        },
    };

    let raw = state.upstream.dispatch(&upstream_request).await?;
    let artifact = normalize(&raw)?;

    let (output_url, kind) = match artifact {
        Artifact::Image { base64 } => (
            state.materializer.materialize(&base64, "gen").await?,
            ArtifactKind::Image,
        ),
        Artifact::Url { url, kind } => (url, kind),
    };

    state
        .history
        .write()
        .await
        .record(GenerationResult::new(output_url.clone(), kind));

    info!("generated image: {}", output_url);

    Ok(Json(OutputResponse { output_url, kind }))
}
