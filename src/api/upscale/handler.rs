// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upscale endpoint handler
//!
//! Resolves the source image (a previously materialized `/outputs/...` file or
//! an absolute URL), then reruns it through img2img at doubled resolution.

use axum::{extract::State, Json};
use tracing::{debug, info, warn};
use url::Url;

use super::request::UpscaleRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::response::OutputResponse;
use crate::results::GenerationResult;
use crate::upstream::{normalize, Artifact, ArtifactKind};

pub async fn upscale_handler(
    State(state): State<AppState>,
    Json(request): Json<UpscaleRequest>,
) -> Result<Json<OutputResponse>, ApiError> {
    if let Err(e) = request.validate() {
        warn!("upscale validation failed: {}", e);
        return Err(e);
    }

    let source = request.url.trim();
    debug!("upscale request: source={}", source);

    let image = if source.starts_with("/outputs/") {
        state
            .materializer
            .read_output(source)
            .await
            .map_err(|e| ApiError::SourceFetch(e.to_string()))?
    } else {
        let parsed = Url::parse(source).map_err(|_| ApiError::Validation {
            field: "url".to_string(),
            message: "url must be absolute or an /outputs/ path".to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::Validation {
                field: "url".to_string(),
                message: format!("unsupported url scheme '{}'", parsed.scheme()),
            });
        }
        state.upstream.fetch_image(parsed.as_str()).await?.to_vec()
    };

    let raw = state.upstream.upscale_image(&image).await?;
    let artifact = normalize(&raw)?;

    let (output_url, kind) = match artifact {
        Artifact::Image { base64 } => (
            state.materializer.materialize(&base64, "upscale").await?,
            ArtifactKind::Image,
        ),
        Artifact::Url { url, kind } => (url, kind),
    };

    state
        .history
        .write()
        .await
        .record(GenerationResult::new(output_url.clone(), kind));

    info!("upscaled image: {}", output_url);

    Ok(Json(OutputResponse { output_url, kind }))
}
