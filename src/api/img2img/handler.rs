// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image-to-image endpoint handler
//!
//! Accepts a multipart form with an `image` file and a `prompt` text field,
//! re-encodes the image as a data URI and proxies it to the Automatic1111
//! img2img endpoint with pinned sampling parameters.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{debug, info, warn};

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::response::OutputResponse;
use crate::results::GenerationResult;
use crate::upstream::{
    normalize, Artifact, ArtifactKind, GenerationMode, GenerationRequest, SamplingParams,
};

pub async fn img2img_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<OutputResponse>, ApiError> {
    let mut prompt = String::new();
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        match field.name() {
            Some("prompt") => prompt = field.text().await.map_err(bad_multipart)?,
            Some("image") => image = Some(field.bytes().await.map_err(bad_multipart)?.to_vec()),
            _ => {}
        }
    }

    let image = image.ok_or_else(|| {
        warn!("img2img request without an image field");
        ApiError::Validation {
            field: "image".to_string(),
            message: "no image uploaded".to_string(),
        }
    })?;

    if prompt.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "prompt".to_string(),
            message: "prompt must not be empty".to_string(),
        });
    }

    debug!(
        "img2img request: prompt_len={}, image_bytes={}",
        prompt.len(),
        image.len()
    );

    let upstream_request = GenerationRequest {
        prompt,
        mode: GenerationMode::Image2Image,
        source_image: Some(image),
        params: SamplingParams::default(),
    };

    let raw = state.upstream.dispatch(&upstream_request).await?;
    let artifact = normalize(&raw)?;

    let (output_url, kind) = match artifact {
        Artifact::Image { base64 } => (
            state.materializer.materialize(&base64, "img2img").await?,
            ArtifactKind::Image,
        ),
        Artifact::Url { url, kind } => (url, kind),
    };

    state
        .history
        .write()
        .await
        .record(GenerationResult::new(output_url.clone(), kind));

    info!("img2img result: {}", output_url);

    Ok(Json(OutputResponse { output_url, kind }))
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation {
        field: "body".to_string(),
        message: format!("malformed multipart body: {}", err),
    }
}
