// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upstream dispatcher: maps generation modes to model server endpoints
//!
//! Two backends are supported: a text-to-image generator service exposing
//! `/generate`, and an Automatic1111-compatible server exposing
//! `/sdapi/v1/img2img` (used for both image-to-image and upscaling). Responses
//! are forwarded to the normalizer untouched; a non-2xx status is not an error
//! at this layer.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Sampling parameters pinned for proxied img2img calls
const IMG2IMG_STEPS: u32 = 20;
const IMG2IMG_CFG_SCALE: f32 = 7.0;
const IMG2IMG_DENOISING: f32 = 0.6;
const IMG2IMG_WIDTH: u32 = 768;
const IMG2IMG_HEIGHT: u32 = 512;

/// Upscaling reuses img2img at doubled resolution with gentler denoising
const UPSCALE_DENOISING: f32 = 0.5;
const UPSCALE_WIDTH: u32 = 1536;
const UPSCALE_HEIGHT: u32 = 1024;

/// Placeholder asset returned while no video backend is wired up
const VIDEO_PLACEHOLDER_URL: &str =
    "https://sample-videos.com/video123/mp4/720/big_buck_bunny_720p_1mb.mp4";

fn default_width() -> u32 {
    512
}

fn default_height() -> u32 {
    512
}

fn default_steps() -> u32 {
    20
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Text2Image,
    Image2Image,
    Text2Video,
}

impl GenerationMode {
    /// Wire name understood by the generator service
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Text2Image => "txt2img",
            GenerationMode::Image2Image => "img2img",
            GenerationMode::Text2Video => "txt2video",
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub cfg_scale: f32,
    pub denoising_strength: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            steps: default_steps(),
            cfg_scale: IMG2IMG_CFG_SCALE,
            denoising_strength: IMG2IMG_DENOISING,
        }
    }
}

/// A fully validated generation request, ready for dispatch
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub mode: GenerationMode,
    pub source_image: Option<Vec<u8>>,
    pub params: SamplingParams,
}

impl GenerationRequest {
    /// Validate the request fields
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("prompt must not be empty".to_string());
        }
        if self.mode == GenerationMode::Image2Image && self.source_image.is_none() {
            return Err("image2image requires a source image".to_string());
        }
        Ok(())
    }
}

/// Raw response metadata handed to the normalizer.
///
/// No content type is assumed here; classification happens in one place
/// (`normalize`) instead of per call site.
#[derive(Debug, Clone, PartialEq)]
pub struct RawUpstreamResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("failed to fetch original image: {0}")]
    SourceFetch(String),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for the generator service and the Automatic1111-compatible server
pub struct UpstreamClient {
    client: Client,
    generator_url: String,
    sd_url: String,
}

impl UpstreamClient {
    /// Create a new UpstreamClient
    pub fn new(generator_url: &str, sd_url: &str) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let generator_url = generator_url.trim_end_matches('/').to_string();
        let sd_url = sd_url.trim_end_matches('/').to_string();
        info!(
            "Upstream client configured: generator={}, automatic1111={}",
            generator_url, sd_url
        );

        Ok(Self {
            client,
            generator_url,
            sd_url,
        })
    }

    pub fn generator_url(&self) -> &str {
        &self.generator_url
    }

    pub fn sd_url(&self) -> &str {
        &self.sd_url
    }

    /// Check if the generator service is reachable
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/", self.generator_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Generator health check failed: {}", e);
                false
            }
        }
    }

    /// Dispatch a generation request to the endpoint matching its mode.
    ///
    /// Validation runs before any network I/O; a validation failure never
    /// issues an upstream request.
    pub async fn dispatch(
        &self,
        request: &GenerationRequest,
    ) -> Result<RawUpstreamResponse, DispatchError> {
        request
            .validate()
            .map_err(DispatchError::InvalidRequest)?;

        match request.mode {
            GenerationMode::Text2Image => self.generate(request).await,
            GenerationMode::Image2Image => {
                let bytes = request
                    .source_image
                    .as_deref()
                    .ok_or_else(|| {
                        DispatchError::InvalidRequest(
                            "image2image requires a source image".to_string(),
                        )
                    })?;
                self.img2img(
                    &encode_data_uri(bytes),
                    &request.prompt,
                    IMG2IMG_DENOISING,
                    IMG2IMG_WIDTH,
                    IMG2IMG_HEIGHT,
                )
                .await
            }
            // No video backend exists; hand the normalizer a fixed placeholder
            // so every mode flows through the same classification path.
            GenerationMode::Text2Video => Ok(RawUpstreamResponse {
                status: 200,
                content_type: "application/json".to_string(),
                body: serde_json::json!({
                    "outputUrl": VIDEO_PLACEHOLDER_URL,
                    "type": "video",
                })
                .to_string(),
            }),
        }
    }

    /// Fetch raw image bytes from a URL (used to re-encode an existing result
    /// before upscaling)
    pub async fn fetch_image(&self, url: &str) -> Result<Bytes, DispatchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DispatchError::SourceFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DispatchError::SourceFetch(format!(
                "source returned status {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| DispatchError::SourceFetch(e.to_string()))
    }

    /// Upscale an image by running it back through img2img at doubled
    /// resolution
    pub async fn upscale_image(
        &self,
        image: &[u8],
    ) -> Result<RawUpstreamResponse, DispatchError> {
        self.img2img(
            &encode_data_uri(image),
            "",
            UPSCALE_DENOISING,
            UPSCALE_WIDTH,
            UPSCALE_HEIGHT,
        )
        .await
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<RawUpstreamResponse, DispatchError> {
        let body = serde_json::json!({
            "prompt": request.prompt,
            "mode": request.mode.as_str(),
            "width": request.params.width,
            "height": request.params.height,
            "steps": request.params.steps,
        });

        let url = format!("{}/generate", self.generator_url);
        debug!("Generator POST {}", url);

        let response = self.client.post(&url).json(&body).send().await?;
        raw_response(response).await
    }

    async fn img2img(
        &self,
        init_image: &str,
        prompt: &str,
        denoising_strength: f32,
        width: u32,
        height: u32,
    ) -> Result<RawUpstreamResponse, DispatchError> {
        let body = serde_json::json!({
            "init_images": [init_image],
            "prompt": prompt,
            "steps": IMG2IMG_STEPS,
            "cfg_scale": IMG2IMG_CFG_SCALE,
            "denoising_strength": denoising_strength,
            "width": width,
            "height": height,
        });

        let url = format!("{}/sdapi/v1/img2img", self.sd_url);
        debug!("Automatic1111 POST {}", url);

        let response = self.client.post(&url).json(&body).send().await?;
        raw_response(response).await
    }
}

/// Encode image bytes as the data URI shape Automatic1111 expects
pub fn encode_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(bytes))
}

async fn raw_response(response: reqwest::Response) -> Result<RawUpstreamResponse, DispatchError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let body = response.text().await?;
    Ok(RawUpstreamResponse {
        status,
        content_type,
        body,
    })
}
