// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Router construction and shared application state

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

use crate::api::{generate, history, img2img, txt2video, upscale};
use crate::config::GatewayConfig;
use crate::results::{HistoryStore, OutputMaterializer};
use crate::upstream::UpstreamClient;

/// Uploaded source images may be large; the axum default of 2 MB is too tight
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub materializer: Arc<OutputMaterializer>,
    pub history: Arc<RwLock<HistoryStore>>,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Ok(Self {
            upstream: Arc::new(UpstreamClient::new(
                &config.generator_url,
                &config.automatic1111_url,
            )?),
            materializer: Arc::new(OutputMaterializer::new(&config.output_dir)),
            history: Arc::new(RwLock::new(HistoryStore::new(config.history_cap))),
        })
    }

    pub fn new_for_test() -> Self {
        // unreachable loopback upstreams; outputs under a per-process temp dir
        let out_dir = std::env::temp_dir().join(format!("diffusion-gateway-test-{}", std::process::id()));
        Self {
            upstream: Arc::new(
                UpstreamClient::new("http://127.0.0.1:59999", "http://127.0.0.1:59998")
                    .expect("loopback client"),
            ),
            materializer: Arc::new(OutputMaterializer::new(out_dir)),
            history: Arc::new(RwLock::new(HistoryStore::default())),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let outputs_dir = state.materializer.out_dir().to_path_buf();

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/generate", post(generate::generate_handler))
        .route("/api/img2img", post(img2img::img2img_handler))
        .route("/api/upscale", post(upscale::upscale_handler))
        .route("/api/txt2video", post(txt2video::txt2video_handler))
        .route("/api/history", get(history::list_history_handler))
        .route("/api/history/:id", get(history::select_history_handler))
        .nest_service("/outputs", ServeDir::new(outputs_dir))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(config: GatewayConfig) -> Result<()> {
    let state = AppState::new(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("gateway listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let reachable = state.upstream.health_check().await;
    Json(json!({
        "status": "ok",
        "generator_reachable": reachable,
    }))
}
