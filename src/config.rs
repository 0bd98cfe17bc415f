// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gateway configuration read from the environment

use std::env;
use std::path::PathBuf;

/// Runtime configuration for the gateway.
///
/// Everything comes from environment variables with loopback defaults, so a
/// bare `cargo run` talks to locally hosted model servers.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Base URL of the text-to-image generator service
    pub generator_url: String,
    /// Base URL of the Automatic1111-compatible server (img2img, upscale)
    pub automatic1111_url: String,
    /// Directory generated files are written to, served at `/outputs`
    pub output_dir: PathBuf,
    /// Maximum number of history entries kept in memory
    pub history_cap: usize,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let api_port = env::var("API_PORT").unwrap_or_else(|_| "8080".to_string());
        let generator_url =
            env::var("GENERATOR_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let automatic1111_url =
            env::var("AUTOMATIC1111_URL").unwrap_or_else(|_| "http://127.0.0.1:7860".to_string());
        let output_dir = env::var("OUTPUT_DIR").unwrap_or_else(|_| "public/outputs".to_string());
        let history_cap = env::var("HISTORY_CAP")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(crate::results::DEFAULT_HISTORY_CAP);

        Self {
            listen_addr: format!("0.0.0.0:{}", api_port),
            generator_url,
            automatic1111_url,
            output_dir: PathBuf::from(output_dir),
            history_cap,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            generator_url: "http://127.0.0.1:8000".to_string(),
            automatic1111_url: "http://127.0.0.1:7860".to_string(),
            output_dir: PathBuf::from("public/outputs"),
            history_cap: crate::results::DEFAULT_HISTORY_CAP,
        }
    }
}
