// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Output materializer: decodes base64 payloads into files under the served
//! output directory

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::upstream::strip_data_uri;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("invalid base64 image payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid output path: {0}")]
    InvalidPath(String),
}

/// Writes decoded images to a fixed directory and hands back stable relative
/// URLs. Filenames carry a mode prefix and an epoch-millisecond timestamp, so
/// concurrent requests do not collide.
#[derive(Debug, Clone)]
pub struct OutputMaterializer {
    out_dir: PathBuf,
}

impl OutputMaterializer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Decode a base64 payload (data-URI prefix tolerated) and write it under
    /// the output directory, returning the served URL.
    ///
    /// Decoding happens before any filesystem access, so a malformed payload
    /// never leaves a partial file behind. Directory creation is idempotent
    /// and runs on every write.
    pub async fn materialize(
        &self,
        base64_payload: &str,
        prefix: &str,
    ) -> Result<String, MaterializeError> {
        let bytes = BASE64.decode(strip_data_uri(base64_payload).as_bytes())?;

        tokio::fs::create_dir_all(&self.out_dir).await?;

        let filename = format!("{}_{}.png", prefix, chrono::Utc::now().timestamp_millis());
        tokio::fs::write(self.out_dir.join(&filename), &bytes).await?;
        debug!("materialized {} ({} bytes)", filename, bytes.len());

        Ok(format!("/outputs/{}", filename))
    }

    /// Read back a previously materialized file by its served URL
    pub async fn read_output(&self, served_url: &str) -> Result<Vec<u8>, MaterializeError> {
        let filename = served_url
            .strip_prefix("/outputs/")
            .ok_or_else(|| MaterializeError::InvalidPath(served_url.to_string()))?;

        // the served URL must name a file directly inside the output dir
        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return Err(MaterializeError::InvalidPath(served_url.to_string()));
        }

        Ok(tokio::fs::read(self.out_dir.join(filename)).await?)
    }
}
