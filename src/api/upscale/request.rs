// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upscale request type and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpscaleRequest {
    /// Either an absolute http(s) URL or a `/outputs/...` path of a previous
    /// result
    #[serde(default)]
    pub url: String,
}

impl UpscaleRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.url.trim().is_empty() {
            return Err(ApiError::Validation {
                field: "url".to_string(),
                message: "missing url".to_string(),
            });
        }
        Ok(())
    }
}
