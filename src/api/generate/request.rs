// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generate request type and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

const MAX_STEPS: u32 = 150;

fn default_width() -> u32 {
    512
}

fn default_height() -> u32 {
    512
}

fn default_steps() -> u32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_steps")]
    pub steps: u32,
}

impl GenerateRequest {
    /// Validate before any upstream call is made
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.prompt.trim().is_empty() {
            return Err(ApiError::Validation {
                field: "prompt".to_string(),
                message: "prompt must not be empty".to_string(),
            });
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ApiError::Validation {
                field: "steps".to_string(),
                message: format!("steps must be between 1 and {}, got {}", MAX_STEPS, self.steps),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(ApiError::Validation {
                field: "size".to_string(),
                message: "width and height must be > 0".to_string(),
            });
        }
        Ok(())
    }
}
