// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gateway error taxonomy and the JSON error body every endpoint returns

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::results::MaterializeError;
use crate::upstream::{DispatchError, NormalizeError};

/// Wire shape of every error the gateway returns
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Request rejected before any upstream call
    Validation { field: String, message: String },
    /// The source image for an upscale could not be fetched
    SourceFetch(String),
    /// Upstream answered with an HTML error page
    UpstreamHtml { status: u16 },
    /// Upstream answered with a structured error payload
    UpstreamStructured { message: String },
    /// Upstream answered with an unparseable body
    UpstreamOpaque { status: u16, snippet: String },
    /// Upstream succeeded but returned no recognizable artifact
    MissingArtifact,
    /// Upstream succeeded but the body shape was not understood
    UnexpectedFormat,
    /// Upstream could not be reached at the transport level
    UpstreamUnreachable(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::SourceFetch(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamHtml { .. }
            | ApiError::UpstreamStructured { .. }
            | ApiError::UpstreamOpaque { .. }
            | ApiError::MissingArtifact
            | ApiError::UnexpectedFormat
            | ApiError::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (message, detail) = match self {
            ApiError::Validation { field, message } => (
                message.clone(),
                Some(serde_json::json!({ "field": field })),
            ),
            ApiError::SourceFetch(detail) => (
                "failed to fetch original image".to_string(),
                Some(serde_json::Value::String(detail.clone())),
            ),
            ApiError::UpstreamHtml { status } => (
                format!("upstream returned an HTML error page (status {})", status),
                Some(serde_json::json!({ "status": status })),
            ),
            ApiError::UpstreamStructured { message } => (message.clone(), None),
            ApiError::UpstreamOpaque { status, snippet } => (
                format!("upstream returned status {}", status),
                Some(serde_json::Value::String(snippet.clone())),
            ),
            ApiError::MissingArtifact => ("no image returned from upstream".to_string(), None),
            ApiError::UnexpectedFormat => (
                "upstream returned a response in an unexpected format".to_string(),
                None,
            ),
            ApiError::UpstreamUnreachable(detail) => (
                "model server unreachable".to_string(),
                Some(serde_json::Value::String(detail.clone())),
            ),
            ApiError::NotFound(message) => (message.clone(), None),
            ApiError::Internal(detail) => (
                "internal server error".to_string(),
                Some(serde_json::Value::String(detail.clone())),
            ),
        };

        ErrorResponse { message, detail }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_response().message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::HtmlErrorPage { status } => ApiError::UpstreamHtml { status },
            NormalizeError::Structured { message, .. } => ApiError::UpstreamStructured { message },
            NormalizeError::Opaque { status, snippet } => {
                ApiError::UpstreamOpaque { status, snippet }
            }
            NormalizeError::MissingArtifact => ApiError::MissingArtifact,
            NormalizeError::UnexpectedFormat => ApiError::UnexpectedFormat,
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::InvalidRequest(message) => ApiError::Validation {
                field: "request".to_string(),
                message,
            },
            DispatchError::SourceFetch(detail) => ApiError::SourceFetch(detail),
            DispatchError::Transport(e) => ApiError::UpstreamUnreachable(e.to_string()),
        }
    }
}

impl From<MaterializeError> for ApiError {
    fn from(err: MaterializeError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
