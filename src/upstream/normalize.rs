// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Response normalizer: one classification boundary for heterogeneous upstreams
//!
//! Different integrations return the generated image under different shapes:
//! inline base64 under various field names, a JSON `{outputUrl}`, a bare URL in
//! a plain-text body, and reverse proxies may return HTML error pages. All of
//! that is absorbed here so handlers only ever see an [`Artifact`] or a
//! classified [`NormalizeError`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::client::RawUpstreamResponse;

/// Error body snippets are truncated so diagnostics stay bounded
pub const ERROR_SNIPPET_MAX: usize = 200;

/// Field names different upstream integrations use for the inline image payload
const IMAGE_FIELD_ALIASES: &[&str] = &["image_base64", "image_b64", "image"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Image,
    Video,
}

/// A normalized generation result: inline payload or an already-hosted URL
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    /// Inline base64 image payload, data-URI prefix already stripped
    Image { base64: String },
    /// Artifact hosted elsewhere, referenced by URL
    Url { url: String, kind: ArtifactKind },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizeError {
    #[error("upstream returned an HTML error page (status {status})")]
    HtmlErrorPage { status: u16 },
    #[error("upstream error: {message}")]
    Structured { status: u16, message: String },
    #[error("upstream returned status {status}: {snippet}")]
    Opaque { status: u16, snippet: String },
    #[error("no image payload in upstream response")]
    MissingArtifact,
    #[error("unexpected response format from upstream")]
    UnexpectedFormat,
}

/// Classify a raw upstream response into an artifact or a tagged error.
///
/// Classification order:
/// 1. failure status + markup content type or `<!DOCTYPE`/`<html` body prefix
///    -> [`NormalizeError::HtmlErrorPage`], never parsed as JSON
/// 2. failure status + JSON body with a message field -> [`NormalizeError::Structured`];
///    anything else unparseable -> [`NormalizeError::Opaque`] with a bounded snippet
/// 3. success status + JSON content type -> image payload under any accepted
///    alias, else `outputUrl`, else [`NormalizeError::MissingArtifact`]
/// 4. success status + non-JSON body -> bare URL if it looks like one, else
///    [`NormalizeError::UnexpectedFormat`]
pub fn normalize(response: &RawUpstreamResponse) -> Result<Artifact, NormalizeError> {
    if !(200..300).contains(&response.status) {
        return Err(classify_failure(response));
    }

    if response.content_type.contains("application/json") {
        let value: Value =
            serde_json::from_str(&response.body).map_err(|_| NormalizeError::UnexpectedFormat)?;

        if let Some(payload) = find_image_payload(&value) {
            return Ok(Artifact::Image {
                base64: strip_data_uri(payload).to_string(),
            });
        }

        if let Some(url) = value.get("outputUrl").and_then(Value::as_str) {
            let kind = match value.get("type").and_then(Value::as_str) {
                Some("video") => ArtifactKind::Video,
                _ => ArtifactKind::Image,
            };
            return Ok(Artifact::Url {
                url: url.to_string(),
                kind,
            });
        }

        return Err(NormalizeError::MissingArtifact);
    }

    // Plain-text fallback: some deployments answer with a bare URL
    let text = response.body.trim();
    if text.starts_with("http://") || text.starts_with("https://") {
        return Ok(Artifact::Url {
            url: text.to_string(),
            kind: ArtifactKind::Image,
        });
    }

    Err(NormalizeError::UnexpectedFormat)
}

fn classify_failure(response: &RawUpstreamResponse) -> NormalizeError {
    let trimmed = response.body.trim_start();
    if response.content_type.contains("text/html")
        || trimmed.starts_with("<!DOCTYPE")
        || trimmed.starts_with("<html")
    {
        return NormalizeError::HtmlErrorPage {
            status: response.status,
        };
    }

    if let Ok(value) = serde_json::from_str::<Value>(&response.body) {
        if let Some(message) = error_message(&value) {
            return NormalizeError::Structured {
                status: response.status,
                message,
            };
        }
    }

    NormalizeError::Opaque {
        status: response.status,
        snippet: response.body.chars().take(ERROR_SNIPPET_MAX).collect(),
    }
}

fn error_message(value: &Value) -> Option<String> {
    for key in ["message", "detail", "error"] {
        if let Some(s) = value.get(key).and_then(Value::as_str) {
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}

fn find_image_payload(value: &Value) -> Option<&str> {
    for key in IMAGE_FIELD_ALIASES {
        if let Some(s) = value.get(*key).and_then(Value::as_str) {
            return Some(s);
        }
    }

    // Automatic1111 returns {"images": ["..."]}
    if let Some(s) = value
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .and_then(Value::as_str)
    {
        return Some(s);
    }

    // some backends nest the payload under "detail"
    value
        .get("detail")
        .and_then(|detail| detail.get("image"))
        .and_then(Value::as_str)
}

/// Strip a `data:<mime>;base64,` prefix, leaving the raw base64 payload
pub fn strip_data_uri(payload: &str) -> &str {
    if payload.starts_with("data:") {
        match payload.find(',') {
            Some(comma) => &payload[comma + 1..],
            None => payload,
        }
    } else {
        payload
    }
}
