// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Router-level tests for POST /api/img2img multipart handling

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use diffusion_gateway::api::build_router;
use tower::ServiceExt;

use super::helpers::{gateway_state, spawn_fake_upstream};

const BOUNDARY: &str = "XtestBoundaryX";

fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/img2img")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn upload_proxied_and_result_materialized() {
    let result_payload = BASE64.encode(b"edited png");
    let body = serde_json::json!({ "images": [result_payload] }).to_string();
    let fake = spawn_fake_upstream(200, "application/json", &body).await;
    let dir = tempfile::tempdir().unwrap();
    let state = gateway_state(&fake.base_url, dir.path());
    let app = build_router(state.clone());

    let request = multipart_request(&[
        ("prompt", None, b"add soft cinematic color grading"),
        ("image", Some("in.png"), b"fake source png"),
    ]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["type"], "image");
    let output_url = json["outputUrl"].as_str().unwrap();
    assert!(output_url.starts_with("/outputs/img2img_"));

    let written = state.materializer.read_output(output_url).await.unwrap();
    assert_eq!(written, b"edited png");
    assert_eq!(fake.hit_count(), 1);
}

#[tokio::test]
async fn missing_image_field_rejected_without_upstream_call() {
    let fake = spawn_fake_upstream(200, "application/json", r#"{"images":["Zm9v"]}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(gateway_state(&fake.base_url, dir.path()));

    let request = multipart_request(&[("prompt", None, b"add clouds")]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["message"], "no image uploaded");
    assert_eq!(fake.hit_count(), 0);
}

#[tokio::test]
async fn empty_prompt_rejected() {
    let fake = spawn_fake_upstream(200, "application/json", r#"{"images":["Zm9v"]}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(gateway_state(&fake.base_url, dir.path()));

    let request = multipart_request(&[
        ("prompt", None, b""),
        ("image", Some("in.png"), b"fake source png"),
    ]);
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(fake.hit_count(), 0);
}
