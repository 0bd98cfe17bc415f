// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /api/img2img - image-to-image via multipart upload

pub mod handler;

pub use handler::img2img_handler;
