// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /api/txt2video - text-to-video (stub backend)

pub mod handler;

pub use handler::{txt2video_handler, Txt2VideoRequest};
