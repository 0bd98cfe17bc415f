// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /api/upscale - rerun an existing output through img2img at doubled
//! resolution

pub mod handler;
pub mod request;

pub use handler::upscale_handler;
pub use request::UpscaleRequest;
