// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /api/generate - text-to-image

pub mod handler;
pub mod request;

pub use handler::generate_handler;
pub use request::GenerateRequest;
