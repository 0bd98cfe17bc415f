// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod results;
pub mod upstream;

pub use api::{ApiError, AppState, ErrorResponse, OutputResponse};
pub use config::GatewayConfig;
pub use results::{GenerationResult, HistoryStore, MaterializeError, OutputMaterializer};
pub use upstream::{
    normalize, Artifact, ArtifactKind, DispatchError, GenerationMode, GenerationRequest,
    NormalizeError, RawUpstreamResponse, SamplingParams, UpstreamClient,
};
