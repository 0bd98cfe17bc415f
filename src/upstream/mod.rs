// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upstream model server integration: request dispatch and response normalization

pub mod client;
pub mod normalize;

pub use client::{
    DispatchError, GenerationMode, GenerationRequest, RawUpstreamResponse, SamplingParams,
    UpstreamClient,
};
pub use normalize::{normalize, strip_data_uri, Artifact, ArtifactKind, NormalizeError};
