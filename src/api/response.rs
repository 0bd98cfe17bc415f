// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Success body shared by all generation endpoints

use serde::{Deserialize, Serialize};

use crate::upstream::ArtifactKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputResponse {
    pub output_url: String,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
}
