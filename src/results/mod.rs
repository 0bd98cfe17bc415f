// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generated artifact handling: bounded history and file materialization

pub mod history;
pub mod materialize;

pub use history::{GenerationResult, HistoryStore, DEFAULT_HISTORY_CAP};
pub use materialize::{MaterializeError, OutputMaterializer};
