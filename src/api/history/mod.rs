// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! GET /api/history - list and select previously generated artifacts

pub mod handler;

pub use handler::{list_history_handler, select_history_handler, HistoryResponse};
