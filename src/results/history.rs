// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory, bounded, most-recent-first history of generated artifacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::upstream::ArtifactKind;

pub const DEFAULT_HISTORY_CAP: usize = 40;

/// A generated artifact reference. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Synthetic timestamp-derived identifier
    pub id: String,
    /// Data URI or served file path
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    pub created_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn new(url: impl Into<String>, kind: ArtifactKind) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            url: url.into(),
            kind,
            created_at: now,
        }
    }
}

/// Bounded history list. Insertion goes to the front; the oldest entry is
/// silently evicted once the cap is exceeded. Lost on restart by design.
#[derive(Debug)]
pub struct HistoryStore {
    entries: VecDeque<GenerationResult>,
    cap: usize,
}

impl HistoryStore {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn record(&mut self, result: GenerationResult) {
        self.entries.push_front(result);
        while self.entries.len() > self.cap {
            self.entries.pop_back();
        }
    }

    /// Entries most-recent-first
    pub fn list(&self) -> impl Iterator<Item = &GenerationResult> {
        self.entries.iter()
    }

    /// Lookup by id; does not mutate order
    pub fn select(&self, id: &str) -> Option<&GenerationResult> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}
