// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Read-side contract for the paper store. Papers are written by an upstream
//! ingestion job; the assistant only ranks and reads them.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `PaperRepository` | `PaperRecord` | `InMemoryPaperRepository`, `PostgresPaperRepository` |

use async_trait::async_trait;

use crate::domain::paper::{DistanceMetric, EmbeddingVector, ScoredPaper};

/// Repository interface for paper records
#[async_trait]
pub trait PaperRepository: Send + Sync {
    /// Return up to `limit` papers nearest to `vector` under `metric`, with their distances.
    ///
    /// Implementations hold at most one pooled connection for the duration of
    /// the call and release it before returning, on success and on error.
    async fn nearest(
        &self,
        vector: &EmbeddingVector,
        limit: usize,
        metric: DistanceMetric,
    ) -> Result<Vec<ScoredPaper>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid table name: {0:?}")]
    InvalidTable(String),
}
