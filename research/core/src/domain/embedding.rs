// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Embedding
//!
//! Domain interface for text-embedding providers.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Anti-Corruption Layer between the pipeline and embedding vendors

// Implementations live in infrastructure/embedding/.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::paper::EmbeddingVector;

/// Role of the text being embedded.
///
/// Some models embed queries and documents differently. Papers are embedded
/// as documents by the upstream ingestion job; the assistant only embeds queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmbeddingTaskType {
    RetrievalQuery,
}

impl EmbeddingTaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingTaskType::RetrievalQuery => "RETRIEVAL_QUERY",
        }
    }
}

/// Domain interface for embedding providers
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text. Only the first result returned by the vendor is used.
    async fn embed(
        &self,
        text: &str,
        task_type: EmbeddingTaskType,
    ) -> Result<EmbeddingVector, EmbeddingError>;

    /// Model identifier, for logs
    fn model_name(&self) -> &str;
}

/// Errors that can occur while embedding text
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider returned no embedding")]
    EmptyResult,

    #[error("Embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Reject empty vectors and, when a dimension is configured, vectors of the wrong size.
pub fn check_embedding(
    values: Option<Vec<f32>>,
    expected_dimension: Option<usize>,
) -> Result<EmbeddingVector, EmbeddingError> {
    let values = match values {
        Some(values) if !values.is_empty() => values,
        _ => return Err(EmbeddingError::EmptyResult),
    };

    if let Some(expected) = expected_dimension {
        if values.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }
    }

    Ok(EmbeddingVector::new(values))
}
