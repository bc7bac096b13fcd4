// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Paper
//!
//! Value types that flow through one research run: the query, its embedding,
//! and the paper records retrieved for it.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements the research data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A research question as submitted by the caller.
///
/// The text is kept verbatim; only the emptiness check looks at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Query must not be empty")]
    Empty,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Result<Self, QueryError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Embedding of a single piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Text form accepted by pgvector: `[0.123,-0.045,...]`
    pub fn to_pgvector_literal(&self) -> String {
        let values: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        format!("[{}]", values.join(","))
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// A paper as stored in the `paper` table.
///
/// Owned by the datastore; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,

    pub title: String,

    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Author list as stored (free text)
    pub authors: Option<String>,

    pub publication_year: Option<i32>,

    pub journal_name: Option<String>,

    pub doi: Option<String>,

    pub url: Option<String>,

    /// Precomputed abstract embedding. The Postgres search does not select it.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub abstract_embedding: Option<Vec<f32>>,
}

/// A paper together with its distance to the query vector, as reported by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPaper {
    pub paper: PaperRecord,
    pub distance: f64,
}

/// Nearest-first papers for one query, at most `k` long.
pub type RankedResult = Vec<PaperRecord>;

/// Distance used to order stored embeddings against the query vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    L2,
    InnerProduct,
}

impl DistanceMetric {
    /// pgvector operator for this metric
    pub fn operator(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "<=>",
            DistanceMetric::L2 => "<->",
            DistanceMetric::InnerProduct => "<#>",
        }
    }

    /// Distance with pgvector semantics (inner product is negated so smaller is closer).
    ///
    /// Returns `None` when the dimensions differ.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> Option<f64> {
        if a.len() != b.len() {
            return None;
        }

        let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();

        match self {
            DistanceMetric::Cosine => {
                let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
                let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    // pgvector yields NaN here; keep those rows last
                    return Some(f64::NAN);
                }
                Some(1.0 - dot / (norm_a * norm_b))
            }
            DistanceMetric::L2 => Some(
                a.iter()
                    .zip(b)
                    .map(|(x, y)| (*x as f64 - *y as f64).powi(2))
                    .sum::<f64>()
                    .sqrt(),
            ),
            DistanceMetric::InnerProduct => Some(-dot),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::L2 => "l2",
            DistanceMetric::InnerProduct => "inner_product",
        };
        f.write_str(name)
    }
}
