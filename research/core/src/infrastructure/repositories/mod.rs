// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the `PaperRepository` contract.
//!
//! # Available Implementations
//!
//! - **PostgresPaperRepository** - pgvector nearest-neighbour query over the shared pool
//! - **InMemoryPaperRepository** - in-process ranking over a fixed paper set, for
//!   tests and local demos
//!
//! # Usage
//!
//! ```no_run
//! # async fn example(config: &scholar_core::assistant_config::AssistantConfigSpec) -> anyhow::Result<()> {
//! use scholar_core::infrastructure::db::Database;
//! use scholar_core::infrastructure::repositories::PostgresPaperRepository;
//!
//! let database = Database::connect_lazy(&config.database)?;
//! let repo = PostgresPaperRepository::new(database.get_pool().clone(), &config.retrieval.table)?;
//! # Ok(())
//! # }
//! ```

pub mod postgres_paper;

pub use postgres_paper::PostgresPaperRepository;

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::domain::paper::{DistanceMetric, EmbeddingVector, PaperRecord, ScoredPaper};
use crate::domain::repository::{PaperRepository, RepositoryError};

#[derive(Clone, Default)]
pub struct InMemoryPaperRepository {
    papers: Arc<RwLock<Vec<PaperRecord>>>,
}

impl InMemoryPaperRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_papers(papers: Vec<PaperRecord>) -> Self {
        Self {
            papers: Arc::new(RwLock::new(papers)),
        }
    }

    pub fn insert(&self, paper: PaperRecord) -> Result<(), RepositoryError> {
        self.papers
            .write()
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .push(paper);
        Ok(())
    }
}

#[async_trait]
impl PaperRepository for InMemoryPaperRepository {
    async fn nearest(
        &self,
        vector: &EmbeddingVector,
        limit: usize,
        metric: DistanceMetric,
    ) -> Result<Vec<ScoredPaper>, RepositoryError> {
        let papers = self
            .papers
            .read()
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut scored = Vec::with_capacity(papers.len());
        for paper in papers.iter() {
            // Papers without an embedding are never matched, as with a NULL column
            let Some(embedding) = paper.abstract_embedding.as_deref() else {
                continue;
            };
            let distance = metric.distance(vector.as_slice(), embedding).ok_or_else(|| {
                RepositoryError::Database(format!(
                    "different vector dimensions {} and {}",
                    vector.dimension(),
                    embedding.len()
                ))
            })?;
            scored.push(ScoredPaper {
                paper: paper.clone(),
                distance,
            });
        }

        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(limit);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str, embedding: Option<Vec<f32>>) -> PaperRecord {
        PaperRecord {
            id: id.to_string(),
            title: format!("Paper {}", id),
            abstract_text: "An abstract.".to_string(),
            authors: None,
            publication_year: Some(2021),
            journal_name: None,
            doi: None,
            url: None,
            abstract_embedding: embedding,
        }
    }

    #[tokio::test]
    async fn test_nearest_orders_by_cosine_distance() {
        let repo = InMemoryPaperRepository::with_papers(vec![
            paper("far", Some(vec![-1.0, 0.0])),
            paper("near", Some(vec![1.0, 0.1])),
            paper("mid", Some(vec![0.0, 1.0])),
            paper("unembedded", None),
        ]);

        let query = EmbeddingVector::new(vec![1.0, 0.0]);
        let results = repo.nearest(&query, 5, DistanceMetric::Cosine).await.unwrap();

        let ids: Vec<&str> = results.iter().map(|s| s.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
        assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[tokio::test]
    async fn test_nearest_respects_limit() {
        let repo = InMemoryPaperRepository::new();
        for i in 0..10 {
            repo.insert(paper(&i.to_string(), Some(vec![i as f32, 1.0]))).unwrap();
        }

        let query = EmbeddingVector::new(vec![0.0, 1.0]);
        let results = repo.nearest(&query, 3, DistanceMetric::L2).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|s| s.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[tokio::test]
    async fn test_nearest_rejects_dimension_mismatch() {
        let repo = InMemoryPaperRepository::with_papers(vec![paper("a", Some(vec![1.0, 0.0, 0.0]))]);
        let query = EmbeddingVector::new(vec![1.0, 0.0]);
        assert!(repo.nearest(&query, 5, DistanceMetric::Cosine).await.is_err());
    }
}
