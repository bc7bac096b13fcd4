// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Similarity Search
//!
//! Ranks stored papers against a query embedding.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Shape repository rows into a `RankedResult`

use std::sync::Arc;

use crate::domain::paper::{DistanceMetric, EmbeddingVector, RankedResult};
use crate::domain::repository::{PaperRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Result limit must be at least 1")]
    InvalidLimit,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct SimilaritySearch {
    repository: Arc<dyn PaperRepository>,
    metric: DistanceMetric,
}

impl SimilaritySearch {
    pub fn new(repository: Arc<dyn PaperRepository>, metric: DistanceMetric) -> Self {
        Self { repository, metric }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Up to `k` papers, nearest first.
    ///
    /// Rows are re-sorted by the distance the store reported; the sort is
    /// stable, so equal distances keep store order. An empty result is not an
    /// error.
    pub async fn search(
        &self,
        vector: &EmbeddingVector,
        k: usize,
    ) -> Result<RankedResult, SearchError> {
        if k == 0 {
            return Err(SearchError::InvalidLimit);
        }

        let mut scored = self.repository.nearest(vector, k, self.metric).await?;

        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(k);

        for (rank, hit) in scored.iter().enumerate() {
            tracing::debug!(
                rank = rank + 1,
                paper_id = %hit.paper.id,
                distance = hit.distance,
                "Ranked paper"
            );
        }

        Ok(scored.into_iter().map(|hit| hit.paper).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paper::{PaperRecord, ScoredPaper};
    use async_trait::async_trait;

    /// Returns canned rows in whatever order it was given
    struct CannedRepository {
        rows: Vec<ScoredPaper>,
    }

    #[async_trait]
    impl PaperRepository for CannedRepository {
        async fn nearest(
            &self,
            _vector: &EmbeddingVector,
            _limit: usize,
            _metric: DistanceMetric,
        ) -> Result<Vec<ScoredPaper>, RepositoryError> {
            Ok(self.rows.clone())
        }
    }

    fn scored(id: &str, distance: f64) -> ScoredPaper {
        ScoredPaper {
            paper: PaperRecord {
                id: id.to_string(),
                title: format!("Title {}", id),
                abstract_text: String::new(),
                authors: None,
                publication_year: None,
                journal_name: None,
                doi: None,
                url: None,
                abstract_embedding: None,
            },
            distance,
        }
    }

    fn search_over(rows: Vec<ScoredPaper>) -> SimilaritySearch {
        SimilaritySearch::new(Arc::new(CannedRepository { rows }), DistanceMetric::Cosine)
    }

    #[tokio::test]
    async fn test_unsorted_rows_are_ranked_nearest_first() {
        let search = search_over(vec![scored("d3", 0.9), scored("d1", 0.1), scored("d2", 0.4)]);
        let vector = EmbeddingVector::new(vec![1.0]);

        let ranked = search.search(&vector, 5).await.unwrap();
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3"]);
    }

    #[tokio::test]
    async fn test_equal_distances_keep_store_order() {
        let search = search_over(vec![scored("b", 0.3), scored("a", 0.3), scored("c", 0.1)]);
        let vector = EmbeddingVector::new(vec![1.0]);

        let ranked = search.search(&vector, 5).await.unwrap();
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_result_is_bounded_by_k() {
        let rows = (0..8).map(|i| scored(&i.to_string(), i as f64)).collect();
        let search = search_over(rows);
        let vector = EmbeddingVector::new(vec![1.0]);

        let ranked = search.search(&vector, 5).await.unwrap();
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].id, "0");
        assert_eq!(ranked[4].id, "4");
    }

    #[tokio::test]
    async fn test_zero_rows_is_not_an_error() {
        let search = search_over(vec![]);
        let vector = EmbeddingVector::new(vec![1.0]);
        assert!(search.search(&vector, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected() {
        let search = search_over(vec![scored("a", 0.1)]);
        let vector = EmbeddingVector::new(vec![1.0]);
        assert!(matches!(search.search(&vector, 0).await, Err(SearchError::InvalidLimit)));
    }
}
