// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::assistant_config::is_sql_identifier;
use crate::domain::paper::{DistanceMetric, EmbeddingVector, PaperRecord, ScoredPaper};
use crate::domain::repository::{PaperRepository, RepositoryError};

pub struct PostgresPaperRepository {
    pool: PgPool,
    table: String,
}

impl PostgresPaperRepository {
    /// `table` is spliced into the query text, so anything but a bare identifier is refused.
    pub fn new(pool: PgPool, table: impl Into<String>) -> Result<Self, RepositoryError> {
        let table = table.into();
        if !is_sql_identifier(&table) {
            return Err(RepositoryError::InvalidTable(table));
        }
        Ok(Self { pool, table })
    }

    fn nearest_sql(&self, metric: DistanceMetric) -> String {
        let op = metric.operator();
        format!(
            r#"
            SELECT id::text AS id, title, abstract, authors,
                   publication_year::text AS publication_year, journal_name, doi, url,
                   (abstract_embedding {op} $1::text::vector)::float8 AS distance
            FROM {table}
            ORDER BY abstract_embedding {op} $1::text::vector
            LIMIT $2
            "#,
            op = op,
            table = self.table,
        )
    }

    fn scored_paper_from_row(row: &PgRow) -> Result<ScoredPaper, RepositoryError> {
        let decode = |e: sqlx::Error| RepositoryError::Decode(e.to_string());

        let paper = PaperRecord {
            id: row.try_get("id").map_err(decode)?,
            title: row
                .try_get::<Option<String>, _>("title")
                .map_err(decode)?
                .unwrap_or_default(),
            abstract_text: row
                .try_get::<Option<String>, _>("abstract")
                .map_err(decode)?
                .unwrap_or_default(),
            authors: row.try_get("authors").map_err(decode)?,
            publication_year: row
                .try_get::<Option<String>, _>("publication_year")
                .map_err(decode)?
                .as_deref()
                .and_then(parse_year),
            journal_name: row.try_get("journal_name").map_err(decode)?,
            doi: row.try_get("doi").map_err(decode)?,
            url: row.try_get("url").map_err(decode)?,
            abstract_embedding: None,
        };

        let distance: Option<f64> = row.try_get("distance").map_err(decode)?;

        Ok(ScoredPaper {
            paper,
            // NULL embeddings sort last in pgvector; mirror that
            distance: distance.unwrap_or(f64::INFINITY),
        })
    }
}

/// Years are ingested as free text ("2019", "2019.0"); keep the integer part
fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().split('.').next()?.parse().ok()
}

#[async_trait]
impl PaperRepository for PostgresPaperRepository {
    async fn nearest(
        &self,
        vector: &EmbeddingVector,
        limit: usize,
        metric: DistanceMetric,
    ) -> Result<Vec<ScoredPaper>, RepositoryError> {
        let sql = self.nearest_sql(metric);
        let limit = i64::try_from(limit)
            .map_err(|_| RepositoryError::Database(format!("limit {} out of range", limit)))?;

        // The pooled connection is returned when `conn` drops, on every path out of here
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        tracing::debug!(table = %self.table, %metric, limit, "Running nearest-paper query");

        let rows = sqlx::query(&sql)
            .bind(vector.to_pgvector_literal())
            .bind(limit)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(Self::scored_paper_from_row).collect()
    }
}
