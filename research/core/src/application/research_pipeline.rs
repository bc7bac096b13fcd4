// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Research Pipeline
//!
//! Orchestrates one research run: embed the query, rank papers, build the
//! grounded prompt, generate. Every failure point degrades to a fixed
//! [`ResearchOutcome`] so callers always receive a string.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Sequence the retrieval and generation stages
//!
//! ```text
//! query ─► embed ─► search ─► assemble ─► prompt ─► generate ─► answer
//!            │         │                                │
//!            ▼         ▼                                ▼
//!        embedding  retrieval / no papers          no generation
//! ```
//!
//! Stages run strictly in order and none is retried. Each provider call and
//! the search are bounded by their own timeout; an elapsed timeout is that
//! stage's failure. Dropping the future returned by [`ResearchPipeline::run`]
//! cancels whichever stage is in flight.

use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use tokio::time::timeout;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use super::context_assembler::assemble;
use super::prompt_builder::PromptBuilder;
use super::similarity_search::SimilaritySearch;
use crate::domain::assistant_config::{AssistantConfigSpec, TimeoutConfig};
use crate::domain::embedding::{EmbeddingProvider, EmbeddingTaskType};
use crate::domain::llm::{FinishReason, GenerationOptions, LLMProvider};
use crate::domain::outcome::ResearchOutcome;
use crate::domain::paper::Query;
use crate::infrastructure::db::Database;
use crate::infrastructure::registry::ProviderRegistry;
use crate::infrastructure::repositories::PostgresPaperRepository;

/// Number of papers handed to the model when nothing else is configured
pub const DEFAULT_TOP_K: usize = 5;

const OUTCOMES_METRIC: &str = "scholar_research_outcomes_total";
const STAGE_SECONDS_METRIC: &str = "scholar_research_stage_seconds";

/// Upper bound for each remote stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimeouts {
    pub embedding: Duration,
    pub search: Duration,
    pub generation: Duration,
}

impl From<&TimeoutConfig> for StageTimeouts {
    fn from(config: &TimeoutConfig) -> Self {
        Self {
            embedding: Duration::from_millis(config.embedding_ms),
            search: Duration::from_millis(config.search_ms),
            generation: Duration::from_millis(config.generation_ms),
        }
    }
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self::from(&TimeoutConfig::default())
    }
}

/// Answers research questions from the paper store.
///
/// Holds no per-run state, so one instance can serve concurrent runs behind an `Arc`.
pub struct ResearchPipeline {
    embedding: Arc<dyn EmbeddingProvider>,
    search: SimilaritySearch,
    generation: Arc<dyn LLMProvider>,
    options: GenerationOptions,
    timeouts: StageTimeouts,
    top_k: usize,
}

impl ResearchPipeline {
    pub fn new(
        embedding: Arc<dyn EmbeddingProvider>,
        search: SimilaritySearch,
        generation: Arc<dyn LLMProvider>,
    ) -> Self {
        Self {
            embedding,
            search,
            generation,
            options: GenerationOptions::grounded(),
            timeouts: StageTimeouts::default(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Wire providers and the Postgres paper store from configuration.
    ///
    /// The pool inside `database` is shared; every run borrows one connection
    /// from it for the search stage only.
    pub fn from_config(config: &AssistantConfigSpec, database: &Database) -> anyhow::Result<Self> {
        let repository = Arc::new(PostgresPaperRepository::new(
            database.get_pool().clone(),
            config.retrieval.table.clone(),
        )?);
        let registry = ProviderRegistry::from_config(config)?;

        Ok(Self::new(
            registry.embedding(),
            SimilaritySearch::new(repository, config.retrieval.metric),
            registry.generation(),
        )
        .with_options(GenerationOptions {
            max_tokens: Some(config.generation.max_output_tokens),
            temperature: Some(config.generation.temperature),
            stop_sequences: None,
        })
        .with_timeouts(StageTimeouts::from(&config.timeouts))
        .with_top_k(config.retrieval.top_k))
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeouts(mut self, timeouts: StageTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Run the pipeline and return the answer text
    pub async fn answer(&self, query: &str) -> String {
        self.run(query).await.into_answer()
    }

    /// Run the pipeline and report how it ended
    pub async fn run(&self, query: &str) -> ResearchOutcome {
        let research_id = Uuid::new_v4();
        let span = tracing::info_span!("research", %research_id);

        let outcome = self.execute(query).instrument(span.clone()).await;

        span.in_scope(|| info!(outcome = outcome.label(), "Research run finished"));
        counter!(OUTCOMES_METRIC, "outcome" => outcome.label()).increment(1);

        outcome
    }

    async fn execute(&self, raw_query: &str) -> ResearchOutcome {
        let query = match Query::new(raw_query) {
            Ok(query) => query,
            Err(e) => {
                warn!("Rejected query: {}", e);
                return ResearchOutcome::InvalidQuery;
            }
        };
        info!(query_len = query.as_str().len(), "Starting research run");

        // 1. Embed
        let started = Instant::now();
        let embedded = timeout(
            self.timeouts.embedding,
            self.embedding
                .embed(query.as_str(), EmbeddingTaskType::RetrievalQuery),
        )
        .await;
        record_stage("embedding", started);

        let vector = match embedded {
            Ok(Ok(vector)) if !vector.is_empty() => vector,
            Ok(Ok(_)) => {
                warn!("Embedding provider returned an empty vector");
                return ResearchOutcome::EmbeddingUnavailable;
            }
            Ok(Err(e)) => {
                warn!(model = self.embedding.model_name(), "Embedding failed: {}", e);
                return ResearchOutcome::EmbeddingUnavailable;
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeouts.embedding.as_millis() as u64,
                    "Embedding timed out"
                );
                return ResearchOutcome::EmbeddingUnavailable;
            }
        };
        tracing::trace!(dimension = vector.dimension(), "Query embedded");

        // 2. Search
        let started = Instant::now();
        let searched = timeout(self.timeouts.search, self.search.search(&vector, self.top_k)).await;
        record_stage("search", started);

        let papers = match searched {
            Ok(Ok(papers)) => papers,
            Ok(Err(e)) => {
                warn!("Similarity search failed: {}", e);
                return ResearchOutcome::RetrievalError;
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeouts.search.as_millis() as u64,
                    "Similarity search timed out"
                );
                return ResearchOutcome::RetrievalError;
            }
        };

        if papers.is_empty() {
            info!("No papers matched the query");
            return ResearchOutcome::NoRelevantPapers;
        }
        info!(count = papers.len(), metric = %self.search.metric(), "Retrieved papers");

        // 3. Assemble + prompt
        let context = assemble(&papers);
        let prompt = PromptBuilder::build(&context, &query);
        debug!(prompt_len = prompt.len(), "Prompt built");

        // 4. Generate
        let started = Instant::now();
        let generated = timeout(
            self.timeouts.generation,
            self.generation.generate(prompt.as_str(), &self.options),
        )
        .await;
        record_stage("generation", started);

        match generated {
            Ok(Ok(response)) if response.has_text() => {
                info!(
                    provider = %response.provider,
                    model = %response.model,
                    completion_tokens = response.usage.completion_tokens,
                    finish_reason = %response.finish_reason,
                    "Answer generated"
                );
                if response.finish_reason != FinishReason::Stop {
                    warn!(finish_reason = %response.finish_reason, "Answer may be incomplete");
                }
                ResearchOutcome::Answered(response.text)
            }
            Ok(Ok(_)) => {
                warn!("Generation returned no text");
                ResearchOutcome::NoGeneration
            }
            Ok(Err(e)) => {
                warn!("Generation failed: {}", e);
                ResearchOutcome::NoGeneration
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeouts.generation.as_millis() as u64,
                    "Generation timed out"
                );
                ResearchOutcome::NoGeneration
            }
        }
    }
}

fn record_stage(stage: &'static str, started: Instant) {
    histogram!(STAGE_SECONDS_METRIC, "stage" => stage).record(started.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::EmbeddingError;
    use crate::domain::llm::{GenerationResponse, LLMError};
    use crate::domain::paper::{DistanceMetric, EmbeddingVector};
    use crate::infrastructure::repositories::InMemoryPaperRepository;
    use async_trait::async_trait;

    struct UnreachableEmbedding;

    #[async_trait]
    impl EmbeddingProvider for UnreachableEmbedding {
        async fn embed(
            &self,
            _text: &str,
            _task_type: EmbeddingTaskType,
        ) -> Result<EmbeddingVector, EmbeddingError> {
            panic!("embedding must not be called");
        }

        fn model_name(&self) -> &str {
            "unreachable"
        }
    }

    struct UnreachableGeneration;

    #[async_trait]
    impl LLMProvider for UnreachableGeneration {
        async fn generate(
            &self,
            _prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<GenerationResponse, LLMError> {
            panic!("generation must not be called");
        }

        async fn health_check(&self) -> Result<(), LLMError> {
            Ok(())
        }
    }

    fn pipeline() -> ResearchPipeline {
        ResearchPipeline::new(
            Arc::new(UnreachableEmbedding),
            SimilaritySearch::new(Arc::new(InMemoryPaperRepository::new()), DistanceMetric::Cosine),
            Arc::new(UnreachableGeneration),
        )
    }

    #[tokio::test]
    async fn test_blank_query_short_circuits() {
        let pipeline = pipeline();
        assert_eq!(pipeline.run("").await, ResearchOutcome::InvalidQuery);
        assert_eq!(
            pipeline.answer("   \n\t").await,
            "Please provide a research question."
        );
    }

    #[test]
    fn test_defaults() {
        let pipeline = pipeline();
        assert_eq!(pipeline.top_k(), 5);
        assert_eq!(pipeline.options, GenerationOptions::grounded());
        assert_eq!(pipeline.timeouts.generation, Duration::from_secs(120));
    }

    fn local_config() -> AssistantConfigSpec {
        let mut config = AssistantConfigSpec::default();
        config.embedding.provider_type = "ollama".to_string();
        config.embedding.endpoint = "http://localhost:11434".to_string();
        config.embedding.api_key = None;
        config.embedding.model = "nomic-embed-text".to_string();
        config.generation.provider_type = "ollama".to_string();
        config.generation.endpoint = "http://localhost:11434".to_string();
        config.generation.api_key = None;
        config.generation.model = "llama3.2".to_string();
        config
    }

    #[tokio::test]
    async fn test_from_config_rejects_injected_table_name() {
        let mut config = local_config();
        let database = Database::connect_lazy(&config.database).unwrap();

        config.retrieval.table = "paper; DROP TABLE paper; --".to_string();
        let err = ResearchPipeline::from_config(&config, &database)
            .err()
            .expect("table name must be rejected");
        assert!(err.to_string().contains("Invalid table name"));

        config.retrieval.table = "paper".to_string();
        config.retrieval.top_k = 3;
        let pipeline = ResearchPipeline::from_config(&config, &database).unwrap();
        assert_eq!(pipeline.top_k(), 3);
    }

    #[test]
    fn test_stage_timeouts_from_config() {
        let config = TimeoutConfig {
            embedding_ms: 100,
            search_ms: 200,
            generation_ms: 300,
        };
        let timeouts = StageTimeouts::from(&config);
        assert_eq!(timeouts.embedding, Duration::from_millis(100));
        assert_eq!(timeouts.search, Duration::from_millis(200));
        assert_eq!(timeouts.generation, Duration::from_millis(300));
    }
}
