// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Outcome
//!
//! Terminal states of one research run and the fixed messages returned for them.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements the answer returned to callers

use std::fmt;

pub const INVALID_QUERY_MESSAGE: &str = "Please provide a research question.";
pub const EMBEDDING_UNAVAILABLE_MESSAGE: &str = "Could not generate embedding for the query.";
pub const RETRIEVAL_ERROR_MESSAGE: &str = "There was an error retrieving relevant papers.";
pub const NO_RELEVANT_PAPERS_MESSAGE: &str = "No relevant papers found. Try rephrasing your query.";
pub const NO_GENERATION_MESSAGE: &str = "No response from the language model.";

/// How a research run ended.
///
/// Only the pipeline orchestrator constructs these; each non-`Answered`
/// variant maps to exactly one fixed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchOutcome {
    /// Generated text, returned unmodified
    Answered(String),
    InvalidQuery,
    EmbeddingUnavailable,
    RetrievalError,
    NoRelevantPapers,
    NoGeneration,
}

impl ResearchOutcome {
    /// Text returned to the caller
    pub fn answer(&self) -> &str {
        match self {
            ResearchOutcome::Answered(text) => text,
            ResearchOutcome::InvalidQuery => INVALID_QUERY_MESSAGE,
            ResearchOutcome::EmbeddingUnavailable => EMBEDDING_UNAVAILABLE_MESSAGE,
            ResearchOutcome::RetrievalError => RETRIEVAL_ERROR_MESSAGE,
            ResearchOutcome::NoRelevantPapers => NO_RELEVANT_PAPERS_MESSAGE,
            ResearchOutcome::NoGeneration => NO_GENERATION_MESSAGE,
        }
    }

    pub fn into_answer(self) -> String {
        match self {
            ResearchOutcome::Answered(text) => text,
            other => other.answer().to_string(),
        }
    }

    /// Stable label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            ResearchOutcome::Answered(_) => "answered",
            ResearchOutcome::InvalidQuery => "invalid_query",
            ResearchOutcome::EmbeddingUnavailable => "embedding_unavailable",
            ResearchOutcome::RetrievalError => "retrieval_error",
            ResearchOutcome::NoRelevantPapers => "no_relevant_papers",
            ResearchOutcome::NoGeneration => "no_generation",
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, ResearchOutcome::Answered(_))
    }
}

impl fmt::Display for ResearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.answer())
    }
}
