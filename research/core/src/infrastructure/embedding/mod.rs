// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Embedding Provider Infrastructure - Anti-Corruption Layer Implementations
//
// Each adapter translates between the domain EmbeddingProvider interface and
// one vendor API. Only the first returned embedding is used.

pub mod gemini;
pub mod ollama;
pub mod openai;

pub use gemini::GeminiEmbeddingAdapter;
pub use ollama::OllamaEmbeddingAdapter;
pub use openai::OpenAIEmbeddingAdapter;

use crate::domain::embedding::EmbeddingError;

/// Map a non-success HTTP status to a domain error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String) -> EmbeddingError {
    if status == 401 || status == 403 {
        EmbeddingError::Authentication(body)
    } else if status == 400 {
        EmbeddingError::InvalidInput(body)
    } else {
        EmbeddingError::Provider(format!("HTTP {}: {}", status, body))
    }
}
