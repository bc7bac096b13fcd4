// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// LLM Provider Infrastructure - Anti-Corruption Layer Implementations
//
// Each provider adapter translates between our domain interface and an external API.

pub mod gemini;
pub mod ollama;
pub mod openai;

pub use gemini::GeminiAdapter;
pub use ollama::OllamaAdapter;
pub use openai::OpenAIAdapter;

use crate::domain::llm::LLMError;

/// Map a non-success HTTP status to a domain error
pub(crate) fn status_error(status: reqwest::StatusCode, body: String, model: &str) -> LLMError {
    match status.as_u16() {
        401 | 403 => LLMError::Authentication(body),
        404 => LLMError::ModelNotFound(model.to_string()),
        429 => LLMError::RateLimit,
        _ => LLMError::Provider(format!("HTTP {}: {}", status, body)),
    }
}

pub(crate) fn parse_error(e: reqwest::Error) -> LLMError {
    LLMError::Provider(format!("Failed to parse response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "denied".into(), "m"),
            LLMError::Authentication(_)
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, String::new(), "m"),
            LLMError::ModelNotFound(ref m) if m == "m"
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, String::new(), "m"),
            LLMError::RateLimit
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "upstream".into(), "m"),
            LLMError::Provider(_)
        ));
    }
}
