// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Llm
//!
//! Generation-model interface used for the answer stage.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Isolate the pipeline from vendor generation APIs
//!
//! Adapters live in `infrastructure/llm/`. One call per research run: no
//! streaming, no retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature used for grounded answers
pub const GROUNDED_TEMPERATURE: f32 = 0.2;

/// Output bound used for grounded answers
pub const GROUNDED_MAX_OUTPUT_TOKENS: u32 = 5000;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Complete `prompt`. An answer without text is `LLMError::EmptyResponse`.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationResponse, LLMError>;

    async fn health_check(&self) -> Result<(), LLMError>;
}

/// Decoding parameters sent with the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub stop_sequences: Option<Vec<String>>,
}

impl GenerationOptions {
    /// Low-temperature settings favouring faithfulness to the supplied papers
    pub fn grounded() -> Self {
        Self {
            max_tokens: Some(GROUNDED_MAX_OUTPUT_TOKENS),
            temperature: Some(GROUNDED_TEMPERATURE),
            stop_sequences: None,
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::grounded()
    }
}

#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub text: String,
    pub usage: TokenUsage,
    /// Provider type that produced the text, e.g. "gemini"
    pub provider: String,
    pub model: String,
    pub finish_reason: FinishReason,
}

impl GenerationResponse {
    /// False when the text is empty or only whitespace
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    /// Output bound reached; the answer may be cut off mid-reference
    Length,
    ContentFilter,
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ContentFilter => "content_filter",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(text: &str) -> GenerationResponse {
        GenerationResponse {
            text: text.to_string(),
            usage: TokenUsage::default(),
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            finish_reason: FinishReason::Stop,
        }
    }

    #[test]
    fn test_grounded_options() {
        let options = GenerationOptions::grounded();
        assert_eq!(options.temperature, Some(0.2));
        assert_eq!(options.max_tokens, Some(5000));
        assert!(options.stop_sequences.is_none());
        assert_eq!(GenerationOptions::default(), options);
    }

    #[test]
    fn test_has_text() {
        assert!(response("Answer [Paper].").has_text());
        assert!(!response("").has_text());
        assert!(!response(" \n\t").has_text());
    }

    #[test]
    fn test_finish_reason_display() {
        assert_eq!(FinishReason::ContentFilter.to_string(), "content_filter");
    }
}
