// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Provider Registry - Builds the embedding and generation providers from configuration
//
// Resolves provider types to adapters and API keys from "env:VAR" references.
// No retries or fallbacks: each research stage makes exactly one provider call.

use std::sync::Arc;
use tracing::info;

use crate::domain::assistant_config::{
    resolve_secret, AssistantConfigSpec, EmbeddingProviderConfig, GenerationProviderConfig,
};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::llm::{LLMError, LLMProvider};

use super::embedding::{GeminiEmbeddingAdapter, OllamaEmbeddingAdapter, OpenAIEmbeddingAdapter};
use super::llm::{GeminiAdapter, OllamaAdapter, OpenAIAdapter};

/// The two providers a research pipeline talks to
pub struct ProviderRegistry {
    embedding: Arc<dyn EmbeddingProvider>,
    generation: Arc<dyn LLMProvider>,
    generation_label: String,
}

impl ProviderRegistry {
    /// Create provider registry from assistant configuration
    pub fn from_config(config: &AssistantConfigSpec) -> anyhow::Result<Self> {
        info!(
            "Initializing embedding provider: {} ({})",
            config.embedding.provider_type, config.embedding.model
        );
        let embedding = Self::create_embedding_provider(&config.embedding)?;

        info!(
            "Initializing generation provider: {} ({})",
            config.generation.provider_type, config.generation.model
        );
        let generation = Self::create_generation_provider(&config.generation)?;

        Ok(Self {
            embedding,
            generation,
            generation_label: format!(
                "{}/{}",
                config.generation.provider_type, config.generation.model
            ),
        })
    }

    /// Create an embedding provider instance from configuration
    fn create_embedding_provider(
        config: &EmbeddingProviderConfig,
    ) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
        let api_key = resolve_secret(&config.api_key)?;
        let dimension = Some(config.dimension);

        let provider: Arc<dyn EmbeddingProvider> = match config.provider_type.as_str() {
            "gemini" => Arc::new(GeminiEmbeddingAdapter::new(
                config.endpoint.clone(),
                api_key,
                config.model.clone(),
                dimension,
            )),
            // OpenAI-compatible APIs (LM Studio, vLLM, etc.)
            "openai" | "openai-compatible" => Arc::new(OpenAIEmbeddingAdapter::new(
                config.endpoint.clone(),
                api_key,
                config.model.clone(),
                dimension,
            )),
            "ollama" => Arc::new(OllamaEmbeddingAdapter::new(
                config.endpoint.clone(),
                config.model.clone(),
                dimension,
            )),
            _ => anyhow::bail!("Unsupported embedding provider type: {}", config.provider_type),
        };

        Ok(provider)
    }

    /// Create a generation provider instance from configuration
    fn create_generation_provider(
        config: &GenerationProviderConfig,
    ) -> anyhow::Result<Arc<dyn LLMProvider>> {
        let api_key = resolve_secret(&config.api_key)?;

        let provider: Arc<dyn LLMProvider> = match config.provider_type.as_str() {
            "gemini" => Arc::new(GeminiAdapter::new(
                config.endpoint.clone(),
                api_key,
                config.model.clone(),
            )),
            "openai" | "openai-compatible" => Arc::new(OpenAIAdapter::new(
                config.endpoint.clone(),
                api_key,
                config.model.clone(),
            )),
            "ollama" => Arc::new(OllamaAdapter::new(config.endpoint.clone(), config.model.clone())),
            _ => anyhow::bail!("Unsupported generation provider type: {}", config.provider_type),
        };

        Ok(provider)
    }

    pub fn embedding(&self) -> Arc<dyn EmbeddingProvider> {
        self.embedding.clone()
    }

    pub fn generation(&self) -> Arc<dyn LLMProvider> {
        self.generation.clone()
    }

    /// Check that the generation provider is reachable
    pub async fn health_check(&self) -> Result<(), LLMError> {
        info!("Health checking generation provider: {}", self.generation_label);
        self.generation.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_registry_creation() {
        let registry = ProviderRegistry::from_config(&local_config()).unwrap();
        assert_eq!(registry.embedding().model_name(), "nomic-embed-text");
        assert_eq!(registry.generation_label, "ollama/llama3.2");
    }

    #[test]
    fn test_unsupported_provider_type() {
        let mut config = local_config();
        config.generation.provider_type = "anthropic".to_string();
        assert!(ProviderRegistry::from_config(&config).is_err());
    }

    #[test]
    fn test_missing_api_key_variable() {
        let mut config = local_config();
        config.embedding.provider_type = "gemini".to_string();
        config.embedding.api_key = Some("env:SCHOLAR_TEST_MISSING_KEY_7f3".to_string());
        assert!(ProviderRegistry::from_config(&config).is_err());
    }
}
