// Ollama Embedding Adapter
//
// Anti-Corruption Layer for Ollama's `/api/embed` endpoint.
// Supports air-gapped deployments with local embedding models.

use crate::domain::embedding::{check_embedding, EmbeddingError, EmbeddingProvider, EmbeddingTaskType};
use crate::domain::paper::EmbeddingVector;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::status_error;

pub struct OllamaEmbeddingAdapter {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    dimension: Option<usize>,
}

#[derive(Serialize)]
struct OllamaEmbedRequest {
    model: String,
    input: String,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbeddingAdapter {
    pub fn new(endpoint: String, model: String, dimension: Option<usize>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            model,
            dimension,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingAdapter {
    async fn embed(
        &self,
        text: &str,
        _task_type: EmbeddingTaskType,
    ) -> Result<EmbeddingVector, EmbeddingError> {
        let request = OllamaEmbedRequest {
            model: self.model.clone(),
            input: text.to_string(),
        };

        let url = format!("{}/api/embed", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status, error_text));
        }

        let body: OllamaEmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Provider(format!("Failed to parse response: {}", e)))?;

        check_embedding(body.embeddings.into_iter().next(), self.dimension)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
