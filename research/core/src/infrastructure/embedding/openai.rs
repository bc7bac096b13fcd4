// OpenAI Embedding Adapter
//
// Anti-Corruption Layer for the OpenAI `/embeddings` endpoint.
// Also works with OpenAI-compatible servers. The API has no task type, so it
// is ignored.

use crate::domain::embedding::{check_embedding, EmbeddingError, EmbeddingProvider, EmbeddingTaskType};
use crate::domain::paper::EmbeddingVector;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::status_error;

pub struct OpenAIEmbeddingAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimension: Option<usize>,
}

#[derive(Serialize)]
struct OpenAIEmbeddingRequest {
    model: String,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct OpenAIEmbeddingResponse {
    #[serde(default)]
    data: Vec<OpenAIEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAIEmbeddingAdapter {
    pub fn new(endpoint: String, api_key: String, model: String, dimension: Option<usize>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            model,
            dimension,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingAdapter {
    async fn embed(
        &self,
        text: &str,
        _task_type: EmbeddingTaskType,
    ) -> Result<EmbeddingVector, EmbeddingError> {
        let request = OpenAIEmbeddingRequest {
            model: self.model.clone(),
            input: text.to_string(),
            dimensions: self.dimension,
        };

        let url = format!("{}/embeddings", self.endpoint.trim_end_matches('/'));

        let mut builder = self.client.post(&url).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status, error_text));
        }

        let body: OpenAIEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Provider(format!("Failed to parse response: {}", e)))?;

        check_embedding(body.data.into_iter().next().map(|d| d.embedding), self.dimension)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
