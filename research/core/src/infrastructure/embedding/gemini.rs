// Gemini Embedding Adapter
//
// Anti-Corruption Layer for the Generative Language API `embedContent` method.
// Passes the task type through so query and document embeddings stay comparable.

use crate::domain::embedding::{check_embedding, EmbeddingError, EmbeddingProvider, EmbeddingTaskType};
use crate::domain::paper::EmbeddingVector;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::status_error;

pub struct GeminiEmbeddingAdapter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimension: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: GeminiContent,
    task_type: EmbeddingTaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dimensionality: Option<usize>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: Option<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}

impl GeminiEmbeddingAdapter {
    pub fn new(endpoint: String, api_key: String, model: String, dimension: Option<usize>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            model,
            dimension,
        }
    }

    fn model_path(&self) -> String {
        if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingAdapter {
    async fn embed(
        &self,
        text: &str,
        task_type: EmbeddingTaskType,
    ) -> Result<EmbeddingVector, EmbeddingError> {
        let model_path = self.model_path();
        let request = EmbedContentRequest {
            model: model_path.clone(),
            content: GeminiContent {
                parts: vec![GeminiPart {
                    text: text.to_string(),
                }],
            },
            task_type,
            output_dimensionality: self.dimension,
        };

        let url = format!(
            "{}/v1beta/{}:embedContent",
            self.endpoint.trim_end_matches('/'),
            model_path
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status, error_text));
        }

        let body: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Provider(format!("Failed to parse response: {}", e)))?;

        check_embedding(body.embedding.map(|e| e.values), self.dimension)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
