// Ollama Generation Adapter
//
// Calls `/api/generate` with streaming disabled so the whole answer arrives
// in one response body. Lets the assistant run against local models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{parse_error, status_error};
use crate::domain::llm::{
    FinishReason, GenerationOptions, GenerationResponse, LLMError, LLMProvider, TokenUsage,
};

pub struct OllamaAdapter {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions<'a>,
}

#[derive(Serialize)]
struct SamplingOptions<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

impl GenerateReply {
    fn into_generation(self, model: &str) -> Result<GenerationResponse, LLMError> {
        if self.response.is_empty() {
            return Err(LLMError::EmptyResponse);
        }

        Ok(GenerationResponse {
            text: self.response,
            usage: TokenUsage {
                prompt_tokens: self.prompt_eval_count,
                completion_tokens: self.eval_count,
                total_tokens: self.prompt_eval_count + self.eval_count,
            },
            provider: "ollama".to_string(),
            model: model.to_string(),
            finish_reason: if self.done_reason.as_deref() == Some("length") {
                FinishReason::Length
            } else {
                FinishReason::Stop
            },
        })
    }
}

impl OllamaAdapter {
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            model,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl LLMProvider for OllamaAdapter {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationResponse, LLMError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: SamplingOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
                stop: options.stop_sequences.as_deref(),
            },
        };

        let response = self
            .client
            .post(self.url("api/generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body, &self.model));
        }

        let reply: GenerateReply = response.json().await.map_err(parse_error)?;
        reply.into_generation(&self.model)
    }

    async fn health_check(&self) -> Result<(), LLMError> {
        // Lists local models; succeeds whenever the server is up
        let response = self
            .client
            .get(self.url("api/tags"))
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(LLMError::Network(format!("HTTP {}", status)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_generate_is_not_streamed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "llama3.2",
                "stream": false,
                "options": { "num_predict": 5000 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response":"Grounded answer.","done":true,"done_reason":"stop","eval_count":4,"prompt_eval_count":40}"#)
            .create_async()
            .await;

        let adapter = OllamaAdapter::new(server.url(), "llama3.2".to_string());
        let response = adapter.generate("p", &GenerationOptions::grounded()).await.unwrap();

        assert_eq!(response.text, "Grounded answer.");
        assert_eq!(response.usage.total_tokens, 44);
        assert_eq!(response.finish_reason, FinishReason::Stop);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_model() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(404)
            .with_body(r#"{"error":"model not found"}"#)
            .create_async()
            .await;

        let adapter = OllamaAdapter::new(server.url(), "absent".to_string());
        let result = adapter.generate("p", &GenerationOptions::grounded()).await;
        assert!(matches!(result, Err(LLMError::ModelNotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_reply() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response":"","done":true}"#)
            .create_async()
            .await;

        let adapter = OllamaAdapter::new(server.url(), "llama3.2".to_string());
        let result = adapter.generate("p", &GenerationOptions::grounded()).await;
        assert!(matches!(result, Err(LLMError::EmptyResponse)));
    }
}
