use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Text-generation collaborator. One prompt in, one raw text response out;
/// retries (if any) are the caller's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Embedding collaborator. Documents and queries use distinct task types so
/// the upstream model can optimize each side of the retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn embed_document(&self, text: &str) -> AppResult<Vec<f32>>;
    async fn embed_query(&self, text: &str) -> AppResult<Vec<f32>>;
}

/// HTTP client for the Gemini generative language API.
///
/// The API key is never logged; error bodies are truncated before they reach
/// the log stream.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    embedding_model: String,
}

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: Content,
    task_type: String,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    values: Vec<f32>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            embedding_model: config.embedding_model.clone(),
        }
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &B,
    ) -> AppResult<R> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(AppError::ModelError(format!(
                "upstream returned {}: {}",
                status, snippet
            )));
        }

        let parsed = response.json::<R>().await?;
        Ok(parsed)
    }

    async fn embed(&self, text: &str, task_type: &str) -> AppResult<Vec<f32>> {
        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            self.base_url, self.embedding_model
        );
        let request = EmbedContentRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
            task_type: task_type.to_string(),
        };

        let response: EmbedContentResponse = self.post_json(&url, &request).await?;
        Ok(response.embedding.values)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response: GenerateContentResponse = self.post_json(&url, &request).await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| AppError::ModelError("upstream returned no candidates".to_string()))?;

        Ok(text)
    }
}

#[async_trait]
impl EmbeddingClient for GeminiClient {
    async fn embed_document(&self, text: &str) -> AppResult<Vec<f32>> {
        self.embed(text, "RETRIEVAL_DOCUMENT").await
    }

    async fn embed_query(&self, text: &str) -> AppResult<Vec<f32>> {
        self.embed(text, "RETRIEVAL_QUERY").await
    }
}
