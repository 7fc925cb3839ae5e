//! OpenAI API adapter
//!
//! Supports:
//! - OpenAI official API (ChatGPT, GPT-4, etc.)
//! - OpenAI-compatible endpoints via a base-URL override in [`Settings`]

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;

use crate::{
    config::Settings,
    error::{MindlinkError, Result},
    messages::{Conversation, Role},
};

use super::{structured::StructuredClient, ClientProvider, CompletionResult};

/// Default model used when the caller does not pick one
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default OpenAI API endpoint
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Sampling temperature applied when none is configured
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// OpenAI provider client
///
/// Construction authenticates and probes connectivity, so a freshly built
/// adapter is always ready to serve completions. Not designed for concurrent
/// use from multiple tasks; give each caller its own instance.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    structured: StructuredClient,
    model: String,
    base_url: String,
    api_key: String,

    /// Sampling temperature for completion requests (0.7 when unset)
    pub temperature: Option<f64>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider and log in
    ///
    /// The explicit `api_key` wins over `settings.openai_api_key`; if both
    /// are absent construction fails before any request is made. The
    /// connectivity probe runs as part of construction, so this can also
    /// fail with [`MindlinkError::Connection`].
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is resolvable or the API is unreachable
    pub async fn new(
        model: impl Into<String>,
        api_key: Option<String>,
        settings: &Settings,
    ) -> Result<Self> {
        let api_key = api_key
            .or_else(|| settings.openai_api_key.clone())
            .ok_or(MindlinkError::MissingApiKey)?;

        let base_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string());

        let model = model.into();
        let client = Self::build_http_client(&api_key)?;
        let provider = Self {
            structured: StructuredClient::new(client.clone(), base_url.clone(), model.clone()),
            client,
            model,
            base_url,
            api_key,
            temperature: None,
        };
        provider.verify_connection().await?;

        Ok(provider)
    }

    /// Create a provider with the default model
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is resolvable or the API is unreachable
    pub async fn with_defaults(settings: &Settings) -> Result<Self> {
        Self::new(DEFAULT_MODEL, None, settings).await
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Re-authenticate: rebuild the HTTP clients and re-probe connectivity
    ///
    /// # Errors
    ///
    /// Returns an error if the connectivity probe fails
    pub async fn login(&mut self) -> Result<()> {
        self.client = Self::build_http_client(&self.api_key)?;
        self.structured = StructuredClient::new(
            self.client.clone(),
            self.base_url.clone(),
            self.model.clone(),
        );
        self.verify_connection().await
    }

    async fn verify_connection(&self) -> Result<()> {
        if !self.test_connection().await {
            return Err(MindlinkError::Connection(
                "failed to connect to the OpenAI API".to_string(),
            ));
        }

        tracing::info!(model = %self.model, "logged in to OpenAI");
        Ok(())
    }

    /// Access the structured-output client built at login
    #[must_use]
    pub fn structured(&self) -> &StructuredClient {
        &self.structured
    }

    fn build_http_client(api_key: &str) -> Result<Client> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| MindlinkError::Api("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        Ok(Client::builder().default_headers(headers).build()?)
    }

    /// List model ids, propagating any failure
    async fn fetch_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(MindlinkError::Api(format!("HTTP {status}: {error_text}")));
        }

        let list: ModelList = response.json().await?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }

    fn build_request(
        model: &str,
        temperature: Option<f64>,
        conversation: &Conversation,
    ) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: conversation
                .messages()
                .iter()
                .map(|msg| ChatMessage {
                    role: msg.role,
                    content: vec![ContentPart::text(&msg.content)],
                })
                .collect(),
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
        }
    }

    async fn send_completion(&self, request: &ChatRequest) -> Result<CompletionResult> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(MindlinkError::Api(format!("HTTP {status}: {error_text}")));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ClientProvider for OpenAiProvider {
    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    /// List the models available to these credentials
    ///
    /// Never fails: any error from the listing call is logged and collapses
    /// to an empty vec, so diagnostic callers cannot be crashed by it.
    async fn available_models(&self) -> Vec<String> {
        match self.fetch_models().await {
            Ok(models) => models,
            Err(e) => {
                tracing::error!(error = %e, "error fetching models");
                Vec::new()
            }
        }
    }

    async fn test_connection(&self) -> bool {
        let models = self.available_models().await;
        if models.is_empty() {
            tracing::warn!("no available models found");
            false
        } else {
            tracing::info!(?models, "available models");
            true
        }
    }

    /// Send the conversation and return the raw completion body
    ///
    /// Unlike the listing and probe calls, failures here propagate as
    /// [`MindlinkError::Completion`] so the caller can react per request.
    async fn generate_response(&self, conversation: &Conversation) -> Result<CompletionResult> {
        let request = Self::build_request(&self.model, self.temperature, conversation);

        match self.send_completion(&request).await {
            Ok(completion) => Ok(completion),
            Err(e) => {
                tracing::error!(error = %e, "OpenAI API error");
                Err(MindlinkError::Completion(e.to_string()))
            }
        }
    }
}

// OpenAI API types

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: Role,
    content: Vec<ContentPart>,
}

/// Single structured content block
///
/// Content is always sent as a one-element list of text blocks rather than a
/// plain string; providers expecting multi-part content require this shape.
#[derive(Debug, Clone, Serialize)]
struct ContentPart {
    #[serde(rename = "type")]
    part_type: String,
    text: String,
}

impl ContentPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            part_type: "text".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct ModelEntry {
    id: String,
}
