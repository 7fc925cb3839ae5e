//! Schema-constrained completions
//!
//! [`StructuredClient`] decorates the provider's HTTP client for requests
//! that must come back as JSON matching a caller-supplied schema. It uses the
//! `response_format: json_schema` capability of OpenAI-compatible endpoints.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    error::{MindlinkError, Result},
    messages::Conversation,
};

/// Client wrapper for structured (schema-constrained) completions
///
/// Built by the provider at login around the same HTTP client; rebuilt
/// whenever the provider re-authenticates.
#[derive(Debug, Clone)]
pub struct StructuredClient {
    client: Client,
    base_url: String,
    model: String,
}

impl StructuredClient {
    pub(crate) fn new(client: Client, base_url: String, model: String) -> Self {
        Self {
            client,
            base_url,
            model,
        }
    }

    /// Request a completion constrained to `schema` and deserialize it
    ///
    /// # Errors
    ///
    /// Returns [`MindlinkError::Completion`] if the call fails and
    /// [`MindlinkError::Json`] if the returned content does not match `T`
    pub async fn create<T: DeserializeOwned>(
        &self,
        conversation: &Conversation,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<T> {
        let messages: Vec<_> = conversation
            .messages()
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role,
                    "content": [{"type": "text", "text": msg.content}]
                })
            })
            .collect();

        let body = json!({
            "model": self.model,
            "messages": messages,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema_name,
                    "strict": true,
                    "schema": schema
                }
            }
        });

        tracing::debug!(schema_name, model = %self.model, "starting structured completion");

        let content = match self.send(&body).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(error = %e, schema_name, "structured completion failed");
                return Err(MindlinkError::Completion(e.to_string()));
            }
        };

        Ok(serde_json::from_str(&content)?)
    }

    async fn send(&self, body: &serde_json::Value) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(MindlinkError::Api(format!("HTTP {status}: {error_text}")));
        }

        let response_body: serde_json::Value = response.json().await?;
        response_body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(ToString::to_string)
            .ok_or_else(|| MindlinkError::Api("No content in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Message;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sentiment {
        label: String,
        score: f64,
    }

    fn client_for(server: &MockServer) -> StructuredClient {
        StructuredClient::new(Client::new(), server.uri(), "gpt-4o".to_string())
    }

    fn sentiment_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "label": {"type": "string"},
                "score": {"type": "number"}
            },
            "required": ["label", "score"]
        })
    }

    #[tokio::test]
    async fn test_create_parses_schema_constrained_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "{\"label\": \"positive\", \"score\": 0.98}"
                    }
                }]
            })))
            .mount(&server)
            .await;

        let conversation: Conversation =
            vec![Message::user("Rate this review: great!")].into_iter().collect();
        let sentiment: Sentiment = client_for(&server)
            .create(&conversation, "sentiment", sentiment_schema())
            .await
            .unwrap();

        assert_eq!(
            sentiment,
            Sentiment {
                label: "positive".to_string(),
                score: 0.98
            }
        );

        // The request carries the json_schema response format
        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "sentiment");
        assert_eq!(body["model"], "gpt-4o");
    }

    #[tokio::test]
    async fn test_create_wraps_api_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let conversation: Conversation = vec![Message::user("hi")].into_iter().collect();
        let err = client_for(&server)
            .create::<Sentiment>(&conversation, "sentiment", sentiment_schema())
            .await
            .unwrap_err();

        assert!(matches!(err, MindlinkError::Completion(_)));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_create_fails_on_mismatched_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "not json"}}]
            })))
            .mount(&server)
            .await;

        let conversation: Conversation = vec![Message::user("hi")].into_iter().collect();
        let err = client_for(&server)
            .create::<Sentiment>(&conversation, "sentiment", sentiment_schema())
            .await
            .unwrap_err();
        assert!(matches!(err, MindlinkError::Json(_)));
    }
}
