//! Service layer for external AI providers
//!
//! This module provides adapters that translate a [`Conversation`] into a
//! provider's chat-completion request. Currently implemented:
//! - OpenAI (and OpenAI-compatible endpoints)

pub mod openai;
pub mod structured;

use async_trait::async_trait;

use crate::{error::Result, messages::Conversation};

/// Raw completion payload returned by a provider
///
/// The adapter passes the response body through without interpreting it;
/// callers pick out the fields they need.
pub type CompletionResult = serde_json::Value;

/// Core trait for provider clients
///
/// Model listing and the connectivity probe never fail: errors there are
/// logged and collapse to an empty list / `false`. Completion calls surface
/// their failures so the caller can react per request.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    /// Get the provider name (e.g., "openai")
    fn provider(&self) -> &str;

    /// Get the configured model name
    fn model(&self) -> &str;

    /// List the models available to these credentials
    async fn available_models(&self) -> Vec<String>;

    /// Probe connectivity by listing models
    async fn test_connection(&self) -> bool;

    /// Send the conversation and return the raw completion
    async fn generate_response(&self, conversation: &Conversation) -> Result<CompletionResult>;
}
