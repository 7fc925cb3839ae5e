//! mindlink: a thin adapter between conversations and LLM chat completion APIs
//!
//! This library translates an ordered, role-tagged conversation into a
//! provider's chat-completion request, verifies connectivity by listing
//! models, and returns the raw completion payload. It carries no retries,
//! timeouts, or streaming; it is integration glue around the provider API.
//!
//! ```no_run
//! use mindlink::{
//!     config::Settings,
//!     messages::{Conversation, Message},
//!     services::{openai::OpenAiProvider, ClientProvider},
//! };
//!
//! # async fn run() -> mindlink::Result<()> {
//! let settings = Settings::from_env();
//! let provider = OpenAiProvider::with_defaults(&settings).await?;
//!
//! let conversation: Conversation = vec![Message::user("hi")].into_iter().collect();
//! let completion = provider.generate_response(&conversation).await?;
//! println!("{completion}");
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod messages;
pub mod services;

// Re-exports for convenience
pub use error::{MindlinkError, Result};
