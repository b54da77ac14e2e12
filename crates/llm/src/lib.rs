//! LLM gateway for querygpt
//!
//! Sends a question to an OpenAI-compatible chat-completion endpoint and
//! reports the result as an outcome rather than an error.

mod ai_types;
mod client;
mod error;
mod gateway;

#[cfg(test)]
mod gateway_tests;
#[cfg(test)]
mod tests;

pub use client::{LlmClient, truncate};
pub use error::{LlmError, LlmErrorKind, classify_message};
pub use gateway::{LlmGateway, LlmHealth, SYSTEM_PROMPT};
