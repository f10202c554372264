//! Completion gateway abstraction
//!
//! Defines the AiError type and the CompletionBackend trait the worker drives.
//! The only production backend is the OpenAI-compatible chat-completions
//! client.

use std::future::Future;

use thiserror::Error;

use super::request::GenerationRequest;

mod openai;

pub use openai::OpenAiClient;

/// Errors that can occur during a completion call
///
/// None of these are retried; the triggering operation fails and the
/// editor surfaces an error notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// Transport failure (DNS, TLS, connection reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Service answered with a non-success status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Response body did not match the expected schema
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Something that can turn a [`GenerationRequest`] into generated text
pub trait CompletionBackend {
    /// Run one completion and return the first candidate's text, trimmed
    fn complete(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, AiError>>;
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
