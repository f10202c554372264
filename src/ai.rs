//! AI completion support
//!
//! Prompt construction, the completion gateway, and the background worker
//! that runs gateway calls off the UI thread.

pub mod prompt;
pub mod provider;
pub mod request;
pub mod worker;

pub use provider::{AiError, CompletionBackend, OpenAiClient};
pub use request::{GenerationOptions, GenerationRequest};
pub use worker::{AiRequest, AiResponse, spawn_worker};
