//! Generative-text proxy: a backend-agnostic [`TextGenerator`] seam, a
//! Gemini-compatible HTTP client, and the marketing-content and
//! product-suggestion flows built on top of it.

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod flows;
mod prompts;
pub mod types;

pub use client::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::GenAiError;
pub use flows::{generate_marketing_content, suggest_products};
pub use types::{MarketingContent, MarketingContentInput, ProductSuggestionInput, ProductSuggestions};

/// Turns a prompt into generated text. One attempt per call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError>;
}
