use promodesk_core::FieldErrors;
use thiserror::Error;

/// Errors returned by the generation client and flows.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("generation backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The backend answered successfully but produced no text.
    #[error("generation backend returned no text")]
    EmptyResponse,

    /// The backend envelope could not be deserialized.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The generated text does not match the flow's output schema.
    #[error("{flow} output did not match its schema: {reason}")]
    Schema { flow: &'static str, reason: String },

    /// The flow input failed validation; no backend call was made.
    #[error("invalid input: {0}")]
    InvalidInput(FieldErrors),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
