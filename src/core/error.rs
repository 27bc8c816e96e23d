//! Error types for ClickUp operations.

/// Errors raised while talking to ClickUp or adapting tool arguments.
#[derive(Debug, thiserror::Error)]
pub enum ClickUpError {
    /// No API key was supplied.
    #[error("ClickUp API key not configured")]
    ApiKeyMissing,

    /// The API key cannot be sent as a header value.
    #[error("ClickUp API key contains characters not allowed in a header")]
    ApiKeyInvalid,

    /// ClickUp answered with a non-success status.
    #[error("ClickUp API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// ClickUp answered successfully but the body is not the expected JSON.
    #[error("malformed response from ClickUp: {0}")]
    MalformedResponse(String),

    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Tool arguments were rejected before any request was made.
    #[error("invalid arguments: {0}")]
    Validation(String),

    /// A batch item lacks the identifier it needs.
    #[error("Missing {0}")]
    MissingIdentifier(&'static str),

    /// A request body or tool output could not be encoded.
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for ClickUp operations.
pub type Result<T> = std::result::Result<T, ClickUpError>;
