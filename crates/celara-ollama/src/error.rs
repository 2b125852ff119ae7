use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("cannot reach local model runtime at {0}")]
    Connection(String),

    #[error("model request timed out after {0}s")]
    Timeout(u64),

    #[error("model runtime returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("no suitable summary model is installed")]
    NoModelAvailable,

    #[error("HTTP client configuration error: {0}")]
    Config(String),
}
