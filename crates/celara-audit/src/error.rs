use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
