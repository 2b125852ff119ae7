use thiserror::Error;

use celara_deid::error::DeidError;
use celara_ollama::error::GatewayError;

/// Unified error for one pipeline run.
///
/// Messages surfaced to callers never contain identifying values:
/// authorization and subject-resolution failures stay generic, gateway
/// failures only ever describe scrubbed traffic, and leak detection
/// reports the category alone.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("caller is not authorized for this feature")]
    Denied,

    #[error("no patient identifiers are on file for the subject")]
    EmptySubject,

    #[error("model generation failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("model generation exceeded the {0}s deadline")]
    Deadline(u64),

    #[error(transparent)]
    Leak(#[from] DeidError),
}
