use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted, identifier-free description of one summarization
/// operation, kept for compliance review.
///
/// Exactly one record exists per pipeline invocation, on every exit path.
/// Excerpts are bounded-length substrings of de-identified text only:
/// the scrubbed input and the raw (placeholder-bearing) model output.
/// Records are append-only facts — never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    /// Who ran the operation (opaque user/role reference).
    pub actor: String,
    /// Opaque reference to the patient record, e.g. an internal ID.
    pub subject_ref: String,
    pub module: String,
    pub action: AuditAction,
    pub model_id: String,
    pub input_excerpt: String,
    pub output_excerpt: String,
    pub duration_ms: u64,
    pub outcome: AuditOutcome,
    pub error_detail: Option<String>,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    GenerateSummary,
    Denied,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateSummary => "generate_summary",
            Self::Denied => "denied",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Success,
    Failure,
}

impl AuditOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}
