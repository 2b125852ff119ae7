//! Audit record construction.

use std::time::Duration;

use uuid::Uuid;

use celara_core::models::audit::{AuditAction, AuditOutcome, AuditRecord};

/// Ceiling on persisted excerpt length, in characters.
pub const EXCERPT_MAX_CHARS: usize = 500;

/// Everything the recorder is allowed to see about one pipeline run.
///
/// Holds de-identified material only, by construction: `scrubbed_input`
/// is the redactor's output and `model_output` is the raw model response
/// with placeholders intact (captured before re-identification). Raw
/// identifier values never reach this type.
#[derive(Debug, Clone)]
pub struct AuditContext<'a> {
    pub actor: &'a str,
    pub subject_ref: &'a str,
    pub module: &'a str,
    pub action: AuditAction,
    pub model_id: &'a str,
    pub scrubbed_input: &'a str,
    pub model_output: &'a str,
    pub duration: Duration,
}

/// Build the audit record for one pipeline run.
///
/// Pure value construction: excerpts are truncated to
/// [`EXCERPT_MAX_CHARS`], the record gets a fresh ID and timestamp, and
/// nothing is persisted here. Exactly one record is built per pipeline
/// invocation, on every exit path.
pub fn build_record(
    ctx: &AuditContext<'_>,
    outcome: AuditOutcome,
    error_detail: Option<String>,
) -> AuditRecord {
    AuditRecord {
        id: Uuid::new_v4(),
        actor: ctx.actor.to_string(),
        subject_ref: ctx.subject_ref.to_string(),
        module: ctx.module.to_string(),
        action: ctx.action,
        model_id: ctx.model_id.to_string(),
        input_excerpt: truncate_excerpt(ctx.scrubbed_input),
        output_excerpt: truncate_excerpt(ctx.model_output),
        duration_ms: ctx.duration.as_millis() as u64,
        outcome,
        error_detail,
        created_at: jiff::Timestamp::now(),
    }
}

/// Truncate to the excerpt ceiling on a character boundary.
pub fn truncate_excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_MAX_CHARS).collect()
}
