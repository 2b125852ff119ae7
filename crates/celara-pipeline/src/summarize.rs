//! The summarization pipeline.
//!
//! `sourceText + PatientIdentifiers → redact → model → reidentify`,
//! with the audit recorder observing every exit path. The pipeline holds
//! no shared state between invocations; arbitrarily many calls may run
//! concurrently without coordination.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use celara_audit::record::{AuditContext, build_record};
use celara_audit::store::AuditStore;
use celara_core::models::audit::{AuditAction, AuditOutcome, AuditRecord};
use celara_core::models::identifiers::PatientIdentifiers;
use celara_core::models::summary::SummaryOutcome;
use celara_deid::redact::{redact, verify_scrubbed};
use celara_deid::reidentify::reidentify;
use celara_ollama::prompt::PromptTemplate;

use crate::authorize::{Authorizer, FEATURE_AI_SUMMARY};
use crate::error::PipelineError;
use crate::gateway::ModelGateway;

/// Module name stamped on every audit record this pipeline produces.
pub const MODULE_AI_SUMMARIZATION: &str = "ai_summarization";

const DEFAULT_DEADLINE_SECS: u64 = 60;

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Model passed to the gateway.
    pub model_id: String,
    /// Overall deadline for the model call. Expiry is a Failure outcome,
    /// not a hang.
    pub deadline: Duration,
}

impl PipelineConfig {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            deadline: Duration::from_secs(DEFAULT_DEADLINE_SECS),
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

/// One summarization request, fully resolved by the caller.
#[derive(Debug, Clone)]
pub struct SummarizeRequest<'a> {
    pub source_text: &'a str,
    pub identifiers: &'a PatientIdentifiers,
    /// Opaque identity of the caller, stamped on the audit record.
    pub actor: &'a str,
    /// Role checked against the feature gate.
    pub role: &'a str,
    /// Opaque reference to the patient record (never an identifier value).
    pub subject_ref: &'a str,
}

/// Run one de-identified summarization.
///
/// Order of operations is fixed: the permission gate runs before any
/// identifier value is read; the scrubbed text is verified leak-free
/// before it crosses the model boundary; re-identification happens only
/// on the model's output. Exactly one audit record is persisted per
/// call, on success and on every failure path alike. A store failure is
/// logged and never changes the returned result.
pub async fn summarize<A, G, S>(
    request: &SummarizeRequest<'_>,
    template: &PromptTemplate,
    config: &PipelineConfig,
    authorizer: &A,
    gateway: &G,
    store: &S,
) -> Result<SummaryOutcome, PipelineError>
where
    A: Authorizer,
    G: ModelGateway,
    S: AuditStore,
{
    let started = Instant::now();

    if !authorizer.is_authorized(request.role, FEATURE_AI_SUMMARY) {
        let record = build_record(
            &audit_context(request, config, AuditAction::Denied, "", "", started),
            AuditOutcome::Failure,
            Some(format!("authorization denied for {FEATURE_AI_SUMMARY}")),
        );
        persist_best_effort(store, &record).await;
        return Err(PipelineError::Denied);
    }

    if request.identifiers.is_empty() {
        let record = build_record(
            &audit_context(request, config, AuditAction::GenerateSummary, "", "", started),
            AuditOutcome::Failure,
            Some("no identifiers resolved for subject".to_string()),
        );
        persist_best_effort(store, &record).await;
        return Err(PipelineError::EmptySubject);
    }

    let scrub = redact(request.source_text, request.identifiers);

    if let Err(leak) = verify_scrubbed(&scrub, request.identifiers) {
        // The scrubbed text failed verification, so its excerpt cannot be
        // trusted either; the record carries the category-only detail.
        let record = build_record(
            &audit_context(request, config, AuditAction::GenerateSummary, "", "", started),
            AuditOutcome::Failure,
            Some(leak.to_string()),
        );
        persist_best_effort(store, &record).await;
        return Err(leak.into());
    }

    let prompt = template.render(&scrub.scrubbed_text);

    let generated = tokio::time::timeout(
        config.deadline,
        gateway.generate(&config.model_id, &prompt, &template.system),
    )
    .await;

    let model_output = match generated {
        Err(_) => {
            let secs = config.deadline.as_secs();
            let record = build_record(
                &audit_context(
                    request,
                    config,
                    AuditAction::GenerateSummary,
                    &scrub.scrubbed_text,
                    "",
                    started,
                ),
                AuditOutcome::Failure,
                Some(format!("model call exceeded {secs}s deadline")),
            );
            persist_best_effort(store, &record).await;
            return Err(PipelineError::Deadline(secs));
        }
        Ok(Err(e)) => {
            let record = build_record(
                &audit_context(
                    request,
                    config,
                    AuditAction::GenerateSummary,
                    &scrub.scrubbed_text,
                    "",
                    started,
                ),
                AuditOutcome::Failure,
                Some(e.to_string()),
            );
            persist_best_effort(store, &record).await;
            return Err(e.into());
        }
        Ok(Ok(text)) => text,
    };

    let final_text = reidentify(&model_output, &scrub.mapping);

    let record = build_record(
        &audit_context(
            request,
            config,
            AuditAction::GenerateSummary,
            &scrub.scrubbed_text,
            &model_output,
            started,
        ),
        AuditOutcome::Success,
        None,
    );
    persist_best_effort(store, &record).await;

    info!(
        elements_protected = scrub.mapping.len(),
        duration_ms = started.elapsed().as_millis() as u64,
        "summary generated"
    );

    Ok(SummaryOutcome {
        final_text,
        elements_protected: scrub.mapping.len(),
    })
}

fn audit_context<'a>(
    request: &'a SummarizeRequest<'_>,
    config: &'a PipelineConfig,
    action: AuditAction,
    scrubbed_input: &'a str,
    model_output: &'a str,
    started: Instant,
) -> AuditContext<'a> {
    AuditContext {
        actor: request.actor,
        subject_ref: request.subject_ref,
        module: MODULE_AI_SUMMARIZATION,
        action,
        model_id: &config.model_id,
        scrubbed_input,
        model_output,
        duration: started.elapsed(),
    }
}

/// Persist the audit record without letting a store failure distort the
/// pipeline's own outcome.
async fn persist_best_effort<S: AuditStore>(store: &S, record: &AuditRecord) {
    if let Err(e) = store.insert(record).await {
        warn!(error = %e, audit_id = %record.id, "failed to persist audit record");
    }
}
