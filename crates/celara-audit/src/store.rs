//! Audit persistence port and the bundled stores.

use std::sync::Mutex;

use tracing::info;

use celara_core::models::audit::AuditRecord;

use crate::error::AuditError;

/// Append-only persistence port for audit records.
///
/// Records are independent inserts with no cross-record invariants, so
/// implementations never need to coordinate concurrent writers. Inserts
/// are best-effort from the pipeline's point of view: a failure here is
/// logged by the caller and never masks the business outcome.
#[allow(async_fn_in_trait)]
pub trait AuditStore {
    async fn insert(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// In-memory store for tests and local tooling.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything inserted so far, in insertion order.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl AuditStore for MemoryStore {
    async fn insert(&self, record: &AuditRecord) -> Result<(), AuditError> {
        self.records
            .lock()
            .map_err(|_| AuditError::Store("record buffer lock poisoned".to_string()))?
            .push(record.clone());
        Ok(())
    }
}

/// Store that emits each record as a structured `tracing` event, for
/// deployments where the log pipeline is the system of record.
#[derive(Debug, Default)]
pub struct LogStore;

impl LogStore {
    pub fn new() -> Self {
        Self
    }
}

impl AuditStore for LogStore {
    async fn insert(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let payload = serde_json::to_string(record)?;
        info!(
            audit.id = %record.id,
            audit.actor = %record.actor,
            audit.action = record.action.as_str(),
            audit.outcome = record.outcome.as_str(),
            audit.record = %payload,
            "audit record"
        );
        Ok(())
    }
}
