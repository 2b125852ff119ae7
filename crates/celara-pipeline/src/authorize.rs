//! Permission gate, checked before any identifying value is touched.

/// Feature name gating AI summarization.
pub const FEATURE_AI_SUMMARY: &str = "ai_summary";

/// Role/feature permission port, implemented by the surrounding system.
///
/// The gate runs before redaction: an unauthorized caller's narrative is
/// never scanned and the patient's identifier values are never read.
pub trait Authorizer {
    fn is_authorized(&self, role: &str, feature: &str) -> bool;
}
