use thiserror::Error;

use celara_core::models::redaction::IdentifierCategory;

#[derive(Debug, Error)]
pub enum DeidError {
    /// The fail-closed invariant check found a whole-token occurrence of
    /// an identifier surface form in text that was supposed to be
    /// scrubbed. The error names the category only — never the value.
    #[error("scrubbed text retains a {} value", .category.token_label())]
    LeakDetected { category: IdentifierCategory },
}
