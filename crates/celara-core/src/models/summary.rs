use serde::{Deserialize, Serialize};

/// The caller-facing result of one summarization pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutcome {
    /// Model output with every placeholder substituted back to its
    /// original value.
    pub final_text: String,
    /// How many distinct identifying values were found and removed
    /// before the text crossed the model boundary. A reportable metric,
    /// not a security property.
    pub elements_protected: usize,
}
