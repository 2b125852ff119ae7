//! Prompt assembly for narrative summarization.
//!
//! Wraps the scrubbed narrative in a structured block ahead of the task
//! instruction, so the model can tell source material from directions.
//! The system prompt pins down placeholder handling: bracketed tokens
//! stand in for removed values and must survive generation verbatim.

use serde::{Deserialize, Serialize};

/// System instructions for clinical summarization over scrubbed text.
pub const SUMMARY_SYSTEM_PROMPT: &str = "\
You are a clinical documentation assistant. Summarize the narrative you \
are given for a treating clinician: concise, factual, no speculation, no \
new clinical claims. The text contains bracketed tokens such as [NAME-1] \
or [DOB-1] standing in for protected values. Reproduce every token \
exactly as written wherever the summary refers to it. Never expand, \
rewrite, merge, or guess at what a token stands for.";

/// Default task instruction appended after the narrative block.
pub const SUMMARY_INSTRUCTION: &str = "\
Summarize the narrative above in one short paragraph, keeping every \
bracketed token intact.";

/// A reusable prompt shape: system instructions plus a task instruction
/// rendered after the narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub system: String,
    pub instruction: String,
}

impl PromptTemplate {
    /// The standard summarization template.
    pub fn summary() -> Self {
        Self {
            system: SUMMARY_SYSTEM_PROMPT.to_string(),
            instruction: SUMMARY_INSTRUCTION.to_string(),
        }
    }

    /// Build the user prompt for a scrubbed narrative.
    ///
    /// Returns an XML-style block followed by the task instruction. An
    /// empty narrative still produces a well-formed block.
    pub fn render(&self, narrative: &str) -> String {
        let mut prompt = String::from("<narrative>\n");
        prompt.push_str(narrative);
        if !narrative.ends_with('\n') {
            prompt.push('\n');
        }
        prompt.push_str("</narrative>\n\n");
        prompt.push_str(&self.instruction);
        prompt
    }
}
