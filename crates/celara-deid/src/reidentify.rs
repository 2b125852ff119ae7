//! Re-identification: substitute original values back in place of
//! placeholder tokens in model output.

use celara_core::models::redaction::RedactionEntry;

/// Replace every verbatim occurrence of each mapping entry's placeholder
/// with its original value.
///
/// Total and deterministic; never fails. Entry order is
/// irrelevant: placeholders are exact, mutually non-overlapping tokens,
/// so no longest-first discipline is needed here. A placeholder the
/// model paraphrased away is simply unused; a token-like substring not
/// present in the mapping is left untouched. Running the function twice
/// with the same mapping is a no-op, because the first pass removes
/// every placeholder it knows about.
pub fn reidentify(model_output: &str, mapping: &[RedactionEntry]) -> String {
    let mut text = model_output.to_string();
    for entry in mapping {
        text = text.replace(&entry.placeholder, &entry.original_value);
    }
    text
}
