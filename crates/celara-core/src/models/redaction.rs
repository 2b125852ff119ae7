use serde::{Deserialize, Serialize};

/// The closed set of identifier categories tracked per patient.
///
/// Adding a category is a compile-time-checked change: the normalizer
/// matches exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCategory {
    Name,
    DateOfBirth,
    PayerId,
    Phone,
    Email,
    Address,
}

impl IdentifierCategory {
    /// Stable uppercase label used inside placeholder tokens.
    pub fn token_label(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::DateOfBirth => "DOB",
            Self::PayerId => "PAYER-ID",
            Self::Phone => "PHONE",
            Self::Email => "EMAIL",
            Self::Address => "ADDRESS",
        }
    }

    /// Render the placeholder token for the `ordinal`-th identifier of
    /// this category found in a text, e.g. `[NAME-2]`.
    ///
    /// The vocabulary is deliberately plain: uppercase ASCII, square
    /// brackets, a hyphen, and a decimal ordinal. Models reproduce it
    /// verbatim, and the closing bracket terminates the token so no
    /// placeholder is a substring of another.
    pub fn placeholder(self, ordinal: usize) -> String {
        format!("[{}-{}]", self.token_label(), ordinal)
    }
}

/// A single identifying value that was found in the source text and
/// replaced with a placeholder. One entry per distinct
/// `(category, value)` pair — not one per occurrence, not one per
/// format variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionEntry {
    pub placeholder: String,
    pub category: IdentifierCategory,
    pub original_value: String,
}

/// Ordered mapping table produced by one redaction pass. Insertion order
/// is the order of first occurrence in the source text. Call-scoped:
/// never persisted in identifying form.
pub type RedactionMapping = Vec<RedactionEntry>;

/// The output of one redaction pass: the scrubbed text plus the mapping
/// needed to reverse it.
///
/// Invariant: `scrubbed_text` contains zero whole-token occurrences of
/// any surface form of any populated identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubResult {
    pub scrubbed_text: String,
    pub mapping: RedactionMapping,
}
