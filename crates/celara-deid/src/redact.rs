//! Redaction: replace every occurrence of a patient's known identifying
//! values with stable placeholder tokens.
//!
//! # Matching rules
//!
//! - Candidate surface forms are substituted **longest first**, so a
//!   short form that is a substring of a longer one (a first name inside
//!   an address, a bare digit string inside a punctuated phone number)
//!   never claims text a more specific form should own.
//! - Matches are case-insensitive and **whole-token**: the characters
//!   adjacent to a match must be absent or non-alphanumeric. Possessives
//!   and punctuation-adjacent values match; a name inside a longer word
//!   does not.
//! - Placeholder regions already inserted are opaque — they are never
//!   re-scanned, so no later form can corrupt an earlier substitution.
//!
//! One placeholder is allocated per logical identifier, covering every
//! occurrence of every variant of that value. Identifiers never found in
//! the text produce no mapping entry.

use std::collections::HashMap;

use tracing::debug;

use celara_core::models::identifiers::PatientIdentifiers;
use celara_core::models::redaction::{IdentifierCategory, RedactionEntry, ScrubResult};

use crate::error::DeidError;
use crate::normalize::{LogicalIdentifier, surface_forms};

/// Working representation of the text mid-redaction: raw segments
/// interleaved with opaque placeholder slots.
enum Segment {
    /// A run of original text. `source_pos` is the byte offset of its
    /// first character in the source string; offsets stay valid because
    /// raw text is only ever split, never rewritten.
    Text { content: String, source_pos: usize },
    /// Placeholder slot for the identifier at this index, rendered once
    /// mapping order is known.
    Slot(usize),
}

/// Scrub `source_text` of every known identifying value.
///
/// Never fails: an empty text or an identifier set with nothing usable
/// yields the text unchanged and an empty mapping. The mapping is
/// ordered by first occurrence in the source text, with per-category
/// placeholder ordinals assigned in that order.
pub fn redact(source_text: &str, identifiers: &PatientIdentifiers) -> ScrubResult {
    let identifiers = surface_forms(identifiers);
    if source_text.is_empty() || identifiers.is_empty() {
        return ScrubResult {
            scrubbed_text: source_text.to_string(),
            mapping: Vec::new(),
        };
    }

    let candidates = sorted_candidates(&identifiers);

    let mut segments = vec![Segment::Text {
        content: source_text.to_string(),
        source_pos: 0,
    }];
    // Earliest source offset at which each identifier matched.
    let mut first_hit: Vec<Option<usize>> = vec![None; identifiers.len()];

    for (ident_idx, form) in candidates {
        segments = substitute(segments, ident_idx, form, &mut first_hit);
    }

    let (mapping, placeholder_for) = build_mapping(&identifiers, &first_hit);

    let mut scrubbed_text = String::with_capacity(source_text.len());
    for segment in &segments {
        match segment {
            Segment::Text { content, .. } => scrubbed_text.push_str(content),
            Segment::Slot(idx) => {
                scrubbed_text.push_str(placeholder_for[*idx].as_deref().unwrap_or(""));
            }
        }
    }

    debug!(
        identifiers = identifiers.len(),
        entries = mapping.len(),
        "redaction complete"
    );

    ScrubResult {
        scrubbed_text,
        mapping,
    }
}

/// Fail-closed invariant check: re-scan scrubbed text for any remaining
/// whole-token occurrence of any surface form. A hit is fatal to the
/// call. The error names the category only.
///
/// Placeholder tokens are masked out before scanning; their literal text
/// must stay as opaque here as it is during redaction (a patient whose
/// surname is "Name" must not trip on `[NAME-1]`).
pub fn verify_scrubbed(
    result: &ScrubResult,
    identifiers: &PatientIdentifiers,
) -> Result<(), DeidError> {
    let mut masked = result.scrubbed_text.clone();
    for entry in &result.mapping {
        masked = masked.replace(&entry.placeholder, " ");
    }

    for identifier in surface_forms(identifiers) {
        for form in &identifier.forms {
            if !find_matches(&masked, form).is_empty() {
                return Err(DeidError::LeakDetected {
                    category: identifier.category,
                });
            }
        }
    }
    Ok(())
}

/// Flatten identifiers into `(identifier index, form)` candidates sorted
/// by descending form length. The sort is stable, so equal-length forms
/// keep normalizer emission order — that is the deterministic tie-break
/// when two categories hold textually identical values.
fn sorted_candidates(identifiers: &[LogicalIdentifier]) -> Vec<(usize, &str)> {
    let mut candidates: Vec<(usize, &str)> = identifiers
        .iter()
        .enumerate()
        .flat_map(|(idx, ident)| ident.forms.iter().map(move |f| (idx, f.as_str())))
        .collect();
    candidates.sort_by(|a, b| b.1.chars().count().cmp(&a.1.chars().count()));
    candidates
}

/// Replace every whole-token occurrence of `form` across the text
/// segments with a slot for `ident_idx`, splitting segments around the
/// matches. Slot segments pass through untouched.
fn substitute(
    segments: Vec<Segment>,
    ident_idx: usize,
    form: &str,
    first_hit: &mut [Option<usize>],
) -> Vec<Segment> {
    let mut next = Vec::with_capacity(segments.len());

    for segment in segments {
        let (content, source_pos) = match segment {
            Segment::Slot(idx) => {
                next.push(Segment::Slot(idx));
                continue;
            }
            Segment::Text {
                content,
                source_pos,
            } => (content, source_pos),
        };

        let ranges = find_matches(&content, form);
        if ranges.is_empty() {
            next.push(Segment::Text {
                content,
                source_pos,
            });
            continue;
        }

        let mut cursor = 0usize;
        for (start, end) in ranges {
            let hit_pos = source_pos + start;
            if first_hit[ident_idx].is_none_or(|p| hit_pos < p) {
                first_hit[ident_idx] = Some(hit_pos);
            }
            if start > cursor {
                next.push(Segment::Text {
                    content: content[cursor..start].to_string(),
                    source_pos: source_pos + cursor,
                });
            }
            next.push(Segment::Slot(ident_idx));
            cursor = end;
        }
        if cursor < content.len() {
            next.push(Segment::Text {
                content: content[cursor..].to_string(),
                source_pos: source_pos + cursor,
            });
        }
    }

    next
}

/// Find every non-overlapping, case-insensitive, whole-token occurrence
/// of `form` in `text`. Returns byte ranges in ascending order.
fn find_matches(text: &str, form: &str) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let form_chars: Vec<char> = form.chars().collect();
    if form_chars.is_empty() || form_chars.len() > chars.len() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    let mut i = 0;
    while i + form_chars.len() <= chars.len() {
        if let Some(end) = match_at(&chars, i, &form_chars) {
            let start_bounded = i == 0 || !chars[i - 1].1.is_alphanumeric();
            let end_bounded = end == chars.len() || !chars[end].1.is_alphanumeric();
            if start_bounded && end_bounded {
                let byte_start = chars[i].0;
                let byte_end = if end == chars.len() {
                    text.len()
                } else {
                    chars[end].0
                };
                matches.push((byte_start, byte_end));
                i = end;
                continue;
            }
        }
        i += 1;
    }

    matches
}

/// Case-insensitively match `form` against `chars` starting at `at`.
/// Returns the char index one past the match.
fn match_at(chars: &[(usize, char)], at: usize, form: &[char]) -> Option<usize> {
    for (offset, &expected) in form.iter().enumerate() {
        let (_, actual) = chars[at + offset];
        if !chars_eq_fold(actual, expected) {
            return None;
        }
    }
    Some(at + form.len())
}

fn chars_eq_fold(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Assemble the mapping in first-occurrence order and assign per-category
/// ordinals in that order. Returns the mapping plus each identifier's
/// rendered placeholder (None for identifiers never found).
fn build_mapping(
    identifiers: &[LogicalIdentifier],
    first_hit: &[Option<usize>],
) -> (Vec<RedactionEntry>, Vec<Option<String>>) {
    let mut found: Vec<(usize, usize)> = first_hit
        .iter()
        .enumerate()
        .filter_map(|(idx, pos)| pos.map(|p| (idx, p)))
        .collect();
    found.sort_by_key(|&(_, pos)| pos);

    let mut ordinals: HashMap<IdentifierCategory, usize> = HashMap::new();
    let mut placeholder_for: Vec<Option<String>> = vec![None; identifiers.len()];
    let mut mapping = Vec::with_capacity(found.len());

    for (idx, _) in found {
        let identifier = &identifiers[idx];
        let ordinal = ordinals.entry(identifier.category).or_insert(0);
        *ordinal += 1;
        let placeholder = identifier.category.placeholder(*ordinal);
        placeholder_for[idx] = Some(placeholder.clone());
        mapping.push(RedactionEntry {
            placeholder,
            category: identifier.category,
            original_value: identifier.canonical.clone(),
        });
    }

    (mapping, placeholder_for)
}
