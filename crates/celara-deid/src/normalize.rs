//! Identifier normalization.
//!
//! Expands a patient's known identifying values into the set of textual
//! surface forms they might appear under in narrative text: date format
//! variants, punctuated and bare phone renderings, and the raw values
//! themselves. Case variants are not generated; matching is
//! case-insensitive in the redactor.

use jiff::civil::Date;

use celara_core::models::identifiers::PatientIdentifiers;
use celara_core::models::redaction::IdentifierCategory;

/// Minimum character length for a surface form. Anything shorter would
/// mass-redact common substrings ("a", initials, single digits).
pub const MIN_FORM_LEN: usize = 2;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One identifying value together with every textual rendering it might
/// appear under. `canonical` is the value as held on file, and is what
/// re-identification restores, whichever variant matched.
#[derive(Debug, Clone)]
pub struct LogicalIdentifier {
    pub category: IdentifierCategory,
    pub canonical: String,
    pub forms: Vec<String>,
}

/// Expand a patient's identifiers into searchable surface forms.
///
/// Deterministic for identical input: no randomness, no I/O. Blank
/// fields produce nothing. Emission order is fixed (name fields, date of
/// birth, payer ID, phone, email, address) — the redactor's tie-breaking
/// depends on it being stable.
pub fn surface_forms(ids: &PatientIdentifiers) -> Vec<LogicalIdentifier> {
    let mut out = Vec::new();

    if let Some(name) = populated(&ids.first_name) {
        push(&mut out, IdentifierCategory::Name, name, vec![name.to_string()]);
    }
    if let Some(name) = populated(&ids.last_name) {
        push(&mut out, IdentifierCategory::Name, name, vec![name.to_string()]);
    }
    if let Some(raw) = populated(&ids.date_of_birth) {
        push(
            &mut out,
            IdentifierCategory::DateOfBirth,
            raw,
            date_forms(raw, ids.birth_date()),
        );
    }
    if let Some(raw) = populated(&ids.payer_id) {
        push(&mut out, IdentifierCategory::PayerId, raw, vec![raw.to_string()]);
    }
    if let Some(raw) = populated(&ids.phone) {
        push(&mut out, IdentifierCategory::Phone, raw, phone_forms(raw));
    }
    if let Some(raw) = populated(&ids.email) {
        push(&mut out, IdentifierCategory::Email, raw, vec![raw.to_string()]);
    }
    if let Some(raw) = populated(&ids.postal_address) {
        push(&mut out, IdentifierCategory::Address, raw, address_forms(raw));
    }

    out
}

/// Trimmed field value, or `None` for absent/blank fields.
fn populated(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Push one logical identifier, dropping too-short forms and duplicate
/// variants. An identifier whose every form is too short is skipped.
fn push(
    out: &mut Vec<LogicalIdentifier>,
    category: IdentifierCategory,
    canonical: &str,
    forms: Vec<String>,
) {
    let mut kept: Vec<String> = Vec::with_capacity(forms.len());
    for form in forms {
        if form.chars().count() < MIN_FORM_LEN {
            continue;
        }
        if !kept.contains(&form) {
            kept.push(form);
        }
    }
    if !kept.is_empty() {
        out.push(LogicalIdentifier {
            category,
            canonical: canonical.to_string(),
            forms: kept,
        });
    }
}

/// Date-of-birth renderings: the raw on-file string plus, when the raw
/// value parses as an ISO date, numeric and long-form variants.
fn date_forms(raw: &str, parsed: Option<Date>) -> Vec<String> {
    let mut forms = vec![raw.to_string()];

    if let Some(date) = parsed {
        let (y, m, d) = (date.year(), date.month(), date.day());
        let month = MONTH_NAMES[m as usize - 1];
        forms.push(format!("{y:04}-{m:02}-{d:02}"));
        forms.push(format!("{m:02}/{d:02}/{y:04}"));
        forms.push(format!("{m}/{d}/{y}"));
        forms.push(format!("{month} {d}, {y}"));
        forms.push(format!("{d} {month} {y}"));
        forms.push(format!("{} {d}, {y}", &month[..3]));
    }

    forms
}

/// Phone renderings: the raw on-file string, the bare digit string, and
/// the common punctuated layouts for 7-, 10-, and 11-digit numbers.
fn phone_forms(raw: &str) -> Vec<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let mut forms = vec![raw.to_string(), digits.clone()];

    match digits.len() {
        7 => {
            forms.push(format!("{}-{}", &digits[..3], &digits[3..]));
        }
        10 => {
            forms.extend(ten_digit_forms(&digits));
        }
        11 if digits.starts_with('1') => {
            let national = &digits[1..];
            forms.extend(ten_digit_forms(national));
            forms.push(format!(
                "+1 {}-{}-{}",
                &national[..3],
                &national[3..6],
                &national[6..]
            ));
            forms.push(format!(
                "1-{}-{}-{}",
                &national[..3],
                &national[3..6],
                &national[6..]
            ));
        }
        _ => {}
    }

    forms
}

fn ten_digit_forms(digits: &str) -> Vec<String> {
    let (area, prefix, line) = (&digits[..3], &digits[3..6], &digits[6..]);
    vec![
        format!("({area}) {prefix}-{line}"),
        format!("{area}-{prefix}-{line}"),
        format!("{area}.{prefix}.{line}"),
        format!("{area} {prefix} {line}"),
    ]
}

/// Address renderings: the raw value plus a whitespace-collapsed variant
/// (clinical notes often rewrap addresses across lines).
fn address_forms(raw: &str) -> Vec<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    vec![raw.to_string(), collapsed]
}
