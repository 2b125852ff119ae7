use celara_core::models::identifiers::PatientIdentifiers;
use celara_core::models::redaction::IdentifierCategory;
use celara_deid::redact::{redact, verify_scrubbed};

fn jane() -> PatientIdentifiers {
    PatientIdentifiers {
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        phone: Some("555-0100".to_string()),
        ..Default::default()
    }
}

#[test]
fn simple_substitution_scenario() {
    let source = "Jane Doe called about her visit, reachable at 555-0100.";
    let result = redact(source, &jane());

    assert!(!result.scrubbed_text.contains("Jane"));
    assert!(!result.scrubbed_text.contains("Doe"));
    assert!(!result.scrubbed_text.contains("555-0100"));

    assert_eq!(
        result.scrubbed_text,
        "[NAME-1] [NAME-2] called about her visit, reachable at [PHONE-1]."
    );

    // One entry per distinct value actually found, in first-occurrence order.
    assert_eq!(result.mapping.len(), 3);
    assert_eq!(result.mapping[0].original_value, "Jane");
    assert_eq!(result.mapping[1].original_value, "Doe");
    assert_eq!(result.mapping[2].original_value, "555-0100");

    // Two placeholder families: NAME and PHONE.
    let categories: Vec<_> = result.mapping.iter().map(|e| e.category).collect();
    assert_eq!(
        categories,
        vec![
            IdentifierCategory::Name,
            IdentifierCategory::Name,
            IdentifierCategory::Phone
        ]
    );

    assert!(verify_scrubbed(&result, &jane()).is_ok());
}

#[test]
fn empty_text_yields_empty_mapping() {
    let result = redact("", &jane());
    assert_eq!(result.scrubbed_text, "");
    assert!(result.mapping.is_empty());
}

#[test]
fn empty_identifiers_yield_text_unchanged() {
    let source = "Patient presented with mild dyspnea.";
    let result = redact(source, &PatientIdentifiers::default());
    assert_eq!(result.scrubbed_text, source);
    assert!(result.mapping.is_empty());
}

#[test]
fn partial_identifiers_with_no_match_yield_text_unchanged() {
    let identifiers = PatientIdentifiers {
        date_of_birth: Some("1958-03-07".to_string()),
        ..Default::default()
    };
    let source = "Follow-up scheduled for next week.";
    let result = redact(source, &identifiers);
    assert_eq!(result.scrubbed_text, source);
    assert!(result.mapping.is_empty());
}

#[test]
fn matching_is_case_insensitive_and_restores_canonical_casing() {
    let result = redact("JANE doe and jane DOE.", &jane());
    assert_eq!(result.scrubbed_text, "[NAME-1] [NAME-2] and [NAME-1] [NAME-2].");
    assert_eq!(result.mapping.len(), 2);
    assert_eq!(result.mapping[0].original_value, "Jane");
}

#[test]
fn all_occurrences_share_one_placeholder() {
    let result = redact("Jane, Jane, and Jane again.", &jane());
    assert_eq!(
        result.scrubbed_text,
        "[NAME-1], [NAME-1], and [NAME-1] again."
    );
    // Per-value entries, never per-occurrence.
    assert_eq!(result.mapping.len(), 1);
}

#[test]
fn name_inside_longer_word_is_not_matched() {
    let identifiers = PatientIdentifiers {
        first_name: Some("Don".to_string()),
        ..Default::default()
    };
    let result = redact("Donald was seen today. Don agreed.", &identifiers);
    assert_eq!(result.scrubbed_text, "Donald was seen today. [NAME-1] agreed.");
}

#[test]
fn possessive_and_punctuation_adjacent_names_match() {
    let result = redact("Reviewed Jane's chart (Doe, Jane).", &jane());
    assert_eq!(
        result.scrubbed_text,
        "Reviewed [NAME-1]'s chart ([NAME-2], [NAME-1])."
    );
}

#[test]
fn mapping_order_follows_first_occurrence_not_field_order() {
    let result = redact("Doe, Jane; cell 555-0100.", &jane());
    assert_eq!(result.mapping[0].original_value, "Doe");
    assert_eq!(result.mapping[0].placeholder, "[NAME-1]");
    assert_eq!(result.mapping[1].original_value, "Jane");
    assert_eq!(result.mapping[1].placeholder, "[NAME-2]");
    assert_eq!(result.mapping[2].placeholder, "[PHONE-1]");
}

#[test]
fn longer_form_wins_over_contained_shorter_form() {
    let identifiers = PatientIdentifiers {
        first_name: Some("Rue".to_string()),
        postal_address: Some("12 Rue Verte, Lyon".to_string()),
        ..Default::default()
    };
    let result = redact("Sent letter to 12 Rue Verte, Lyon. Rue signed it.", &identifiers);
    assert_eq!(
        result.scrubbed_text,
        "Sent letter to [ADDRESS-1]. [NAME-1] signed it."
    );
    assert_eq!(result.mapping.len(), 2);
    assert_eq!(result.mapping[0].category, IdentifierCategory::Address);
}

#[test]
fn variant_forms_collapse_to_one_entry() {
    let identifiers = PatientIdentifiers {
        date_of_birth: Some("1958-03-07".to_string()),
        ..Default::default()
    };
    let result = redact(
        "DOB 1958-03-07; patient born March 7, 1958 (also noted 03/07/1958).",
        &identifiers,
    );
    assert_eq!(
        result.scrubbed_text,
        "DOB [DOB-1]; patient born [DOB-1] (also noted [DOB-1])."
    );
    assert_eq!(result.mapping.len(), 1);
    assert_eq!(result.mapping[0].original_value, "1958-03-07");
}

#[test]
fn phone_variants_collapse_to_one_entry() {
    let identifiers = PatientIdentifiers {
        phone: Some("(555) 867-5309".to_string()),
        ..Default::default()
    };
    let result = redact(
        "Call (555) 867-5309 or 555.867.5309; pager notes 5558675309.",
        &identifiers,
    );
    assert_eq!(
        result.scrubbed_text,
        "Call [PHONE-1] or [PHONE-1]; pager notes [PHONE-1]."
    );
    assert_eq!(result.mapping.len(), 1);
    assert_eq!(result.mapping[0].original_value, "(555) 867-5309");
}

#[test]
fn identical_value_in_two_categories_is_claimed_once() {
    // A payer ID numerically equal to the phone number: whichever
    // category's form is processed first claims the occurrences; the
    // other produces no entry. An occurrence carries one placeholder.
    let identifiers = PatientIdentifiers {
        payer_id: Some("5550100".to_string()),
        phone: Some("5550100".to_string()),
        ..Default::default()
    };
    let result = redact("Member 5550100 on file.", &identifiers);
    assert_eq!(result.mapping.len(), 1);
    assert_eq!(result.mapping[0].category, IdentifierCategory::PayerId);
    assert_eq!(result.scrubbed_text, "Member [PAYER-ID-1] on file.");
}

#[test]
fn placeholder_text_is_opaque_to_later_candidates() {
    // A patient literally named "Name" must not corrupt the NAME
    // placeholder tokens inserted for the other field.
    let identifiers = PatientIdentifiers {
        first_name: Some("Janet".to_string()),
        last_name: Some("Name".to_string()),
        ..Default::default()
    };
    let result = redact("Janet Name checked in.", &identifiers);
    assert_eq!(result.scrubbed_text, "[NAME-1] [NAME-2] checked in.");
    assert!(verify_scrubbed(&result, &identifiers).is_ok());
}

#[test]
fn verify_scrubbed_flags_a_leak() {
    let result = redact("Jane Doe visited.", &jane());
    let mut tampered = result.clone();
    tampered.scrubbed_text = "Jane [NAME-2] visited.".to_string();

    let err = verify_scrubbed(&tampered, &jane()).expect_err("leak must be fatal");
    let message = err.to_string();
    // The error names the category, never the value.
    assert!(message.contains("NAME"));
    assert!(!message.contains("Jane"));
}

#[test]
fn unicode_names_match_case_insensitively() {
    let identifiers = PatientIdentifiers {
        first_name: Some("José".to_string()),
        ..Default::default()
    };
    let result = redact("JOSÉ arrived; josé left.", &identifiers);
    assert_eq!(result.scrubbed_text, "[NAME-1] arrived; [NAME-1] left.");
}
