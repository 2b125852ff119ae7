use celara_core::models::identifiers::PatientIdentifiers;
use celara_core::models::redaction::{IdentifierCategory, RedactionEntry};
use celara_deid::redact::redact;
use celara_deid::reidentify::reidentify;

fn entry(placeholder: &str, category: IdentifierCategory, value: &str) -> RedactionEntry {
    RedactionEntry {
        placeholder: placeholder.to_string(),
        category,
        original_value: value.to_string(),
    }
}

#[test]
fn substitutes_every_occurrence() {
    let mapping = vec![
        entry("[NAME-1]", IdentifierCategory::Name, "Jane"),
        entry("[PHONE-1]", IdentifierCategory::Phone, "555-0100"),
    ];
    let output = "[NAME-1] should be called at [PHONE-1]. [NAME-1] prefers mornings.";
    assert_eq!(
        reidentify(output, &mapping),
        "Jane should be called at 555-0100. Jane prefers mornings."
    );
}

#[test]
fn unused_mapping_entries_are_not_an_error() {
    let mapping = vec![
        entry("[NAME-1]", IdentifierCategory::Name, "Jane"),
        entry("[EMAIL-1]", IdentifierCategory::Email, "jane@example.com"),
    ];
    // The model paraphrased the email away entirely.
    assert_eq!(
        reidentify("[NAME-1] was seen today.", &mapping),
        "Jane was seen today."
    );
}

#[test]
fn unknown_token_like_substrings_are_left_untouched() {
    let mapping = vec![entry("[NAME-1]", IdentifierCategory::Name, "Jane")];
    assert_eq!(
        reidentify("[NAME-1] and [NAME-2] and [LAB-1]", &mapping),
        "Jane and [NAME-2] and [LAB-1]"
    );
}

#[test]
fn empty_mapping_is_a_no_op() {
    assert_eq!(reidentify("Nothing to restore.", &[]), "Nothing to restore.");
}

#[test]
fn reidentification_is_idempotent() {
    let mapping = vec![
        entry("[NAME-1]", IdentifierCategory::Name, "Jane"),
        entry("[DOB-1]", IdentifierCategory::DateOfBirth, "1958-03-07"),
    ];
    let output = "[NAME-1], born [DOB-1], was discharged.";
    let once = reidentify(output, &mapping);
    let twice = reidentify(&once, &mapping);
    assert_eq!(once, twice);
}

#[test]
fn double_digit_ordinals_do_not_collide() {
    let mapping = vec![
        entry("[NAME-1]", IdentifierCategory::Name, "Jane"),
        entry("[NAME-11]", IdentifierCategory::Name, "Marisol"),
    ];
    assert_eq!(
        reidentify("[NAME-11] then [NAME-1]", &mapping),
        "Marisol then Jane"
    );
}

#[test]
fn roundtrip_through_identity_gateway_reproduces_source() {
    let identifiers = PatientIdentifiers {
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        date_of_birth: Some("1958-03-07".to_string()),
        payer_id: Some("ZA48-1177".to_string()),
        phone: Some("(555) 867-5309".to_string()),
        email: Some("jane.doe@example.com".to_string()),
        postal_address: Some("12 Rue Verte, Lyon".to_string()),
    };
    let source = "Jane Doe (DOB 1958-03-07, member ZA48-1177) lives at \
                  12 Rue Verte, Lyon. Contact: (555) 867-5309 or \
                  jane.doe@example.com. Doe reports improvement.";

    let result = redact(source, &identifiers);
    for value in [
        "Jane",
        "Doe",
        "1958-03-07",
        "ZA48-1177",
        "867",
        "jane.doe@example.com",
        "Rue Verte",
    ] {
        assert!(
            !result.scrubbed_text.contains(value),
            "scrubbed text leaked {value}: {}",
            result.scrubbed_text
        );
    }

    // Model gateway replaced with the identity function.
    assert_eq!(reidentify(&result.scrubbed_text, &result.mapping), source);
}

#[test]
fn roundtrip_with_empty_identifiers_is_exact() {
    let source = "No identifiers on file for this narrative.";
    let result = redact(source, &PatientIdentifiers::default());
    assert_eq!(reidentify(&result.scrubbed_text, &result.mapping), source);
}
