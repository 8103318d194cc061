use std::collections::BTreeMap;

use carecompanion_validation::form::{field, validate_form};
use carecompanion_validation::FailureKind;

fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn complete_valid_form_has_no_errors() {
    let fields = form(&[
        ("pid", "PID-001"),
        ("age", "68"),
        ("height", "160"),
        ("weight", "55.5"),
        ("blood_pressure_systolic", "130"),
        ("blood_pressure_diastolic", "85"),
        ("monthly_income", "12000"),
        ("household_size", "5"),
        ("self_rated_health", "3"),
        ("village", "Tumkur"),
    ]);

    assert!(validate_form(&fields).is_empty());
}

#[test]
fn participant_id_is_always_required() {
    let errors = validate_form(&form(&[("age", "70")]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, field::PARTICIPANT_ID);
    assert_eq!(errors[0].kind, FailureKind::Required);
}

#[test]
fn blank_optional_fields_are_skipped() {
    let fields = form(&[("pid", "PID-001"), ("age", " "), ("phone", ""), ("email", "")]);
    assert!(validate_form(&fields).is_empty());
}

#[test]
fn every_failing_field_is_reported() {
    let fields = form(&[
        ("pid", "P1"),
        ("age", "abc"),
        ("blood_pressure_systolic", "80"),
        ("blood_pressure_diastolic", "120"),
        ("monthly_income", "5000000"),
    ]);

    let errors = validate_form(&fields);
    let reported: Vec<(&str, FailureKind)> = errors
        .iter()
        .map(|e| (e.field.as_str(), e.kind))
        .collect();

    assert_eq!(
        reported,
        vec![
            (field::PARTICIPANT_ID, FailureKind::Format),
            (field::AGE, FailureKind::Format),
            (field::MONTHLY_INCOME, FailureKind::Implausible),
            (field::BLOOD_PRESSURE, FailureKind::Range),
        ]
    );
}

#[test]
fn half_entered_blood_pressure_is_a_format_error() {
    let fields = form(&[("pid", "PID-001"), ("blood_pressure_systolic", "120")]);
    let errors = validate_form(&fields);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, field::BLOOD_PRESSURE);
    assert_eq!(errors[0].kind, FailureKind::Format);
}
