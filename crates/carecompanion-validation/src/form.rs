//! Whole-form validation over a raw key → value map.
//!
//! `pid` is always checked. Every other known key is checked only when it
//! carries a non-blank value; which fields are mandatory for a given visit
//! is decided by the caller.

use std::collections::BTreeMap;

use crate::error::FieldError;
use crate::{FieldInput, validate};

pub mod field {
    pub const PARTICIPANT_ID: &str = "pid";
    pub const AGE: &str = "age";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const HEIGHT: &str = "height";
    pub const WEIGHT: &str = "weight";
    pub const BP_SYSTOLIC: &str = "blood_pressure_systolic";
    pub const BP_DIASTOLIC: &str = "blood_pressure_diastolic";
    pub const BLOOD_PRESSURE: &str = "blood_pressure";
    pub const MONTHLY_INCOME: &str = "monthly_income";
    pub const HOUSEHOLD_SIZE: &str = "household_size";
    pub const SELF_RATED_HEALTH: &str = "self_rated_health";
    pub const MOBILITY_AID: &str = "mobility_aid";
    pub const CHRONIC_CONDITIONS: &str = "chronic_conditions";
}

fn present<'a>(fields: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// Collect every field error in the form. Empty means the form is acceptable.
pub fn validate_form<'a>(fields: &'a BTreeMap<String, String>) -> Vec<FieldError> {
    let mut checks: Vec<(&str, FieldInput<'a>)> = vec![(
        field::PARTICIPANT_ID,
        FieldInput::ParticipantId(present(fields, field::PARTICIPANT_ID).unwrap_or_default()),
    )];

    let single: [(&str, fn(&'a str) -> FieldInput<'a>); 8] = [
        (field::AGE, FieldInput::Age),
        (field::PHONE, FieldInput::Phone),
        (field::EMAIL, FieldInput::Email),
        (field::HEIGHT, FieldInput::Height),
        (field::WEIGHT, FieldInput::Weight),
        (field::MONTHLY_INCOME, FieldInput::Income),
        (field::HOUSEHOLD_SIZE, FieldInput::HouseholdSize),
        (field::SELF_RATED_HEALTH, FieldInput::SelfRatedHealth),
    ];
    for (key, make) in single {
        if let Some(value) = present(fields, key) {
            checks.push((key, make(value)));
        }
    }

    let systolic = present(fields, field::BP_SYSTOLIC);
    let diastolic = present(fields, field::BP_DIASTOLIC);
    if systolic.is_some() || diastolic.is_some() {
        checks.push((
            field::BLOOD_PRESSURE,
            FieldInput::BloodPressure {
                systolic: systolic.unwrap_or_default(),
                diastolic: diastolic.unwrap_or_default(),
            },
        ));
    }

    checks
        .into_iter()
        .filter_map(|(key, input)| validate(input).into_result(key).err())
        .collect()
}
