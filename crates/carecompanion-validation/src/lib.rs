//! carecompanion-validation
//!
//! Field-level validation applied before collected input is accepted.
//! Each rule checks one field independently; blood pressure is the only
//! rule that looks at two values.

pub mod error;
pub mod form;
pub mod rules;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub use error::{FailureKind, FieldError};

/// The fields with a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    ParticipantId,
    Age,
    Phone,
    BloodPressure,
    Height,
    Weight,
    Income,
    HouseholdSize,
    Pin,
    Email,
    SelfRatedHealth,
    RequiredText,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::ParticipantId => "participant_id",
            FieldKind::Age => "age",
            FieldKind::Phone => "phone",
            FieldKind::BloodPressure => "blood_pressure",
            FieldKind::Height => "height",
            FieldKind::Weight => "weight",
            FieldKind::Income => "income",
            FieldKind::HouseholdSize => "household_size",
            FieldKind::Pin => "pin",
            FieldKind::Email => "email",
            FieldKind::SelfRatedHealth => "self_rated_health",
            FieldKind::RequiredText => "required_text",
        }
    }
}

/// Pass/fail plus a user-facing message. Computed per field per interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
    pub failure: Option<FailureKind>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
            failure: None,
        }
    }

    pub fn fail(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            failure: Some(kind),
        }
    }

    /// Convert into a `Result`, tagging the failure with the field it belongs to.
    pub fn into_result(self, field: impl Into<String>) -> Result<(), FieldError> {
        if self.valid {
            return Ok(());
        }
        Err(FieldError {
            field: field.into(),
            kind: self.failure.unwrap_or(FailureKind::Format),
            message: self.message.unwrap_or_default(),
        })
    }
}

/// A raw value tagged with the rule that applies to it.
#[derive(Debug, Clone, Copy)]
pub enum FieldInput<'a> {
    ParticipantId(&'a str),
    Age(&'a str),
    Phone(&'a str),
    BloodPressure { systolic: &'a str, diastolic: &'a str },
    Height(&'a str),
    Weight(&'a str),
    Income(&'a str),
    HouseholdSize(&'a str),
    Pin(&'a str),
    Email(&'a str),
    SelfRatedHealth(&'a str),
    RequiredText { label: &'a str, value: &'a str },
}

impl FieldInput<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldInput::ParticipantId(_) => FieldKind::ParticipantId,
            FieldInput::Age(_) => FieldKind::Age,
            FieldInput::Phone(_) => FieldKind::Phone,
            FieldInput::BloodPressure { .. } => FieldKind::BloodPressure,
            FieldInput::Height(_) => FieldKind::Height,
            FieldInput::Weight(_) => FieldKind::Weight,
            FieldInput::Income(_) => FieldKind::Income,
            FieldInput::HouseholdSize(_) => FieldKind::HouseholdSize,
            FieldInput::Pin(_) => FieldKind::Pin,
            FieldInput::Email(_) => FieldKind::Email,
            FieldInput::SelfRatedHealth(_) => FieldKind::SelfRatedHealth,
            FieldInput::RequiredText { .. } => FieldKind::RequiredText,
        }
    }
}

/// Apply the rule for one field.
pub fn validate(input: FieldInput<'_>) -> ValidationResult {
    match input {
        FieldInput::ParticipantId(v) => rules::validate_participant_id(v),
        FieldInput::Age(v) => rules::validate_age(v),
        FieldInput::Phone(v) => rules::validate_phone(v),
        FieldInput::BloodPressure {
            systolic,
            diastolic,
        } => rules::validate_blood_pressure(systolic, diastolic),
        FieldInput::Height(v) => rules::validate_height(v),
        FieldInput::Weight(v) => rules::validate_weight(v),
        FieldInput::Income(v) => rules::validate_income(v),
        FieldInput::HouseholdSize(v) => rules::validate_household_size(v),
        FieldInput::Pin(v) => rules::validate_pin(v),
        FieldInput::Email(v) => rules::validate_email(v),
        FieldInput::SelfRatedHealth(v) => rules::validate_self_rated_health(v),
        FieldInput::RequiredText { label, value } => rules::validate_required_text(label, value),
    }
}
