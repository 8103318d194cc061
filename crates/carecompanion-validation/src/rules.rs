//! One function per field rule. Range boundaries are inclusive.
//!
//! Values are trimmed before parsing. Input that does not parse as the
//! expected number fails with [`FailureKind::Format`], never `Range`.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::ValidationResult;
use crate::error::FailureKind;

static PARTICIPANT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("participant id pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+\-\s()]+$").expect("phone pattern"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern"));

pub const MAX_PLAUSIBLE_INCOME: i64 = 1_000_000;

fn parse<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

fn parse_finite(raw: &str) -> Option<f64> {
    parse::<f64>(raw).filter(|v| v.is_finite())
}

pub fn validate_participant_id(raw: &str) -> ValidationResult {
    let pid = raw.trim();
    if pid.is_empty() {
        ValidationResult::fail(FailureKind::Required, "Participant ID is required")
    } else if pid.chars().count() < 3 {
        ValidationResult::fail(
            FailureKind::Format,
            "Participant ID must be at least 3 characters",
        )
    } else if !PARTICIPANT_ID.is_match(pid) {
        ValidationResult::fail(
            FailureKind::Pattern,
            "Participant ID can only contain letters, numbers, hyphens, and underscores",
        )
    } else {
        ValidationResult::ok()
    }
}

pub fn validate_age(raw: &str) -> ValidationResult {
    match parse::<i64>(raw) {
        None => ValidationResult::fail(FailureKind::Format, "Please enter a valid age"),
        Some(age) if !(1..=120).contains(&age) => {
            ValidationResult::fail(FailureKind::Range, "Age must be between 1 and 120")
        }
        Some(_) => ValidationResult::ok(),
    }
}

/// Optional: blank passes.
pub fn validate_phone(raw: &str) -> ValidationResult {
    let phone = raw.trim();
    if phone.is_empty() {
        ValidationResult::ok()
    } else if phone.chars().count() < 10 {
        ValidationResult::fail(
            FailureKind::Format,
            "Phone number must be at least 10 digits",
        )
    } else if !PHONE.is_match(phone) {
        ValidationResult::fail(
            FailureKind::Pattern,
            "Phone number contains invalid characters",
        )
    } else {
        ValidationResult::ok()
    }
}

pub fn validate_blood_pressure(systolic: &str, diastolic: &str) -> ValidationResult {
    let (Some(sys), Some(dia)) = (parse::<i64>(systolic), parse::<i64>(diastolic)) else {
        return ValidationResult::fail(
            FailureKind::Format,
            "Please enter valid blood pressure values",
        );
    };

    if !(50..=300).contains(&sys) {
        ValidationResult::fail(FailureKind::Range, "Systolic BP must be between 50-300")
    } else if !(30..=200).contains(&dia) {
        ValidationResult::fail(FailureKind::Range, "Diastolic BP must be between 30-200")
    } else if sys <= dia {
        ValidationResult::fail(
            FailureKind::Range,
            "Systolic BP must exceed diastolic BP",
        )
    } else {
        ValidationResult::ok()
    }
}

pub fn validate_height(raw: &str) -> ValidationResult {
    match parse_finite(raw) {
        None => ValidationResult::fail(FailureKind::Format, "Please enter a valid height in cm"),
        Some(cm) if !(50.0..=250.0).contains(&cm) => {
            ValidationResult::fail(FailureKind::Range, "Height must be between 50 and 250 cm")
        }
        Some(_) => ValidationResult::ok(),
    }
}

pub fn validate_weight(raw: &str) -> ValidationResult {
    match parse_finite(raw) {
        None => ValidationResult::fail(FailureKind::Format, "Please enter a valid weight in kg"),
        Some(kg) if !(10.0..=300.0).contains(&kg) => {
            ValidationResult::fail(FailureKind::Range, "Weight must be between 10 and 300 kg")
        }
        Some(_) => ValidationResult::ok(),
    }
}

/// Above [`MAX_PLAUSIBLE_INCOME`] fails as implausible rather than out of range.
pub fn validate_income(raw: &str) -> ValidationResult {
    match parse::<i64>(raw) {
        None => ValidationResult::fail(FailureKind::Format, "Please enter a valid income amount"),
        Some(income) if income < 0 => {
            ValidationResult::fail(FailureKind::Range, "Income cannot be negative")
        }
        Some(income) if income > MAX_PLAUSIBLE_INCOME => {
            ValidationResult::fail(FailureKind::Implausible, "Income seems unusually high")
        }
        Some(_) => ValidationResult::ok(),
    }
}

pub fn validate_household_size(raw: &str) -> ValidationResult {
    match parse::<i64>(raw) {
        None => ValidationResult::fail(
            FailureKind::Format,
            "Please enter a valid household size",
        ),
        Some(size) if size < 1 => ValidationResult::fail(
            FailureKind::Range,
            "Household must have at least 1 member",
        ),
        Some(size) if size > 50 => ValidationResult::fail(
            FailureKind::Range,
            "Household size cannot exceed 50",
        ),
        Some(_) => ValidationResult::ok(),
    }
}

pub fn validate_pin(raw: &str) -> ValidationResult {
    let pin = raw.trim();
    let len = pin.chars().count();
    if pin.is_empty() {
        ValidationResult::fail(FailureKind::Required, "PIN is required")
    } else if !DIGITS.is_match(pin) {
        ValidationResult::fail(FailureKind::Pattern, "PIN must contain only numbers")
    } else if len < 4 {
        ValidationResult::fail(FailureKind::Format, "PIN must be at least 4 digits")
    } else if len > 8 {
        ValidationResult::fail(FailureKind::Format, "PIN must be no more than 8 digits")
    } else {
        ValidationResult::ok()
    }
}

/// Optional: blank passes.
pub fn validate_email(raw: &str) -> ValidationResult {
    let email = raw.trim();
    if email.is_empty() || EMAIL.is_match(email) {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(FailureKind::Pattern, "Please enter a valid email address")
    }
}

/// 1 (poor) to 5 (excellent).
pub fn validate_self_rated_health(raw: &str) -> ValidationResult {
    match parse::<i64>(raw) {
        None => ValidationResult::fail(
            FailureKind::Format,
            "Please enter a self-rated health score",
        ),
        Some(score) if !(1..=5).contains(&score) => ValidationResult::fail(
            FailureKind::Range,
            "Self-rated health must be between 1 and 5",
        ),
        Some(_) => ValidationResult::ok(),
    }
}

pub fn validate_required_text(label: &str, raw: &str) -> ValidationResult {
    let text = raw.trim();
    if text.is_empty() {
        ValidationResult::fail(FailureKind::Required, format!("{label} is required"))
    } else if text.chars().count() < 2 {
        ValidationResult::fail(
            FailureKind::Format,
            format!("{label} must be at least 2 characters"),
        )
    } else {
        ValidationResult::ok()
    }
}
