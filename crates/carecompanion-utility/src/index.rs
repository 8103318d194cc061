use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Mobility aid category, matched case-insensitively from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
#[ts(export)]
pub enum MobilityAid {
    None,
    Cane,
    Walker,
    Wheelchair,
    /// Text that matched no known category. Neutral factor.
    Unrecognized(String),
}

impl MobilityAid {
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().to_lowercase();
        match normalized.as_str() {
            "none" => MobilityAid::None,
            "cane" | "walking stick" | "walking-stick" => MobilityAid::Cane,
            "walker" => MobilityAid::Walker,
            "wheelchair" => MobilityAid::Wheelchair,
            _ => MobilityAid::Unrecognized(text.trim().to_string()),
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            MobilityAid::None => 1.00,
            MobilityAid::Cane => 0.95,
            MobilityAid::Walker => 0.90,
            MobilityAid::Wheelchair => 0.85,
            MobilityAid::Unrecognized(_) => 1.00,
        }
    }
}

/// Chronic-condition keywords in priority order. Only the first match applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConditionKeyword {
    Diabetes,
    Hypertension,
    HeartDisease,
    Multiple,
}

impl ConditionKeyword {
    pub const PRIORITY: [ConditionKeyword; 4] = [
        ConditionKeyword::Diabetes,
        ConditionKeyword::Hypertension,
        ConditionKeyword::HeartDisease,
        ConditionKeyword::Multiple,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            ConditionKeyword::Diabetes => "diabetes",
            ConditionKeyword::Hypertension => "hypertension",
            ConditionKeyword::HeartDisease => "heart disease",
            ConditionKeyword::Multiple => "multiple",
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            ConditionKeyword::Diabetes => 0.95,
            ConditionKeyword::Hypertension => 0.96,
            ConditionKeyword::HeartDisease => 0.90,
            ConditionKeyword::Multiple => 0.85,
        }
    }

    /// First keyword in priority order contained in `text`, ignoring case.
    pub fn first_match(text: &str) -> Option<ConditionKeyword> {
        let lowered = text.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|k| lowered.contains(k.keyword()))
    }
}

/// Inputs to the utility model for a single visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UtilityInputs {
    pub age: i64,
    /// 1 (poor) to 5 (excellent). Out-of-range values are treated as 3.
    pub self_rated_health: i64,
    pub mobility_aid: MobilityAid,
    pub chronic_conditions_text: String,
}

pub fn age_factor(age: i64) -> f64 {
    match age {
        i64::MIN..50 => 1.00,
        50..60 => 0.95,
        60..70 => 0.90,
        70..80 => 0.85,
        _ => 0.80,
    }
}

pub fn health_factor(self_rated_health: i64) -> f64 {
    match self_rated_health {
        1 => 0.30,
        2 => 0.50,
        3 => 0.70,
        4 => 0.85,
        5 => 1.00,
        _ => 0.70,
    }
}

pub fn condition_factor(text: &str) -> f64 {
    ConditionKeyword::first_match(text).map_or(1.00, |k| k.factor())
}

/// Normalized composite health-status measure in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[serde(try_from = "f64")]
#[ts(export)]
pub struct UtilityIndex(f64);

impl TryFrom<f64> for UtilityIndex {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("utility index {value} is outside (0, 1]"))
    }
}

impl UtilityIndex {
    /// Accept a stored value if it lies in `(0, 1]`.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0 && value <= 1.0).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn interpretation(&self) -> Interpretation {
        Interpretation::of(self.0)
    }
}

impl fmt::Display for UtilityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Each factor of the model alongside their product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UtilityBreakdown {
    pub age_factor: f64,
    pub health_factor: f64,
    pub mobility_factor: f64,
    pub condition_factor: f64,
    pub condition: Option<ConditionKeyword>,
    pub index: UtilityIndex,
}

pub fn breakdown(inputs: &UtilityInputs) -> UtilityBreakdown {
    if let MobilityAid::Unrecognized(text) = &inputs.mobility_aid
        && !text.is_empty()
    {
        tracing::warn!(mobility_aid = %text, "unrecognized mobility aid, using neutral factor");
    }

    let age = age_factor(inputs.age);
    let health = health_factor(inputs.self_rated_health);
    let mobility = inputs.mobility_aid.factor();
    let condition = ConditionKeyword::first_match(&inputs.chronic_conditions_text);
    let condition_factor = condition.map_or(1.00, |k| k.factor());

    UtilityBreakdown {
        age_factor: age,
        health_factor: health,
        mobility_factor: mobility,
        condition_factor,
        condition,
        index: UtilityIndex(age * health * mobility * condition_factor),
    }
}

/// Multiplicative utility model over age, self-rated health, mobility, and conditions.
pub fn utility_index(inputs: &UtilityInputs) -> UtilityIndex {
    breakdown(inputs).index
}

/// Display-only reading of an index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Interpretation {
    Excellent,
    VeryGood,
    Good,
    Moderate,
    Poor,
    VeryPoor,
}

impl Interpretation {
    pub fn of(value: f64) -> Self {
        if value >= 0.9 {
            Interpretation::Excellent
        } else if value >= 0.8 {
            Interpretation::VeryGood
        } else if value >= 0.7 {
            Interpretation::Good
        } else if value >= 0.6 {
            Interpretation::Moderate
        } else if value >= 0.5 {
            Interpretation::Poor
        } else {
            Interpretation::VeryPoor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interpretation::Excellent => "excellent",
            Interpretation::VeryGood => "very good",
            Interpretation::Good => "good",
            Interpretation::Moderate => "moderate",
            Interpretation::Poor => "poor",
            Interpretation::VeryPoor => "very poor",
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} health state", self.label())
    }
}
