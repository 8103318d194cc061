//! Visit and screening workflows.
//!
//! Raw input is validated, derived values are computed, prior visits are
//! looked up through the repository, and the resulting record is appended.
//! Nothing here retries; a storage failure is returned to the caller.

use std::collections::BTreeMap;

use carecompanion_core::models::assessment::AssessmentRecord;
use carecompanion_core::models::screening::ScreeningRecord;
use carecompanion_core::models::visit::VisitStage;
use carecompanion_instruments::ScreenerLoader;
use carecompanion_instruments::scoring::{self, ScoreResult, Selections};
use carecompanion_storage::AssessmentRepository;
use carecompanion_utility::index::{
    Interpretation, MobilityAid, UtilityBreakdown, UtilityInputs, UtilityIndex, breakdown,
};
use carecompanion_utility::trajectory::{Trajectory, TrajectorySummary};
use carecompanion_validation::form::{field, validate_form};
use carecompanion_validation::rules::validate_participant_id;
use carecompanion_validation::{FailureKind, FieldError};
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Raw form input for one visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitSubmission {
    pub stage: VisitStage,
    /// Field name → raw text, as collected. Includes `pid`.
    pub fields: BTreeMap<String, String>,
}

impl VisitSubmission {
    pub fn new(participant_id: impl Into<String>, stage: VisitStage) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field::PARTICIPANT_ID.to_string(), participant_id.into());
        Self { stage, fields }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn participant_id(&self) -> &str {
        self.get(field::PARTICIPANT_ID).unwrap_or_default()
    }

    /// Trimmed value, `None` when absent or blank.
    fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitOutcome {
    pub record: AssessmentRecord,
    pub breakdown: UtilityBreakdown,
    pub interpretation: Interpretation,
    pub trajectory: TrajectorySummary,
}

fn required(name: &str, label: &str) -> FieldError {
    FieldError {
        field: name.to_string(),
        kind: FailureKind::Required,
        message: format!("{label} is required"),
    }
}

fn check_submission(submission: &VisitSubmission) -> Result<(), WorkflowError> {
    let mut errors = validate_form(&submission.fields);
    if submission.stage == VisitStage::Baseline && submission.get(field::AGE).is_none() {
        errors.push(required(field::AGE, "Age"));
    }
    if submission.get(field::SELF_RATED_HEALTH).is_none() {
        errors.push(required(field::SELF_RATED_HEALTH, "Self-rated health"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(WorkflowError::Validation(errors))
    }
}

/// Latest stored index per stage. Stored values outside `(0, 1]` are ignored.
pub fn participant_trajectory(
    repo: &dyn AssessmentRepository,
    participant_id: &str,
) -> Result<Trajectory, WorkflowError> {
    let mut trajectory = Trajectory::default();
    for (stage, record) in repo.latest_by_stage(participant_id)? {
        let Some(record) = record else { continue };
        match UtilityIndex::new(record.utility_index) {
            Some(index) => trajectory.set(stage, index),
            None => tracing::warn!(
                record_id = %record.id,
                value = record.utility_index,
                "stored utility index out of range, ignoring"
            ),
        }
    }
    Ok(trajectory)
}

fn resolve_age(
    repo: &dyn AssessmentRepository,
    submission: &VisitSubmission,
) -> Result<i64, WorkflowError> {
    // Already validated when present.
    if let Some(age) = submission.get(field::AGE).and_then(|v| v.parse().ok()) {
        return Ok(age);
    }

    let participant_id = submission.participant_id();
    let baseline = repo.find_latest_record(participant_id, VisitStage::Baseline)?;
    match baseline.and_then(|r| r.payload_i64(field::AGE)) {
        Some(age) => {
            tracing::debug!(participant_id, age, "age carried forward from baseline");
            Ok(age)
        }
        None => Err(WorkflowError::MissingBaselineAge {
            participant_id: participant_id.to_string(),
        }),
    }
}

/// Validate a visit form, compute its utility index and trajectory, and
/// append the record.
pub fn record_visit(
    repo: &dyn AssessmentRepository,
    submission: &VisitSubmission,
) -> Result<VisitOutcome, WorkflowError> {
    check_submission(submission)?;

    let participant_id = submission.participant_id().to_string();
    let age = resolve_age(repo, submission)?;
    let inputs = UtilityInputs {
        age,
        self_rated_health: submission
            .get(field::SELF_RATED_HEALTH)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default(),
        mobility_aid: MobilityAid::parse(submission.get(field::MOBILITY_AID).unwrap_or_default()),
        chronic_conditions_text: submission
            .get(field::CHRONIC_CONDITIONS)
            .unwrap_or_default()
            .to_string(),
    };
    let breakdown = breakdown(&inputs);
    let index = breakdown.index;

    let mut trajectory = participant_trajectory(repo, &participant_id)?;
    trajectory.set(submission.stage, index);
    let summary = trajectory.summary();

    let mut payload = serde_json::Map::new();
    for (name, value) in &submission.fields {
        payload.insert(name.clone(), serde_json::Value::String(value.trim().to_string()));
    }
    payload.insert(field::AGE.to_string(), serde_json::Value::from(age));
    payload.insert("utility_index".to_string(), serde_json::Value::from(index.value()));
    payload.insert("utility_breakdown".to_string(), serde_json::to_value(&breakdown)?);
    payload.insert("trajectory".to_string(), serde_json::to_value(summary)?);

    let record = AssessmentRecord::new(
        participant_id,
        submission.stage,
        serde_json::Value::Object(payload),
        index.value(),
    );
    repo.append_record(&record)?;

    tracing::info!(
        participant_id = %record.participant_id,
        stage = %record.visit_stage,
        utility_index = %index,
        "visit recorded"
    );

    Ok(VisitOutcome {
        record,
        breakdown,
        interpretation: index.interpretation(),
        trajectory: summary,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub record: ScreeningRecord,
    pub result: ScoreResult,
}

/// Score a completed screener and append the result.
pub fn record_screening(
    loader: &dyn ScreenerLoader,
    repo: &dyn AssessmentRepository,
    participant_id: &str,
    screener_id: &str,
    selections: &Selections,
) -> Result<ScreeningOutcome, WorkflowError> {
    validate_participant_id(participant_id)
        .into_result(field::PARTICIPANT_ID)
        .map_err(|e| WorkflowError::Validation(vec![e]))?;

    let definition = loader.load_config(screener_id)?;
    let result = scoring::score(&definition, selections)?;

    let record = ScreeningRecord::new(
        participant_id.trim(),
        definition.id.as_str(),
        result.total,
        result.band.as_str(),
    );
    repo.append_screening(&record)?;

    tracing::info!(
        participant_id = %record.participant_id,
        screener_id = %record.screener_id,
        score = record.score,
        band = %record.band,
        "screening recorded"
    );

    Ok(ScreeningOutcome { record, result })
}
