use std::collections::BTreeMap;

use carecompanion_cli::error::WorkflowError;
use carecompanion_cli::workflow::{VisitSubmission, participant_trajectory, record_screening, record_visit};
use carecompanion_core::models::visit::VisitStage;
use carecompanion_instruments::error::InstrumentError;
use carecompanion_instruments::loader::BundledScreeners;
use carecompanion_storage::{AssessmentRepository, FileRepository, InMemoryRepository};
use carecompanion_utility::index::Interpretation;
use carecompanion_utility::trajectory::{Classification, Comparison, ProgramImpact, StageChange};
use carecompanion_validation::FailureKind;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn baseline_to_endline_reports_program_impact() {
    let repo = InMemoryRepository::new();

    let baseline = VisitSubmission::new("PID-100", VisitStage::Baseline)
        .field("age", "45")
        .field("self_rated_health", "3")
        .field("mobility_aid", "none");
    let first = record_visit(&repo, &baseline).unwrap();
    assert!(approx(first.record.utility_index, 0.70));
    assert_eq!(first.interpretation, Interpretation::Good);
    assert_eq!(first.trajectory.program_impact, Comparison::Pending);

    let endline = VisitSubmission::new("PID-100", VisitStage::Endline)
        .field("self_rated_health", "5")
        .field("chronic_conditions", "Type 2 Diabetes");
    let last = record_visit(&repo, &endline).unwrap();

    assert!(approx(last.record.utility_index, 0.95));
    assert_eq!(last.record.payload_i64("age"), Some(45));
    assert_eq!(last.trajectory.midline_vs_baseline, Comparison::Pending);
    assert_eq!(last.trajectory.endline_vs_midline, Comparison::NoBaseline);

    let impact = last.trajectory.program_impact.measured().unwrap();
    assert!(approx(impact.change, 0.25));
    assert_eq!(
        impact.classification,
        Classification::Program(ProgramImpact::Excellent)
    );
    assert_eq!(impact.classification.label(), "excellent program impact");
    assert_eq!(repo.list_records().unwrap().len(), 2);
}

#[test]
fn midline_compares_against_latest_baseline() {
    let repo = InMemoryRepository::new();
    for srh in ["2", "3"] {
        let baseline = VisitSubmission::new("PID-200", VisitStage::Baseline)
            .field("age", "45")
            .field("self_rated_health", srh);
        record_visit(&repo, &baseline).unwrap();
    }

    let midline = VisitSubmission::new("PID-200", VisitStage::Midline)
        .field("self_rated_health", "4");
    let outcome = record_visit(&repo, &midline).unwrap();

    let delta = outcome.trajectory.midline_vs_baseline.measured().unwrap();
    assert!(approx(delta.previous, 0.70));
    assert!(approx(delta.change, 0.15));
    assert_eq!(
        delta.classification,
        Classification::Stage(StageChange::SignificantImprovement)
    );
}

#[test]
fn worked_example_index_is_stored() {
    let repo = InMemoryRepository::new();
    let visit = VisitSubmission::new("PID-300", VisitStage::Baseline)
        .field("age", "72")
        .field("self_rated_health", "3")
        .field("mobility_aid", "Walker")
        .field("chronic_conditions", "diabetes, hypertension");

    let outcome = record_visit(&repo, &visit).unwrap();
    assert!(approx(outcome.breakdown.index.value(), 0.508725));
    assert_eq!(outcome.interpretation, Interpretation::Poor);
    assert_eq!(
        outcome.record.payload["utility_index"].as_f64().map(|v| approx(v, 0.508725)),
        Some(true)
    );
    assert_eq!(outcome.record.payload_str("mobility_aid"), Some("Walker"));
}

#[test]
fn baseline_without_age_is_rejected_and_not_stored() {
    let repo = InMemoryRepository::new();
    let visit = VisitSubmission::new("PID-400", VisitStage::Baseline)
        .field("self_rated_health", "9")
        .field("blood_pressure_systolic", "80")
        .field("blood_pressure_diastolic", "120");

    let err = record_visit(&repo, &visit).unwrap_err();
    let fields: Vec<(&str, FailureKind)> = err
        .field_errors()
        .iter()
        .map(|e| (e.field.as_str(), e.kind))
        .collect();
    assert!(fields.contains(&("age", FailureKind::Required)));
    assert!(fields.contains(&("self_rated_health", FailureKind::Range)));
    assert!(fields.contains(&("blood_pressure", FailureKind::Range)));
    assert!(repo.list_records().unwrap().is_empty());
}

#[test]
fn follow_up_without_baseline_needs_age() {
    let repo = InMemoryRepository::new();
    let visit = VisitSubmission::new("PID-500", VisitStage::Midline).field("self_rated_health", "4");

    match record_visit(&repo, &visit) {
        Err(WorkflowError::MissingBaselineAge { participant_id }) => {
            assert_eq!(participant_id, "PID-500")
        }
        other => panic!("expected missing baseline age, got {other:?}"),
    }

    let with_age = visit.field("age", "81");
    let outcome = record_visit(&repo, &with_age).unwrap();
    assert_eq!(outcome.trajectory.midline_vs_baseline, Comparison::NoBaseline);
}

#[test]
fn trajectory_reads_back_from_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileRepository::open(dir.path()).unwrap();
    let baseline = VisitSubmission::new("PID-600", VisitStage::Baseline)
        .field("age", "65")
        .field("self_rated_health", "4");
    record_visit(&repo, &baseline).unwrap();

    let trajectory = participant_trajectory(&repo, "PID-600").unwrap();
    assert!(approx(trajectory.baseline.unwrap().value(), 0.90 * 0.85));
    assert!(trajectory.midline.is_none());
    assert!(participant_trajectory(&repo, "PID-999").unwrap().baseline.is_none());
}

fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn screening_is_scored_and_recorded() {
    let repo = InMemoryRepository::new();
    let selections = answers(&[("q1", "often"), ("q2", "often"), ("q3", "some_of_the_time")]);

    let outcome = record_screening(&BundledScreeners, &repo, " PID-700 ", "ucla3", &selections).unwrap();
    assert_eq!(outcome.result.total, 8);
    assert_eq!(outcome.result.band, "lonely");
    assert_eq!(outcome.record.participant_id, "PID-700");

    let stored = repo.find_latest_screening("PID-700", "ucla3").unwrap().unwrap();
    assert_eq!(stored, outcome.record);
}

#[test]
fn incomplete_screening_is_not_recorded() {
    let repo = InMemoryRepository::new();
    let selections = answers(&[("q1", "often")]);

    let err = record_screening(&BundledScreeners, &repo, "PID-700", "ucla3", &selections).unwrap_err();
    match err {
        WorkflowError::Instrument(InstrumentError::IncompleteResponse { missing, .. }) => {
            assert_eq!(missing, vec!["q2".to_string(), "q3".to_string()])
        }
        other => panic!("expected incomplete response, got {other:?}"),
    }
    assert!(repo.list_screenings().unwrap().is_empty());
}

#[test]
fn screening_rejects_bad_participant_and_unknown_screener() {
    let repo = InMemoryRepository::new();
    let selections = answers(&[("q1", "often")]);

    let err = record_screening(&BundledScreeners, &repo, "P!", "ucla3", &selections).unwrap_err();
    assert_eq!(err.field_errors().len(), 1);

    let err = record_screening(&BundledScreeners, &repo, "PID-700", "phq9", &selections).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Instrument(InstrumentError::ConfigNotFound(ref id)) if id == "phq9"
    ));
}
