use carecompanion_core::keys;
use carecompanion_core::models::assessment::AssessmentRecord;
use carecompanion_core::models::export::ExportKind;
use carecompanion_core::models::visit::VisitStage;
use serde_json::json;

#[test]
fn visit_stage_parses_case_insensitively() {
    assert_eq!("Baseline".parse::<VisitStage>().unwrap(), VisitStage::Baseline);
    assert_eq!(" midline ".parse::<VisitStage>().unwrap(), VisitStage::Midline);
    assert_eq!("ENDLINE".parse::<VisitStage>().unwrap(), VisitStage::Endline);
    assert!("followup".parse::<VisitStage>().is_err());
}

#[test]
fn visit_stage_serializes_snake_case() {
    let value = serde_json::to_value(VisitStage::Midline).unwrap();
    assert_eq!(value, json!("midline"));
}

#[test]
fn visit_stage_previous_walks_back_one_step() {
    assert_eq!(VisitStage::Baseline.previous(), None);
    assert_eq!(VisitStage::Midline.previous(), Some(VisitStage::Baseline));
    assert_eq!(VisitStage::Endline.previous(), Some(VisitStage::Midline));
}

#[test]
fn payload_helpers_read_typed_fields() {
    let record = AssessmentRecord::new(
        "PID-001",
        VisitStage::Baseline,
        json!({ "age": 72, "household_size": "4", "mobility_aid": "Walker" }),
        0.61,
    );

    assert_eq!(record.payload_i64("age"), Some(72));
    assert_eq!(record.payload_i64("household_size"), Some(4));
    assert_eq!(record.payload_str("mobility_aid"), Some("Walker"));
    assert_eq!(record.payload_i64("missing"), None);
}

#[test]
fn assessment_record_round_trips_through_json() {
    let record = AssessmentRecord::new("PID-002", VisitStage::Endline, json!({}), 0.9);
    let text = serde_json::to_string(&record).unwrap();
    let back: AssessmentRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
    assert!(text.contains("\"visit_stage\":\"endline\""));
}

#[test]
fn export_file_names_use_batch_key() {
    assert_eq!(
        keys::export_file(ExportKind::Screenings, "20250101_101500"),
        "screenings_20250101_101500.json"
    );
    assert_eq!(keys::export_file(ExportKind::Forms, "x"), "forms_x.json");
    assert_eq!(keys::screener_file("gds15"), "gds15.json");
}
