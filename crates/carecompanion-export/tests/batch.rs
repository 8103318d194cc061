use carecompanion_core::models::assessment::AssessmentRecord;
use carecompanion_core::models::export::ExportKind;
use carecompanion_core::models::screening::ScreeningRecord;
use carecompanion_core::models::visit::VisitStage;
use carecompanion_export::{export_all, export_document, write_batch};
use carecompanion_storage::{AssessmentRepository, InMemoryRepository};
use serde_json::json;

fn now() -> jiff::Timestamp {
    "2024-03-05T14:07:09.250Z".parse().unwrap()
}

#[test]
fn document_has_named_array_and_millis() {
    let doc = export_document(ExportKind::Screenings, &[json!({"score": 4})], 1_709_647_629_250).unwrap();
    assert_eq!(
        doc,
        json!({
            "screenings": [{"score": 4}],
            "export_timestamp": 1_709_647_629_250_i64,
        })
    );
}

#[test]
fn empty_batch_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("exports");
    let written = write_batch::<ScreeningRecord>(&out, ExportKind::Screenings, &[], now()).unwrap();
    assert!(written.is_none());
    assert!(!out.exists());
}

#[test]
fn export_all_writes_one_file_per_kind() {
    let repo = InMemoryRepository::new();
    repo.append_screening(&ScreeningRecord::new("PID-001", "ucla3", 7, "lonely"))
        .unwrap();
    repo.append_record(&AssessmentRecord::new(
        "PID-001",
        VisitStage::Baseline,
        json!({"age": 68}),
        0.508725,
    ))
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let summary = export_all(&repo, dir.path(), now()).unwrap();

    assert_eq!(summary.screenings, 1);
    assert_eq!(summary.forms, 1);
    let names: Vec<String> = summary
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "screenings_20240305_140709.json".to_string(),
            "forms_20240305_140709.json".to_string(),
        ]
    );

    let forms: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&summary.files[1]).unwrap()).unwrap();
    assert_eq!(forms["export_timestamp"], json!(1_709_647_629_250_i64));
    assert_eq!(forms["forms"][0]["participant_id"], "PID-001");
    assert_eq!(forms["forms"][0]["visit_stage"], "baseline");

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|x| x == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn export_all_skips_empty_kinds() {
    let repo = InMemoryRepository::new();
    repo.append_screening(&ScreeningRecord::new("PID-002", "gds15", 2, "normal"))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let summary = export_all(&repo, dir.path(), now()).unwrap();
    assert_eq!(summary.forms, 0);
    assert_eq!(summary.files.len(), 1);
    assert!(
        summary.files[0]
            .to_string_lossy()
            .ends_with("screenings_20240305_140709.json")
    );
}
