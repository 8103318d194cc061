use std::path::{Path, PathBuf};

use carecompanion_core::keys;
use carecompanion_core::models::export::{EXPORT_TIMESTAMP_FIELD, ExportKind};
use carecompanion_storage::AssessmentRepository;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// What a call to [`export_all`] wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub files: Vec<PathBuf>,
    pub screenings: usize,
    pub forms: usize,
}

/// Build `{ "<kind key>": [...items], "export_timestamp": <millis> }`.
pub fn export_document<T: Serialize>(
    kind: ExportKind,
    items: &[T],
    timestamp_millis: i64,
) -> Result<serde_json::Value, ExportError> {
    let mut doc = serde_json::Map::new();
    doc.insert(kind.key().to_string(), serde_json::to_value(items)?);
    doc.insert(
        EXPORT_TIMESTAMP_FIELD.to_string(),
        serde_json::Value::from(timestamp_millis),
    );
    Ok(serde_json::Value::Object(doc))
}

/// Write one batch file. Returns `None` without touching the disk when
/// `items` is empty.
///
/// The file name carries `now` formatted in UTC with
/// [`keys::EXPORT_STAMP_FORMAT`].
pub fn write_batch<T: Serialize>(
    dir: &Path,
    kind: ExportKind,
    items: &[T],
    now: jiff::Timestamp,
) -> Result<Option<PathBuf>, ExportError> {
    if items.is_empty() {
        tracing::debug!(kind = kind.key(), "nothing to export");
        return Ok(None);
    }

    let stamp = jiff::fmt::strtime::format(keys::EXPORT_STAMP_FORMAT, now)?;
    let doc = export_document(kind, items, now.as_millisecond())?;
    let json = serde_json::to_vec_pretty(&doc)?;

    std::fs::create_dir_all(dir)?;
    let file_name = keys::export_file(kind, &stamp);
    let path = dir.join(&file_name);
    let tmp_path = dir.join(format!("{file_name}.tmp"));
    std::fs::write(&tmp_path, &json)?;
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(
        kind = kind.key(),
        count = items.len(),
        path = %path.display(),
        "export batch written"
    );
    Ok(Some(path))
}

/// Export every screening and every assessment record in the repository.
pub fn export_all(
    repo: &dyn AssessmentRepository,
    dir: &Path,
    now: jiff::Timestamp,
) -> Result<ExportSummary, ExportError> {
    let screenings = repo.list_screenings()?;
    let forms = repo.list_records()?;

    let mut summary = ExportSummary {
        files: Vec::new(),
        screenings: screenings.len(),
        forms: forms.len(),
    };
    if let Some(path) = write_batch(dir, ExportKind::Screenings, &screenings, now)? {
        summary.files.push(path);
    }
    if let Some(path) = write_batch(dir, ExportKind::Forms, &forms, now)? {
        summary.files.push(path);
    }
    Ok(summary)
}
