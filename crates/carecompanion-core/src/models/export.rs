use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Entity batches understood by the sync collaborator.
///
/// Each batch is one JSON document: `{ "<key>": [...], "export_timestamp": <epoch millis> }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ExportKind {
    Screenings,
    Forms,
}

impl ExportKind {
    /// Array key inside the document; also the file name prefix.
    pub fn key(&self) -> &'static str {
        match self {
            ExportKind::Screenings => "screenings",
            ExportKind::Forms => "forms",
        }
    }
}

pub const EXPORT_TIMESTAMP_FIELD: &str = "export_timestamp";
