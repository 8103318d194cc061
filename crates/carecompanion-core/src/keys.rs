//! Record-file naming conventions.
//!
//! Pure string functions. These define the canonical layout of the on-device
//! data directory and of export batches handed to the sync collaborator.

use crate::models::export::ExportKind;

pub const ASSESSMENTS_LOG: &str = "assessments.jsonl";

pub const SCREENINGS_LOG: &str = "screenings.jsonl";

/// `strftime` pattern used to stamp export file names.
pub const EXPORT_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub fn export_file(kind: ExportKind, stamp: &str) -> String {
    format!("{}_{stamp}.json", kind.key())
}

pub fn screener_file(screener_id: &str) -> String {
    format!("{screener_id}.json")
}
