//! carecompanion-export
//!
//! Export batches for the sync collaborator. One JSON document per entity
//! kind, written atomically into an export directory.

pub mod batch;
pub mod error;

pub use batch::{ExportSummary, export_all, export_document, write_batch};
