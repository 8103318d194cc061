//! carecompanion-storage
//!
//! Persistence boundary for assessment and screening records. Callers hold
//! an [`AssessmentRepository`] explicitly; there is no global handle.

pub mod error;
pub mod file;
pub mod log;
pub mod memory;

use carecompanion_core::models::assessment::AssessmentRecord;
use carecompanion_core::models::screening::ScreeningRecord;
use carecompanion_core::models::visit::VisitStage;

use crate::error::StorageError;

pub use file::FileRepository;
pub use memory::InMemoryRepository;

/// Append-only record store.
///
/// Appends are at-least-once and never deduplicated. When several records
/// share a participant and stage, the one with the latest `created_at` wins;
/// on equal timestamps the later append wins.
pub trait AssessmentRepository: Send + Sync {
    fn append_record(&self, record: &AssessmentRecord) -> Result<(), StorageError>;

    fn list_records(&self) -> Result<Vec<AssessmentRecord>, StorageError>;

    fn append_screening(&self, record: &ScreeningRecord) -> Result<(), StorageError>;

    fn list_screenings(&self) -> Result<Vec<ScreeningRecord>, StorageError>;

    fn find_latest_record(
        &self,
        participant_id: &str,
        stage: VisitStage,
    ) -> Result<Option<AssessmentRecord>, StorageError> {
        let records = self.list_records()?;
        Ok(latest_by(
            records
                .into_iter()
                .filter(|r| r.participant_id == participant_id && r.visit_stage == stage),
            |r| r.created_at,
        ))
    }

    /// Latest record for each stage, in stage order.
    fn latest_by_stage(
        &self,
        participant_id: &str,
    ) -> Result<Vec<(VisitStage, Option<AssessmentRecord>)>, StorageError> {
        let records = self.list_records()?;
        Ok(VisitStage::ALL
            .iter()
            .map(|&stage| {
                let latest = latest_by(
                    records
                        .iter()
                        .filter(|r| r.participant_id == participant_id && r.visit_stage == stage)
                        .cloned(),
                    |r| r.created_at,
                );
                (stage, latest)
            })
            .collect())
    }

    fn find_latest_screening(
        &self,
        participant_id: &str,
        screener_id: &str,
    ) -> Result<Option<ScreeningRecord>, StorageError> {
        let screenings = self.list_screenings()?;
        Ok(latest_by(
            screenings
                .into_iter()
                .filter(|s| s.participant_id == participant_id && s.screener_id == screener_id),
            |s| s.created_at,
        ))
    }
}

/// Pick the item with the greatest key; ties go to the later item.
pub fn latest_by<T, K: Ord>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> K) -> Option<T> {
    items.into_iter().fold(None, |best, item| match best {
        Some(b) if key(&b) > key(&item) => Some(b),
        _ => Some(item),
    })
}
