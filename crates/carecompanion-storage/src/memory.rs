use std::sync::{Mutex, MutexGuard};

use carecompanion_core::models::assessment::AssessmentRecord;
use carecompanion_core::models::screening::ScreeningRecord;

use crate::AssessmentRepository;
use crate::error::StorageError;

/// Process-local repository. Nothing survives the process.
#[derive(Default)]
pub struct InMemoryRepository {
    records: Mutex<Vec<AssessmentRecord>>,
    screenings: Mutex<Vec<ScreeningRecord>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AssessmentRepository for InMemoryRepository {
    fn append_record(&self, record: &AssessmentRecord) -> Result<(), StorageError> {
        lock(&self.records).push(record.clone());
        Ok(())
    }

    fn list_records(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        Ok(lock(&self.records).clone())
    }

    fn append_screening(&self, record: &ScreeningRecord) -> Result<(), StorageError> {
        lock(&self.screenings).push(record.clone());
        Ok(())
    }

    fn list_screenings(&self) -> Result<Vec<ScreeningRecord>, StorageError> {
        Ok(lock(&self.screenings).clone())
    }
}
