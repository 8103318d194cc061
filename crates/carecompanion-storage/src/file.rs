use std::path::{Path, PathBuf};
use std::sync::Mutex;

use carecompanion_core::keys;
use carecompanion_core::models::assessment::AssessmentRecord;
use carecompanion_core::models::screening::ScreeningRecord;

use crate::AssessmentRepository;
use crate::error::StorageError;
use crate::log;

/// Repository backed by two JSON-lines files in a data directory.
pub struct FileRepository {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileRepository {
    /// Open (and create if needed) a data directory.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        tracing::debug!(dir = %data_dir.display(), "opened record store");
        Ok(Self {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn assessments_path(&self) -> PathBuf {
        self.data_dir.join(keys::ASSESSMENTS_LOG)
    }

    fn screenings_path(&self) -> PathBuf {
        self.data_dir.join(keys::SCREENINGS_LOG)
    }

    fn append<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), StorageError> {
        // Serialize appends from this process so lines never interleave.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        log::append_line(path, value)
    }
}

impl AssessmentRepository for FileRepository {
    fn append_record(&self, record: &AssessmentRecord) -> Result<(), StorageError> {
        self.append(&self.assessments_path(), record)?;
        tracing::info!(
            record_id = %record.id,
            participant_id = %record.participant_id,
            stage = %record.visit_stage,
            "assessment record appended"
        );
        Ok(())
    }

    fn list_records(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        log::read_lines(&self.assessments_path())
    }

    fn append_screening(&self, record: &ScreeningRecord) -> Result<(), StorageError> {
        self.append(&self.screenings_path(), record)?;
        tracing::info!(
            record_id = %record.id,
            participant_id = %record.participant_id,
            screener_id = %record.screener_id,
            "screening record appended"
        );
        Ok(())
    }

    fn list_screenings(&self) -> Result<Vec<ScreeningRecord>, StorageError> {
        log::read_lines(&self.screenings_path())
    }
}
