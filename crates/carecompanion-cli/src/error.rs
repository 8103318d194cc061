use carecompanion_instruments::error::InstrumentError;
use carecompanion_storage::error::StorageError;
use carecompanion_validation::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{} field(s) failed validation: {}", .0.len(), summarize(.0))]
    Validation(Vec<FieldError>),

    #[error("no baseline age on record for {participant_id}; supply age with this visit")]
    MissingBaselineAge { participant_id: String },

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to save record, try again: {0}")]
    Storage(#[from] StorageError),
}

impl WorkflowError {
    /// Field errors, if this is a validation failure.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            WorkflowError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
