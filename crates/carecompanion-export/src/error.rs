use thiserror::Error;

use carecompanion_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read records: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to format export stamp: {0}")]
    Stamp(#[from] jiff::Error),
}
