use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("corrupt record at {}:{line}: {message}", path.display())]
    CorruptLine {
        path: PathBuf,
        line: usize,
        message: String,
    },
}
