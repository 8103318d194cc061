use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FailureKind {
    /// Blank where a value is mandatory.
    Required,
    /// Not parseable as the expected type, or wrong length.
    Format,
    /// Parsed, but outside the accepted range.
    Range,
    /// Contains characters outside the allowed set.
    Pattern,
    /// Within type and range limits but implausible; needs confirmation.
    Implausible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub kind: FailureKind,
    pub message: String,
}
