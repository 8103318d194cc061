use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::visit::VisitStage;

/// One longitudinal visit form for a participant.
///
/// Records are append-only. Several may exist for the same participant and
/// stage; the latest by `created_at` is the one trajectory analysis uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub participant_id: String,
    pub visit_stage: VisitStage,
    /// Submitted form fields plus derived values, keyed by field name.
    pub payload: serde_json::Value,
    pub utility_index: f64,
    pub created_at: jiff::Timestamp,
}

impl AssessmentRecord {
    pub fn new(
        participant_id: impl Into<String>,
        visit_stage: VisitStage,
        payload: serde_json::Value,
        utility_index: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant_id: participant_id.into(),
            visit_stage,
            payload,
            utility_index,
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: jiff::Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Read a string field from the payload.
    pub fn payload_str(&self, field: &str) -> Option<&str> {
        self.payload.get(field).and_then(|v| v.as_str())
    }

    /// Read an integer field from the payload. Numeric strings are accepted.
    pub fn payload_i64(&self, field: &str) -> Option<i64> {
        let value = self.payload.get(field)?;
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    }
}
