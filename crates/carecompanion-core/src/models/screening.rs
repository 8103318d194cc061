use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A scored screener administration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningRecord {
    pub id: Uuid,
    pub participant_id: String,
    pub screener_id: String,
    pub score: i64,
    pub band: String,
    pub created_at: jiff::Timestamp,
}

impl ScreeningRecord {
    pub fn new(
        participant_id: impl Into<String>,
        screener_id: impl Into<String>,
        score: i64,
        band: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant_id: participant_id.into(),
            screener_id: screener_id.into(),
            score,
            band: band.into(),
            created_at: jiff::Timestamp::now(),
        }
    }
}
