use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Longitudinal position of an assessment for a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum VisitStage {
    Baseline,
    Midline,
    Endline,
}

impl VisitStage {
    pub const ALL: [VisitStage; 3] = [VisitStage::Baseline, VisitStage::Midline, VisitStage::Endline];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStage::Baseline => "baseline",
            VisitStage::Midline => "midline",
            VisitStage::Endline => "endline",
        }
    }

    /// The stage immediately before this one, if any.
    pub fn previous(&self) -> Option<VisitStage> {
        match self {
            VisitStage::Baseline => None,
            VisitStage::Midline => Some(VisitStage::Baseline),
            VisitStage::Endline => Some(VisitStage::Midline),
        }
    }
}

impl fmt::Display for VisitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitStage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(VisitStage::Baseline),
            "midline" => Ok(VisitStage::Midline),
            "endline" => Ok(VisitStage::Endline),
            other => Err(CoreError::InvalidVisitStage(other.to_string())),
        }
    }
}
