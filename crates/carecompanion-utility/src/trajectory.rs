//! Change in the utility index between visit stages.
//!
//! Two classification tables exist over the same `change = current - previous`
//! quantity: one for consecutive stages and one for the whole program
//! (endline against baseline). Both are checked top-down, first match wins,
//! with strict `>` comparisons.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use carecompanion_core::models::visit::VisitStage;

use crate::index::UtilityIndex;

/// Legacy comparison point shown when no prior visit exists.
///
/// Not a measurement. Only [`Comparison::against_placeholder`] uses it, and
/// the result is marked as a placeholder.
pub const PLACEHOLDER_BASELINE: f64 = 0.70;

/// Deltas are rounded at this scale. Representation error in `f64`
/// subtraction is far smaller and is absorbed; real differences are not.
const CHANGE_PRECISION: f64 = 1e12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Transition {
    /// Consecutive stages, e.g. midline against baseline.
    StageToStage,
    /// Endline against baseline.
    EndOfProgram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StageChange {
    SignificantImprovement,
    ModerateImprovement,
    Stable,
    ModerateDecline,
    SignificantDecline,
}

impl StageChange {
    pub fn classify(change: f64) -> Self {
        if change > 0.10 {
            StageChange::SignificantImprovement
        } else if change > 0.05 {
            StageChange::ModerateImprovement
        } else if change > -0.05 {
            StageChange::Stable
        } else if change > -0.10 {
            StageChange::ModerateDecline
        } else {
            StageChange::SignificantDecline
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StageChange::SignificantImprovement => "significant improvement",
            StageChange::ModerateImprovement => "moderate improvement",
            StageChange::Stable => "stable",
            StageChange::ModerateDecline => "moderate decline",
            StageChange::SignificantDecline => "significant decline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ProgramImpact {
    Excellent,
    Good,
    Moderate,
    Minimal,
    ConcerningDecline,
    SignificantDecline,
}

impl ProgramImpact {
    pub fn classify(change: f64) -> Self {
        if change > 0.20 {
            ProgramImpact::Excellent
        } else if change > 0.10 {
            ProgramImpact::Good
        } else if change > 0.05 {
            ProgramImpact::Moderate
        } else if change > -0.05 {
            ProgramImpact::Minimal
        } else if change > -0.10 {
            ProgramImpact::ConcerningDecline
        } else {
            ProgramImpact::SignificantDecline
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProgramImpact::Excellent => "excellent program impact",
            ProgramImpact::Good => "good program impact",
            ProgramImpact::Moderate => "moderate program impact",
            ProgramImpact::Minimal => "minimal program impact, maintained",
            ProgramImpact::ConcerningDecline => "concerning decline",
            ProgramImpact::SignificantDecline => "significant decline, review required",
        }
    }

    /// Longer guidance shown alongside the label.
    pub fn guidance(&self) -> &'static str {
        match self {
            ProgramImpact::Excellent => "substantial health improvement",
            ProgramImpact::Good => "meaningful health improvement",
            ProgramImpact::Moderate => "noticeable health improvement",
            ProgramImpact::Minimal => "health status maintained",
            ProgramImpact::ConcerningDecline => "program may need adjustment",
            ProgramImpact::SignificantDecline => "program evaluation required",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "table", content = "class", rename_all = "snake_case")]
#[ts(export)]
pub enum Classification {
    Stage(StageChange),
    Program(ProgramImpact),
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Stage(c) => c.label(),
            Classification::Program(c) => c.label(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Delta {
    pub previous: f64,
    pub current: f64,
    pub change: f64,
    pub classification: Classification,
}

fn snap(change: f64) -> f64 {
    (change * CHANGE_PRECISION).round() / CHANGE_PRECISION
}

/// Classify `current - previous` under the table for `transition`.
pub fn delta(previous: UtilityIndex, current: UtilityIndex, transition: Transition) -> Delta {
    delta_from_values(previous.value(), current.value(), transition)
}

fn delta_from_values(previous: f64, current: f64, transition: Transition) -> Delta {
    let change = snap(current - previous);
    let classification = match transition {
        Transition::StageToStage => Classification::Stage(StageChange::classify(change)),
        Transition::EndOfProgram => Classification::Program(ProgramImpact::classify(change)),
    };
    Delta {
        previous,
        current,
        change,
        classification,
    }
}

/// Outcome of comparing against a prior visit that may not exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "delta", rename_all = "snake_case")]
#[ts(export)]
pub enum Comparison {
    Measured(Delta),
    /// The later visit exists but the earlier one does not.
    NoBaseline,
    /// The later visit has not been recorded yet.
    Pending,
}

/// A delta computed against [`PLACEHOLDER_BASELINE`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DisplayDelta {
    pub delta: Delta,
    pub placeholder: bool,
}

impl Comparison {
    pub fn measured(&self) -> Option<&Delta> {
        match self {
            Comparison::Measured(d) => Some(d),
            Comparison::NoBaseline | Comparison::Pending => None,
        }
    }

    /// The measured delta, or one against the legacy 0.70 placeholder,
    /// flagged as such. For screens that must always show a number.
    pub fn against_placeholder(&self, current: UtilityIndex, transition: Transition) -> DisplayDelta {
        match self {
            Comparison::Measured(d) => DisplayDelta {
                delta: *d,
                placeholder: false,
            },
            Comparison::NoBaseline | Comparison::Pending => DisplayDelta {
                delta: delta_from_values(PLACEHOLDER_BASELINE, current.value(), transition),
                placeholder: true,
            },
        }
    }
}

pub fn compare(prior: Option<UtilityIndex>, current: UtilityIndex, transition: Transition) -> Comparison {
    match prior {
        Some(previous) => Comparison::Measured(delta(previous, current, transition)),
        None => Comparison::NoBaseline,
    }
}

/// Latest utility index per visit stage for one participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Trajectory {
    pub baseline: Option<UtilityIndex>,
    pub midline: Option<UtilityIndex>,
    pub endline: Option<UtilityIndex>,
}

/// Every comparison a trajectory supports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrajectorySummary {
    pub midline_vs_baseline: Comparison,
    pub endline_vs_midline: Comparison,
    pub program_impact: Comparison,
}

impl Trajectory {
    pub fn from_stages(stages: impl IntoIterator<Item = (VisitStage, UtilityIndex)>) -> Self {
        let mut trajectory = Self::default();
        for (stage, index) in stages {
            trajectory.set(stage, index);
        }
        trajectory
    }

    pub fn set(&mut self, stage: VisitStage, index: UtilityIndex) {
        match stage {
            VisitStage::Baseline => self.baseline = Some(index),
            VisitStage::Midline => self.midline = Some(index),
            VisitStage::Endline => self.endline = Some(index),
        }
    }

    pub fn get(&self, stage: VisitStage) -> Option<UtilityIndex> {
        match stage {
            VisitStage::Baseline => self.baseline,
            VisitStage::Midline => self.midline,
            VisitStage::Endline => self.endline,
        }
    }

    fn between(&self, from: VisitStage, to: VisitStage, transition: Transition) -> Comparison {
        match self.get(to) {
            Some(current) => compare(self.get(from), current, transition),
            None => Comparison::Pending,
        }
    }

    /// `stage` against the stage immediately before it. Baseline has no
    /// predecessor and always yields [`Comparison::NoBaseline`] once recorded.
    pub fn since_previous(&self, stage: VisitStage) -> Comparison {
        match (stage.previous(), self.get(stage)) {
            (_, None) => Comparison::Pending,
            (Some(previous), Some(_)) => self.between(previous, stage, Transition::StageToStage),
            (None, Some(_)) => Comparison::NoBaseline,
        }
    }

    pub fn midline_vs_baseline(&self) -> Comparison {
        self.since_previous(VisitStage::Midline)
    }

    pub fn endline_vs_midline(&self) -> Comparison {
        self.since_previous(VisitStage::Endline)
    }

    pub fn program_impact(&self) -> Comparison {
        self.between(VisitStage::Baseline, VisitStage::Endline, Transition::EndOfProgram)
    }

    pub fn summary(&self) -> TrajectorySummary {
        TrajectorySummary {
            midline_vs_baseline: self.midline_vs_baseline(),
            endline_vs_midline: self.endline_vs_midline(),
            program_impact: self.program_impact(),
        }
    }
}
