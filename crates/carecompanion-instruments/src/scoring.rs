use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::definition::{Band, ScreenerDefinition, ScreenerOption};
use crate::error::InstrumentError;

/// Band label returned when no configured band contains the total.
pub const UNKNOWN_BAND: &str = "unknown";

/// Immutable response map: item id → selected option id.
pub type Selections = BTreeMap<String, String>;

/// Derived result of scoring one administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub total: i64,
    pub band: String,
}

impl ScoreResult {
    pub fn is_banded(&self) -> bool {
        self.band != UNKNOWN_BAND
    }
}

/// Minimum and maximum score across an option set.
pub fn score_bounds(options: &[ScreenerOption]) -> Option<(i64, i64)> {
    let min = options.iter().map(|o| o.score).min()?;
    let max = options.iter().map(|o| o.score).max()?;
    Some((min, max))
}

/// Invert a raw score within `[min, max]`. Applying it twice is the identity.
///
/// `None` if `min + max - score` does not fit in `i64`.
pub fn reverse_score(score: i64, min: i64, max: i64) -> Option<i64> {
    min.checked_add(max)?.checked_sub(score)
}

/// First band in declaration order whose inclusive range contains `total`.
pub fn band_for(bands: &[Band], total: i64) -> Option<&Band> {
    bands.iter().find(|b| b.contains(total))
}

/// Score a complete set of selections against a definition.
///
/// Every item must be answered. Reverse-scored items are inverted using the
/// min/max of their own option set, computed on each call. A total outside
/// every band yields [`UNKNOWN_BAND`] rather than an error.
pub fn score(
    definition: &ScreenerDefinition,
    selections: &Selections,
) -> Result<ScoreResult, InstrumentError> {
    let missing: Vec<String> = definition
        .items
        .iter()
        .filter(|item| !selections.contains_key(&item.id))
        .map(|item| item.id.clone())
        .collect();
    if !missing.is_empty() {
        return Err(InstrumentError::IncompleteResponse {
            screener_id: definition.id.clone(),
            missing,
        });
    }

    for item_id in selections.keys() {
        if definition.item(item_id).is_none() {
            tracing::warn!(
                screener = %definition.id,
                item = %item_id,
                "ignoring selection for item not in screener"
            );
        }
    }

    let mut total: i64 = 0;
    for item in &definition.items {
        let options = definition
            .options_for(item)
            .ok_or_else(|| InstrumentError::InvalidConfig {
                screener_id: definition.id.clone(),
                reason: format!("item '{}' has no resolvable option set", item.id),
            })?;
        let (min, max) = score_bounds(options).ok_or_else(|| InstrumentError::InvalidConfig {
            screener_id: definition.id.clone(),
            reason: format!("item '{}' has no options", item.id),
        })?;

        let option_id = &selections[&item.id];
        let option = options
            .iter()
            .find(|o| &o.id == option_id)
            .ok_or_else(|| InstrumentError::UnknownOption {
                item_id: item.id.clone(),
                option_id: option_id.clone(),
            })?;

        let points = if item.reverse_scored {
            reverse_score(option.score, min, max)
        } else {
            Some(option.score)
        };
        total = points
            .and_then(|p| total.checked_add(p))
            .ok_or_else(|| InstrumentError::InvalidConfig {
                screener_id: definition.id.clone(),
                reason: "total score overflows".to_string(),
            })?;
    }

    let band = match band_for(&definition.bands, total) {
        Some(band) => band.label.clone(),
        None => {
            tracing::warn!(screener = %definition.id, total, "total outside every configured band");
            UNKNOWN_BAND.to_string()
        }
    };

    tracing::debug!(screener = %definition.id, total, band = %band, "screener scored");
    Ok(ScoreResult { total, band })
}
