use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InstrumentError;
use crate::scoring::score_bounds;

/// A question within a screener. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: String,
    #[serde(alias = "text_key")]
    pub prompt_key: String,
    #[serde(default, alias = "reverse")]
    pub reverse_scored: bool,
    /// Named entry in [`ScreenerDefinition::option_sets`]. `None` means the
    /// shared `options` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_set: Option<String>,
}

/// An answer choice. Scores need not be contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreenerOption {
    pub id: String,
    pub label_key: String,
    pub score: i64,
}

/// Inclusive score range with a display label. First match in list order wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Band {
    pub min: i64,
    pub max: i64,
    pub label: String,
}

impl Band {
    pub fn contains(&self, total: i64) -> bool {
        self.min <= total && total <= self.max
    }
}

/// A standardized multi-item questionnaire with its scoring bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreenerDefinition {
    pub id: String,
    pub title: String,
    pub items: Vec<Item>,
    #[serde(default)]
    pub options: Vec<ScreenerOption>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub option_sets: BTreeMap<String, Vec<ScreenerOption>>,
    pub bands: Vec<Band>,
}

impl ScreenerDefinition {
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// The option set an item draws from, or `None` if its named set is missing.
    pub fn options_for(&self, item: &Item) -> Option<&[ScreenerOption]> {
        match &item.option_set {
            Some(name) => self.option_sets.get(name).map(Vec::as_slice),
            None => Some(self.options.as_slice()),
        }
    }

    /// Lowest and highest achievable totals.
    ///
    /// Reversal maps an option set's `[min, max]` onto itself, so the range
    /// does not depend on which items are reverse-scored.
    ///
    /// `None` when an option set does not resolve or a total overflows `i64`.
    pub fn score_range(&self) -> Option<(i64, i64)> {
        let mut low: i64 = 0;
        let mut high: i64 = 0;
        for item in &self.items {
            let (min, max) = score_bounds(self.options_for(item)?)?;
            low = low.checked_add(min)?;
            high = high.checked_add(max)?;
        }
        Some((low, high))
    }

    /// Structural checks run once at load time.
    pub fn check(&self) -> Result<(), InstrumentError> {
        let invalid = |reason: String| InstrumentError::InvalidConfig {
            screener_id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("screener id is blank".to_string()));
        }
        if self.items.is_empty() {
            return Err(invalid("no items defined".to_string()));
        }

        let mut seen_items = HashSet::new();
        for item in &self.items {
            if !seen_items.insert(item.id.as_str()) {
                return Err(invalid(format!("duplicate item id '{}'", item.id)));
            }
            match self.options_for(item) {
                None => {
                    return Err(invalid(format!(
                        "item '{}' references unknown option set '{}'",
                        item.id,
                        item.option_set.as_deref().unwrap_or_default()
                    )));
                }
                Some([]) => {
                    return Err(invalid(format!("item '{}' has no options", item.id)));
                }
                Some(options) => {
                    if item.reverse_scored
                        && score_bounds(options).and_then(|(min, max)| min.checked_add(max)).is_none()
                    {
                        return Err(invalid(format!(
                            "item '{}' option scores are too large to reverse",
                            item.id
                        )));
                    }
                }
            }
        }

        if self.score_range().is_none() {
            return Err(invalid("achievable totals overflow the score range".to_string()));
        }

        let shared = std::iter::once(("options", &self.options));
        let named = self.option_sets.iter().map(|(k, v)| (k.as_str(), v));
        for (set_name, options) in shared.chain(named) {
            let mut seen = HashSet::new();
            for option in options {
                if !seen.insert(option.id.as_str()) {
                    return Err(invalid(format!(
                        "duplicate option id '{}' in '{set_name}'",
                        option.id
                    )));
                }
            }
        }

        for band in &self.bands {
            if band.min > band.max {
                return Err(invalid(format!(
                    "band '{}' has min {} greater than max {}",
                    band.label, band.min, band.max
                )));
            }
        }

        Ok(())
    }

    /// Achievable totals not covered by any band, as inclusive ranges.
    pub fn band_gaps(&self) -> Vec<(i64, i64)> {
        let Some((low, high)) = self.score_range() else {
            return Vec::new();
        };

        let mut bands: Vec<&Band> = self.bands.iter().collect();
        bands.sort_by_key(|b| b.min);

        let mut gaps = Vec::new();
        let mut cursor = low;
        for band in bands {
            if cursor > high {
                break;
            }
            if band.max < cursor {
                continue;
            }
            if band.min > cursor {
                gaps.push((cursor, (band.min - 1).min(high)));
            }
            cursor = cursor.max(band.max.saturating_add(1));
        }
        if cursor <= high {
            gaps.push((cursor, high));
        }
        gaps
    }
}
