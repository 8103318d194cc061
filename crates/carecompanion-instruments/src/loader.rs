//! Screener definition loading.
//!
//! Definitions are JSON. Two layouts are accepted: the canonical one
//! (`bands` at the top level, `prompt_key`, `reverse_scored`) and the legacy
//! field-app asset layout (`scoring.bands`, `text_key`, `reverse`).
//! Unknown keys are ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use carecompanion_core::keys;

use crate::ScreenerLoader;
use crate::definition::{Band, Item, ScreenerDefinition, ScreenerOption};
use crate::error::InstrumentError;

const BUNDLED: &[(&str, &str)] = &[
    ("gds15", include_str!("../screeners/gds15.json")),
    ("pss10", include_str!("../screeners/pss10.json")),
    ("ucla3", include_str!("../screeners/ucla3.json")),
    ("zarit12", include_str!("../screeners/zarit12.json")),
];

#[derive(Deserialize)]
struct RawScoring {
    bands: Vec<Band>,
}

#[derive(Deserialize)]
struct RawDefinition {
    id: String,
    title: String,
    items: Vec<Item>,
    #[serde(default)]
    options: Vec<ScreenerOption>,
    #[serde(default)]
    option_sets: BTreeMap<String, Vec<ScreenerOption>>,
    #[serde(default)]
    bands: Option<Vec<Band>>,
    #[serde(default)]
    scoring: Option<RawScoring>,
}

/// Parse and structurally check a definition.
///
/// `screener_id` is the identifier the caller asked for; it is used in
/// error messages and must match the `id` inside the document.
pub fn parse_definition(screener_id: &str, json: &str) -> Result<ScreenerDefinition, InstrumentError> {
    let raw: RawDefinition =
        serde_json::from_str(json).map_err(|e| InstrumentError::ConfigParse {
            screener_id: screener_id.to_string(),
            message: e.to_string(),
        })?;

    let bands = match (raw.bands, raw.scoring) {
        (Some(bands), _) => bands,
        (None, Some(scoring)) => scoring.bands,
        (None, None) => Vec::new(),
    };

    let definition = ScreenerDefinition {
        id: raw.id,
        title: raw.title,
        items: raw.items,
        options: raw.options,
        option_sets: raw.option_sets,
        bands,
    };

    if definition.id != screener_id {
        return Err(InstrumentError::InvalidConfig {
            screener_id: screener_id.to_string(),
            reason: format!("document declares id '{}'", definition.id),
        });
    }

    definition.check()?;

    for (from, to) in definition.band_gaps() {
        tracing::warn!(
            screener = %definition.id,
            from,
            to,
            "achievable totals not covered by any band"
        );
    }

    Ok(definition)
}

/// Definitions compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledScreeners;

impl ScreenerLoader for BundledScreeners {
    fn load_config(&self, screener_id: &str) -> Result<ScreenerDefinition, InstrumentError> {
        let (_, json) = BUNDLED
            .iter()
            .find(|(id, _)| *id == screener_id)
            .ok_or_else(|| InstrumentError::ConfigNotFound(screener_id.to_string()))?;
        parse_definition(screener_id, json)
    }

    fn available(&self) -> Vec<String> {
        BUNDLED.iter().map(|(id, _)| id.to_string()).collect()
    }
}

/// Reads `<dir>/<id>.json`, optionally falling back to the bundled set.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    dir: PathBuf,
    bundled_fallback: bool,
}

impl DirectoryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            bundled_fallback: false,
        }
    }

    pub fn with_bundled_fallback(mut self) -> Self {
        self.bundled_fallback = true;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, screener_id: &str) -> Option<PathBuf> {
        let safe = !screener_id.is_empty()
            && screener_id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        safe.then(|| self.dir.join(keys::screener_file(screener_id)))
    }
}

impl ScreenerLoader for DirectoryLoader {
    fn load_config(&self, screener_id: &str) -> Result<ScreenerDefinition, InstrumentError> {
        let path = self
            .path_for(screener_id)
            .ok_or_else(|| InstrumentError::ConfigNotFound(screener_id.to_string()))?;

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                tracing::debug!(path = %path.display(), "loading screener from directory");
                parse_definition(screener_id, &json)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if self.bundled_fallback {
                    BundledScreeners.load_config(screener_id)
                } else {
                    Err(InstrumentError::ConfigNotFound(screener_id.to_string()))
                }
            }
            Err(source) => Err(InstrumentError::ConfigRead {
                screener_id: screener_id.to_string(),
                source,
            }),
        }
    }

    fn available(&self) -> Vec<String> {
        let mut ids: Vec<String> = std::fs::read_dir(&self.dir)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter_map(|entry| {
                        let path = entry.path();
                        if path.extension().and_then(|e| e.to_str()) != Some("json") {
                            return None;
                        }
                        path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
                    })
                    .collect()
            })
            .unwrap_or_default();

        if self.bundled_fallback {
            ids.extend(BundledScreeners.available());
        }
        ids.sort();
        ids.dedup();
        ids
    }
}
