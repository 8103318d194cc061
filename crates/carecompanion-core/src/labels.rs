//! Localization lookup for prompt and option label keys.
//!
//! Screener definitions carry keys (`ucla3_q1`, `opt_hardly_ever`) rather
//! than display text. A [`LabelResolver`] turns a key into text and never
//! fails: unresolved keys fall back to a humanized form of the key.

use std::collections::HashMap;
use std::path::Path;

use crate::error::CoreError;

pub trait LabelResolver {
    fn resolve_label(&self, key: &str) -> String;
}

/// Flat key → text catalog, loaded from a JSON object.
#[derive(Debug, Clone, Default)]
pub struct LabelCatalog {
    labels: HashMap<String, String>,
}

impl LabelCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let labels: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { labels })
    }

    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl LabelResolver for LabelCatalog {
    fn resolve_label(&self, key: &str) -> String {
        match self.labels.get(key) {
            Some(text) if !text.trim().is_empty() => text.clone(),
            _ => humanize(key),
        }
    }
}

/// Resolver with no catalog at all; every key is humanized.
#[derive(Debug, Clone, Copy, Default)]
pub struct Humanized;

impl LabelResolver for Humanized {
    fn resolve_label(&self, key: &str) -> String {
        humanize(key)
    }
}

/// `opt_hardly_ever` → `Opt hardly ever`.
pub fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
