//! carecompanion-instruments
//!
//! Screener definitions and the scoring engine. Pure data and pure
//! functions; the only I/O is reading definition files in
//! [`loader::DirectoryLoader`].

pub mod definition;
pub mod error;
pub mod loader;
pub mod scoring;

use definition::ScreenerDefinition;
use error::InstrumentError;

/// Resolves a screener identifier to a parsed, structurally checked definition.
pub trait ScreenerLoader: Send + Sync {
    fn load_config(&self, screener_id: &str) -> Result<ScreenerDefinition, InstrumentError>;

    /// Identifiers this loader can resolve, sorted.
    fn available(&self) -> Vec<String>;
}

/// Return every bundled screener definition.
pub fn all_screeners() -> Result<Vec<ScreenerDefinition>, InstrumentError> {
    let loader = loader::BundledScreeners;
    loader
        .available()
        .iter()
        .map(|id| loader.load_config(id))
        .collect()
}

/// Look up a bundled screener by ID.
pub fn get_screener(id: &str) -> Result<ScreenerDefinition, InstrumentError> {
    loader::BundledScreeners.load_config(id)
}
