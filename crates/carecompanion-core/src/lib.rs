//! carecompanion-core
//!
//! Pure domain types, record-file conventions, and label resolution.
//! No I/O beyond reading a label catalog. This is the shared vocabulary of
//! the CareCompanion assessment engine.

pub mod error;
pub mod keys;
pub mod labels;
pub mod models;
