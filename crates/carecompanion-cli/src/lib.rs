//! carecompanion-cli library root.
//!
//! Re-exports the host modules so integration tests can drive the visit
//! workflow and config handling without going through the command line.

pub mod config;
pub mod error;
pub mod workflow;
