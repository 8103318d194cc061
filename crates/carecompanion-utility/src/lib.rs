//! carecompanion-utility
//!
//! Health-utility index model and trajectory analysis across visit stages.
//! Every visit workflow goes through this one implementation; the factor
//! tables and interpretation thresholds live nowhere else.

pub mod index;
pub mod trajectory;
