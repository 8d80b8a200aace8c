//! Canadian mortgage pre-qualification rules engine.
//!
//! The [`qualification`] module holds the CMHC/OSFI calculators and the tool dispatcher; the
//! remaining modules carry the service plumbing shared by the API binary.

pub mod config;
pub mod error;
pub mod qualification;
pub mod telemetry;
