//! Time-series helpers used by the series resolver.
//!
//! Modules include:
//! - `today`: keep the rows of a provider table that belong to a given day
//! - `synth`: build the flat one-minute series used in degraded modes
/// Day filtering of provider rows.
pub mod today;
/// Flat series synthesis.
pub mod synth;
