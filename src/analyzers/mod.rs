//! Experiment data validation and aggregation.
//!
//! This module binds CSV headers to per-pipeline schemas, turns rows into
//! task or questionnaire records, and averages them per input method.

pub mod aggregate;
pub mod analyzer;
pub mod schema;
pub mod types;
pub mod utility;
