//! gradetrend-core — Grade trend engine, normalizer, and course parsing.
//!
//! This crate defines the evaluation data model, the cumulative
//! weight-normalized trend engine, and the plumbing that turns raw extracted
//! course text into engine input.

pub mod config;
pub mod error;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod report;
pub mod trends;
