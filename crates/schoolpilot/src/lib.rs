//! SchoolPilot grade engine.
//!
//! Weighted category averages, required-score solving, and what-if projections over a course's
//! categories and recorded grades, plus the HTTP router, gradebook importer, configuration, and
//! telemetry plumbing the API service is built from.

pub mod config;
pub mod error;
pub mod grades;
pub mod telemetry;
