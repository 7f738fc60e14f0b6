//! Domain layer for the loopbreaker engine.
//!
//! This module contains core business logic and domain models.

pub mod error;
pub mod models;

// Re-export error types for convenient access
pub use error::{DetectorError, InterventionError, SummaryError};
