//! Domain models for the loopbreaker engine.

pub mod intervention;
pub mod pattern;
pub mod report;
pub mod snapshot;

pub use intervention::{Intervention, InterventionAction, InterventionCategory};
pub use pattern::{CollapsePattern, DetectedPattern};
pub use report::{CycleReport, SessionSummary, StateReport};
pub use snapshot::{MetricSnapshot, MetricUpdate};
