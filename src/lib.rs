//! LoopBreaker - collapse pattern monitoring and intervention engine.
//!
//! LoopBreaker ingests periodic snapshots of a subject's internal metrics,
//! evaluates a fixed set of collapse patterns against the current snapshot
//! and recent history, and — when a pattern fires — selects and invokes one
//! corrective intervention from a catalog, subject to per-intervention
//! cooldowns and priority ordering.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Pure domain models and error types
//! - **Service Layer** (`services`): Detection, selection, and orchestration
//! - **CLI Layer** (`cli`): Command-line driver
//!
//! # Example
//!
//! ```
//! use loopbreaker::{LoopBreaker, MetricUpdate};
//!
//! let mut engine = LoopBreaker::new();
//! let report = engine.process_cycle(
//!     MetricUpdate::new()
//!         .with_recursion_depth(16)
//!         .with_coherence_score(0.3),
//! );
//! assert!(!report.patterns_detected.is_empty());
//! let summary = engine.summarize().expect("one cycle recorded");
//! assert!(summary.containment_activated);
//! ```

pub mod cli;
pub mod domain;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::{DetectorError, InterventionError, SummaryError};
pub use domain::models::{
    CollapsePattern, CycleReport, DetectedPattern, Intervention, InterventionCategory,
    MetricSnapshot, MetricUpdate, SessionSummary, StateReport,
};
pub use services::{InterventionCatalog, LoopBreaker, PatternCatalog, SummaryGenerator};
