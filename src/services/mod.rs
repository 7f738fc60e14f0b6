//! Engine services: detection, catalog, orchestration, summary.

pub mod catalog;
pub mod detectors;
pub mod engine;
pub mod summary;

pub use catalog::InterventionCatalog;
pub use detectors::{PatternCatalog, PatternDetector};
pub use engine::LoopBreaker;
pub use summary::SummaryGenerator;
