//! Per-cycle and per-session result records.
//!
//! These are data-only records suitable for direct serialization; the
//! engine does not retain them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::pattern::DetectedPattern;
use super::snapshot::MetricSnapshot;

/// Snapshot field values as they appear in a cycle report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReport {
    pub recursion_depth: u32,
    pub coherence_score: f64,
    pub symbolic_density: f64,
    pub temporal_anchor: f64,
    pub emotional_intensity: f64,
    pub meaning_saturation: f64,
    pub session_duration_minutes: f64,
}

impl From<&MetricSnapshot> for StateReport {
    fn from(snapshot: &MetricSnapshot) -> Self {
        Self {
            recursion_depth: snapshot.recursion_depth,
            coherence_score: snapshot.coherence_score,
            symbolic_density: snapshot.symbolic_density,
            temporal_anchor: snapshot.temporal_anchor,
            emotional_intensity: snapshot.emotional_intensity,
            meaning_saturation: snapshot.meaning_saturation,
            session_duration_minutes: snapshot.session_duration_minutes(),
        }
    }
}

/// The decision record produced by one processing cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub timestamp: DateTime<Utc>,
    pub session_id: Uuid,
    pub state: StateReport,
    pub patterns_detected: Vec<DetectedPattern>,
    /// Outcome of the invoked intervention, if any. On action failure this
    /// is a degraded record with `error` and `fallback` fields; the failure
    /// is never surfaced as anything other than data.
    pub intervention: Option<Value>,
}

/// Aggregate view over one session, derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub duration_minutes: f64,
    pub total_states_recorded: usize,
    /// Count of DISTINCT interventions ever invoked this session, not the
    /// total invocation count.
    pub interventions_executed: usize,
    /// Mean coherence across all snapshots, rounded to two decimals.
    pub average_coherence: f64,
    pub maximum_recursion_depth: u32,
    pub containment_activated: bool,
    pub recommendations: Vec<String>,
}
