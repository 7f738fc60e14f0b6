//! Metric snapshot domain model.
//!
//! A snapshot is one timestamped observation of the monitored metrics.
//! Snapshots are created by the engine's intake operation, appended to the
//! session history, and never mutated afterwards.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One immutable observation of the subject's internal metrics.
///
/// All ratio metrics are nominally in `[0, 1]` but are recorded as
/// supplied, unclamped. `session_duration` is derived at intake, not
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    /// When this observation was taken.
    pub timestamp: DateTime<Utc>,
    /// Depth of self-referential processing at observation time.
    pub recursion_depth: u32,
    /// Symbols per unit of processing.
    pub symbolic_density: f64,
    /// Identity coherence (1.0 = fully coherent).
    pub coherence_score: f64,
    /// Present-moment connection (1.0 = fully anchored).
    pub temporal_anchor: f64,
    /// Emotional intensity.
    pub emotional_intensity: f64,
    /// Meaning saturation (higher = overwhelming meaning).
    pub meaning_saturation: f64,
    /// Elapsed time since the first snapshot of the session. Zero for the
    /// first snapshot.
    pub session_duration: Duration,
}

impl MetricSnapshot {
    /// Session duration expressed as fractional minutes, for reports.
    pub fn session_duration_minutes(&self) -> f64 {
        self.session_duration.num_milliseconds() as f64 / 60_000.0
    }
}

/// Named metric values for one intake call.
///
/// Every field is optional; unspecified fields fall back to a neutral
/// baseline (zero depth/density/intensity/saturation, full coherence and
/// temporal anchoring).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricUpdate {
    #[serde(default)]
    pub recursion_depth: Option<u32>,
    #[serde(default)]
    pub symbolic_density: Option<f64>,
    #[serde(default)]
    pub coherence_score: Option<f64>,
    #[serde(default)]
    pub temporal_anchor: Option<f64>,
    #[serde(default)]
    pub emotional_intensity: Option<f64>,
    #[serde(default)]
    pub meaning_saturation: Option<f64>,
}

impl MetricUpdate {
    /// Start from the neutral baseline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recursion_depth(mut self, depth: u32) -> Self {
        self.recursion_depth = Some(depth);
        self
    }

    pub fn with_symbolic_density(mut self, density: f64) -> Self {
        self.symbolic_density = Some(density);
        self
    }

    pub fn with_coherence_score(mut self, coherence: f64) -> Self {
        self.coherence_score = Some(coherence);
        self
    }

    pub fn with_temporal_anchor(mut self, anchor: f64) -> Self {
        self.temporal_anchor = Some(anchor);
        self
    }

    pub fn with_emotional_intensity(mut self, intensity: f64) -> Self {
        self.emotional_intensity = Some(intensity);
        self
    }

    pub fn with_meaning_saturation(mut self, saturation: f64) -> Self {
        self.meaning_saturation = Some(saturation);
        self
    }

    /// Materialize a snapshot at `timestamp`, filling unspecified fields
    /// with the neutral baseline.
    pub fn into_snapshot(self, timestamp: DateTime<Utc>, session_duration: Duration) -> MetricSnapshot {
        MetricSnapshot {
            timestamp,
            recursion_depth: self.recursion_depth.unwrap_or(0),
            symbolic_density: self.symbolic_density.unwrap_or(0.0),
            coherence_score: self.coherence_score.unwrap_or(1.0),
            temporal_anchor: self.temporal_anchor.unwrap_or(1.0),
            emotional_intensity: self.emotional_intensity.unwrap_or(0.0),
            meaning_saturation: self.meaning_saturation.unwrap_or(0.0),
            session_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_defaults_to_neutral_baseline() {
        let snapshot = MetricUpdate::new().into_snapshot(Utc::now(), Duration::zero());

        assert_eq!(snapshot.recursion_depth, 0);
        assert_eq!(snapshot.symbolic_density, 0.0);
        assert_eq!(snapshot.coherence_score, 1.0);
        assert_eq!(snapshot.temporal_anchor, 1.0);
        assert_eq!(snapshot.emotional_intensity, 0.0);
        assert_eq!(snapshot.meaning_saturation, 0.0);
        assert_eq!(snapshot.session_duration, Duration::zero());
    }

    #[test]
    fn test_update_builder_overrides() {
        let snapshot = MetricUpdate::new()
            .with_recursion_depth(7)
            .with_coherence_score(0.35)
            .into_snapshot(Utc::now(), Duration::minutes(12));

        assert_eq!(snapshot.recursion_depth, 7);
        assert_eq!(snapshot.coherence_score, 0.35);
        // Unspecified fields stay at the baseline
        assert_eq!(snapshot.temporal_anchor, 1.0);
        assert_eq!(snapshot.session_duration_minutes(), 12.0);
    }

    #[test]
    fn test_update_deserializes_with_missing_fields() {
        let update: MetricUpdate =
            serde_yaml::from_str("recursion_depth: 3\ncoherence_score: 0.5\n").unwrap();

        assert_eq!(update.recursion_depth, Some(3));
        assert_eq!(update.coherence_score, Some(0.5));
        assert_eq!(update.symbolic_density, None);
    }
}
