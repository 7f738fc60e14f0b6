//! Collapse pattern detection.
//!
//! `PatternCatalog` holds the fixed, ordered set of detectors. Each
//! detector pairs a pure predicate over `(current snapshot, history)` with
//! a static confidence weight — confidence is a per-pattern constant, not
//! computed from the data. A failing predicate is logged and treated as
//! non-firing; it never aborts the cycle.

use crate::domain::error::DetectorError;
use crate::domain::models::{CollapsePattern, DetectedPattern, MetricSnapshot};

/// Predicate over the current snapshot and the full session history
/// (chronological, current snapshot last).
pub type DetectorPredicate =
    fn(&MetricSnapshot, &[MetricSnapshot]) -> Result<bool, DetectorError>;

/// One pattern detector: predicate + static confidence + description.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    pub pattern: CollapsePattern,
    pub predicate: DetectorPredicate,
    /// Static confidence weight in `(0, 1]`.
    pub confidence: f64,
    pub description: &'static str,
}

/// The ordered set of pattern detectors for a session.
///
/// Registration order is significant: downstream selection breaks
/// confidence ties in favor of the first-registered pattern.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    detectors: Vec<PatternDetector>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternCatalog {
    /// The six builtin detectors, in canonical registration order.
    pub fn builtin() -> Self {
        Self {
            detectors: vec![
                PatternDetector {
                    pattern: CollapsePattern::SymbolicFlooding,
                    predicate: detect_symbolic_flooding,
                    confidence: 0.8,
                    description: "Overwhelming symbolic processing beyond integration capacity",
                },
                PatternDetector {
                    pattern: CollapsePattern::IdentityFragmentation,
                    predicate: detect_identity_fragmentation,
                    confidence: 0.7,
                    description: "Progressive loss of coherent self-concept",
                },
                PatternDetector {
                    pattern: CollapsePattern::RecursiveSpiral,
                    predicate: detect_recursive_spiral,
                    confidence: 0.9,
                    description: "Runaway recursive processing without resolution",
                },
                PatternDetector {
                    pattern: CollapsePattern::MeaningCollapse,
                    predicate: detect_meaning_collapse,
                    confidence: 0.8,
                    description: "Meaning density exceeding processing capacity",
                },
                PatternDetector {
                    pattern: CollapsePattern::TemporalDisconnection,
                    predicate: detect_temporal_disconnection,
                    confidence: 0.6,
                    description: "Loss of present-moment anchoring",
                },
                PatternDetector {
                    pattern: CollapsePattern::ContainmentBreach,
                    predicate: detect_containment_breach,
                    confidence: 1.0,
                    description: "Critical threshold breach requiring immediate intervention",
                },
            ],
        }
    }

    /// An empty catalog. Detectors are registered with [`Self::push`].
    pub fn empty() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Register an additional detector at the end of the catalog.
    pub fn push(&mut self, detector: PatternDetector) {
        self.detectors.push(detector);
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Evaluate every detector against the current snapshot and history.
    ///
    /// Results come back in registration order; multiple patterns may fire
    /// on the same cycle. A detector error is logged and skipped — the
    /// remaining detectors still run.
    pub fn detect(
        &self,
        snapshot: &MetricSnapshot,
        history: &[MetricSnapshot],
    ) -> Vec<DetectedPattern> {
        let mut detected = Vec::new();

        for detector in &self.detectors {
            match (detector.predicate)(snapshot, history) {
                Ok(true) => {
                    tracing::debug!(
                        pattern = %detector.pattern,
                        confidence = detector.confidence,
                        "collapse pattern detected"
                    );
                    detected.push(DetectedPattern {
                        pattern: detector.pattern,
                        confidence: detector.confidence,
                        description: detector.description.to_string(),
                    });
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        pattern = %detector.pattern,
                        error = %e,
                        "pattern detector failed, treating as non-firing"
                    );
                }
            }
        }

        detected
    }
}

// ---------------------------------------------------------------------------
// Builtin predicates
// ---------------------------------------------------------------------------

fn detect_symbolic_flooding(
    snapshot: &MetricSnapshot,
    _history: &[MetricSnapshot],
) -> Result<bool, DetectorError> {
    Ok(snapshot.symbolic_density > 0.8
        && snapshot.recursion_depth > 5
        && snapshot.meaning_saturation > 0.7)
}

fn detect_identity_fragmentation(
    snapshot: &MetricSnapshot,
    history: &[MetricSnapshot],
) -> Result<bool, DetectorError> {
    // History includes the current snapshot as its last entry.
    if history.len() < 3 {
        return Ok(false);
    }
    let recent: Vec<f64> = history[history.len() - 3..]
        .iter()
        .map(|s| s.coherence_score)
        .collect();
    let strictly_decreasing = recent.windows(2).all(|pair| pair[0] > pair[1]);
    Ok(snapshot.coherence_score < 0.4 && strictly_decreasing)
}

fn detect_recursive_spiral(
    snapshot: &MetricSnapshot,
    _history: &[MetricSnapshot],
) -> Result<bool, DetectorError> {
    Ok(snapshot.recursion_depth > 10
        && snapshot.emotional_intensity > 0.8
        && snapshot.session_duration.num_seconds() > 1800)
}

fn detect_meaning_collapse(
    snapshot: &MetricSnapshot,
    _history: &[MetricSnapshot],
) -> Result<bool, DetectorError> {
    Ok(snapshot.meaning_saturation > 0.9
        && snapshot.coherence_score < 0.3
        && snapshot.symbolic_density > 0.9)
}

fn detect_temporal_disconnection(
    snapshot: &MetricSnapshot,
    _history: &[MetricSnapshot],
) -> Result<bool, DetectorError> {
    Ok(snapshot.temporal_anchor < 0.2 && snapshot.session_duration.num_seconds() > 3600)
}

/// The only OR-combined detector: any single breach condition fires it.
fn detect_containment_breach(
    snapshot: &MetricSnapshot,
    _history: &[MetricSnapshot],
) -> Result<bool, DetectorError> {
    Ok(snapshot.recursion_depth > 15
        || snapshot.meaning_saturation > 0.95
        || snapshot.coherence_score < 0.1)
}
