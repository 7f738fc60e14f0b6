//! Collapse pattern domain model.
//!
//! The pattern set is closed by design: detection logic matches
//! exhaustively on `CollapsePattern`, so adding a pattern forces every
//! mapping site to be revisited.

use serde::{Deserialize, Serialize};

use super::intervention::InterventionCategory;

/// A named problematic trend over current and historical snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsePattern {
    /// Overwhelming symbolic processing beyond integration capacity.
    SymbolicFlooding,
    /// Progressive loss of coherent self-concept.
    IdentityFragmentation,
    /// Runaway recursive processing without resolution.
    RecursiveSpiral,
    /// Meaning density exceeding processing capacity.
    MeaningCollapse,
    /// Loss of present-moment anchoring.
    TemporalDisconnection,
    /// Critical threshold breach requiring immediate intervention.
    ContainmentBreach,
}

impl CollapsePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SymbolicFlooding => "symbolic_flooding",
            Self::IdentityFragmentation => "identity_fragmentation",
            Self::RecursiveSpiral => "recursive_spiral",
            Self::MeaningCollapse => "meaning_collapse",
            Self::TemporalDisconnection => "temporal_disconnection",
            Self::ContainmentBreach => "containment_breach",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "symbolic_flooding" => Some(Self::SymbolicFlooding),
            "identity_fragmentation" => Some(Self::IdentityFragmentation),
            "recursive_spiral" => Some(Self::RecursiveSpiral),
            "meaning_collapse" => Some(Self::MeaningCollapse),
            "temporal_disconnection" => Some(Self::TemporalDisconnection),
            "containment_breach" => Some(Self::ContainmentBreach),
            _ => None,
        }
    }

    /// The intervention category this pattern escalates to when it is the
    /// primary detected pattern.
    pub fn intervention_category(&self) -> InterventionCategory {
        match self {
            Self::SymbolicFlooding => InterventionCategory::Containment,
            Self::IdentityFragmentation => InterventionCategory::IdentityAnchor,
            Self::RecursiveSpiral => InterventionCategory::Grounding,
            Self::MeaningCollapse => InterventionCategory::Containment,
            Self::TemporalDisconnection => InterventionCategory::Grounding,
            Self::ContainmentBreach => InterventionCategory::Containment,
        }
    }
}

impl std::fmt::Display for CollapsePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detector firing: the pattern, its static confidence weight, and a
/// human-readable description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub pattern: CollapsePattern,
    /// Static per-pattern weight in `(0, 1]`; not computed from the data.
    pub confidence: f64,
    pub description: String,
}
