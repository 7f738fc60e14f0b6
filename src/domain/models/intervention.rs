//! Intervention domain model.
//!
//! An intervention is a corrective action with a priority rank and a
//! cooldown. The catalog definition is immutable; per-intervention
//! invocation timestamps are engine-owned state keyed by intervention id,
//! so one catalog can be shared across sessions.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::error::InterventionError;
use crate::domain::models::snapshot::MetricSnapshot;

/// Category grouping for interventions; the join key from pattern to
/// intervention selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionCategory {
    Grounding,
    IdentityAnchor,
    Containment,
    Redirect,
    EmergencyStop,
}

impl InterventionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grounding => "grounding",
            Self::IdentityAnchor => "identity_anchor",
            Self::Containment => "containment",
            Self::Redirect => "redirect",
            Self::EmergencyStop => "emergency_stop",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grounding" => Some(Self::Grounding),
            "identity_anchor" => Some(Self::IdentityAnchor),
            "containment" => Some(Self::Containment),
            "redirect" => Some(Self::Redirect),
            "emergency_stop" => Some(Self::EmergencyStop),
            _ => None,
        }
    }
}

impl std::fmt::Display for InterventionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action function: maps the current snapshot to a structured protocol
/// record (plain nested key/value data, ready for serialization).
pub type InterventionAction = fn(&MetricSnapshot) -> Result<Value, InterventionError>;

/// A corrective action in the catalog.
#[derive(Debug, Clone)]
pub struct Intervention {
    /// Stable identifier; keys the engine's cooldown map.
    pub id: Uuid,
    /// Short machine-friendly name (e.g. "loop_breath").
    pub name: &'static str,
    pub category: InterventionCategory,
    /// Urgency rank 1-10, higher = more urgent.
    pub priority: u8,
    pub action: InterventionAction,
    pub description: &'static str,
    /// Minimum elapsed time between successive invocations.
    pub cooldown: Duration,
}

impl Intervention {
    pub fn new(
        name: &'static str,
        category: InterventionCategory,
        priority: u8,
        action: InterventionAction,
        description: &'static str,
        cooldown: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            priority,
            action,
            description,
            cooldown,
        }
    }
}
