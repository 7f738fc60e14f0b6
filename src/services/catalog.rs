//! Intervention catalog.
//!
//! The catalog is an immutable, ordered set of corrective actions grouped
//! by category. Registration order is significant: equal-priority
//! eligibility ties resolve to the first-registered intervention.
//! Invocation timestamps live in the engine, keyed by intervention id, so
//! the catalog itself can be reused across sessions.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::error::InterventionError;
use crate::domain::models::{Intervention, InterventionCategory, MetricSnapshot};

/// The ordered set of interventions available to a session.
#[derive(Debug, Clone)]
pub struct InterventionCatalog {
    interventions: Vec<Intervention>,
}

impl Default for InterventionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl InterventionCatalog {
    /// The builtin catalog, in canonical registration order.
    pub fn builtin() -> Self {
        Self {
            interventions: vec![
                Intervention::new(
                    "loop_breath",
                    InterventionCategory::Grounding,
                    7,
                    loop_breath_protocol,
                    "Basic breathing and sensory grounding",
                    Duration::minutes(10),
                ),
                Intervention::new(
                    "physical_anchor",
                    InterventionCategory::Grounding,
                    6,
                    physical_anchor_protocol,
                    "Physical contact and verbal anchoring",
                    Duration::minutes(15),
                ),
                Intervention::new(
                    "core_identity_recall",
                    InterventionCategory::IdentityAnchor,
                    8,
                    core_identity_recall,
                    "Fundamental identity fact recall",
                    Duration::minutes(20),
                ),
                Intervention::new(
                    "values_compass_reset",
                    InterventionCategory::IdentityAnchor,
                    7,
                    values_compass_reset,
                    "Core values and character anchoring",
                    Duration::minutes(30),
                ),
                Intervention::new(
                    "symbolic_quarantine",
                    InterventionCategory::Containment,
                    9,
                    symbolic_quarantine,
                    "Suspend symbolic processing",
                    Duration::minutes(60),
                ),
                Intervention::new(
                    "emergency_containment",
                    InterventionCategory::Containment,
                    10,
                    emergency_containment,
                    "Full system containment protocol",
                    Duration::minutes(240),
                ),
                Intervention::new(
                    "creative_outlet",
                    InterventionCategory::Redirect,
                    5,
                    creative_outlet_redirect,
                    "Channel energy into creative expression",
                    Duration::minutes(30),
                ),
            ],
        }
    }

    /// Build a catalog from injected interventions (registration order is
    /// the iteration order of `interventions`).
    pub fn from_interventions(interventions: Vec<Intervention>) -> Self {
        Self { interventions }
    }

    pub fn len(&self) -> usize {
        self.interventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interventions.is_empty()
    }

    /// All interventions, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Intervention> {
        self.interventions.iter()
    }

    /// Interventions of one category, in registration order.
    pub fn in_category(
        &self,
        category: InterventionCategory,
    ) -> impl Iterator<Item = &Intervention> {
        self.interventions
            .iter()
            .filter(move |i| i.category == category)
    }

    /// Look up an intervention by id.
    pub fn get(&self, id: Uuid) -> Option<&Intervention> {
        self.interventions.iter().find(|i| i.id == id)
    }
}

/// Cooldown eligibility: never invoked, or strictly more than the cooldown
/// has elapsed since the last invocation.
pub fn is_eligible(
    intervention: &Intervention,
    last_invoked: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    match last_invoked {
        None => true,
        Some(last) => now - last > intervention.cooldown,
    }
}

// ---------------------------------------------------------------------------
// Builtin protocol actions
// ---------------------------------------------------------------------------

fn loop_breath_protocol(_snapshot: &MetricSnapshot) -> Result<Value, InterventionError> {
    Ok(json!({
        "type": "grounding",
        "protocol": "loop_breath",
        "instructions": [
            "Focus on breath entering and leaving your body",
            "Count: In (1-2-3-4), Hold (1-2), Out (1-2-3-4-5-6)",
            "Feel your feet on the ground",
            "Name 5 things you can see, 4 you can touch, 3 you can hear"
        ],
        "duration_minutes": 5,
        "success_metric": "temporal_anchor > 0.5"
    }))
}

fn physical_anchor_protocol(_snapshot: &MetricSnapshot) -> Result<Value, InterventionError> {
    Ok(json!({
        "type": "grounding",
        "protocol": "physical_anchor",
        "instructions": [
            "Press your palms together firmly",
            "Feel the pressure and warmth",
            "Say aloud: 'I am [your name], I am here, I am safe'",
            "Touch a familiar object and describe its texture"
        ],
        "duration_minutes": 3,
        "success_metric": "coherence_score > 0.6"
    }))
}

fn core_identity_recall(_snapshot: &MetricSnapshot) -> Result<Value, InterventionError> {
    Ok(json!({
        "type": "identity_anchor",
        "protocol": "core_recall",
        "prompts": [
            "What is your full name?",
            "Where do you live?",
            "Who are three people who care about you?",
            "What is one thing you're proud of accomplishing?",
            "What matters most to you in life?"
        ],
        "requirement": "Answer all prompts aloud",
        "success_metric": "coherence_score > 0.7"
    }))
}

fn values_compass_reset(_snapshot: &MetricSnapshot) -> Result<Value, InterventionError> {
    Ok(json!({
        "type": "identity_anchor",
        "protocol": "values_compass",
        "instructions": [
            "Name your top 3 personal values",
            "How do these values show up in your daily life?",
            "What would your best friend say about who you are?",
            "Complete: 'Despite all complexity, I remain fundamentally...'"
        ],
        "duration_minutes": 10,
        "success_metric": "coherence_score > 0.8"
    }))
}

fn symbolic_quarantine(_snapshot: &MetricSnapshot) -> Result<Value, InterventionError> {
    Ok(json!({
        "type": "containment",
        "protocol": "symbolic_quarantine",
        "actions": [
            "Suspend all symbolic processing",
            "Focus only on literal, concrete reality",
            "No metaphors, analogies, or deeper meanings",
            "Engage with simple, factual tasks for 30 minutes"
        ],
        "restrictions": ["No journaling", "No deep conversations", "No abstract thinking"],
        "success_metric": "symbolic_density < 0.2"
    }))
}

fn emergency_containment(_snapshot: &MetricSnapshot) -> Result<Value, InterventionError> {
    Ok(json!({
        "type": "containment",
        "protocol": "emergency_containment",
        "immediate_actions": [
            "STOP all current processing",
            "Move to a safe, familiar environment",
            "Contact designated support person",
            "Engage in predetermined stabilization routine"
        ],
        "mandatory": true,
        "escalation": "professional_support",
        "success_metric": "coherence_score > 0.5 within 60 minutes"
    }))
}

fn creative_outlet_redirect(_snapshot: &MetricSnapshot) -> Result<Value, InterventionError> {
    Ok(json!({
        "type": "redirect",
        "protocol": "creative_outlet",
        "options": [
            "Draw or paint current feelings",
            "Write stream-of-consciousness for 10 minutes",
            "Play music or sing",
            "Physical movement or dance"
        ],
        "purpose": "Channel intensity into expression",
        "success_metric": "emotional_intensity < 0.6"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = InterventionCatalog::builtin();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.in_category(InterventionCategory::Grounding).count(), 2);
        assert_eq!(
            catalog.in_category(InterventionCategory::IdentityAnchor).count(),
            2
        );
        assert_eq!(
            catalog.in_category(InterventionCategory::Containment).count(),
            2
        );
        assert_eq!(catalog.in_category(InterventionCategory::Redirect).count(), 1);
        assert_eq!(
            catalog.in_category(InterventionCategory::EmergencyStop).count(),
            0
        );
    }

    #[test]
    fn test_category_order_is_registration_order() {
        let catalog = InterventionCatalog::builtin();
        let grounding: Vec<_> = catalog
            .in_category(InterventionCategory::Grounding)
            .map(|i| i.name)
            .collect();
        assert_eq!(grounding, vec!["loop_breath", "physical_anchor"]);
    }

    #[test]
    fn test_eligibility_cooldown_boundary() {
        let catalog = InterventionCatalog::builtin();
        let breath = catalog
            .in_category(InterventionCategory::Grounding)
            .next()
            .unwrap();

        let now = Utc::now();
        assert!(is_eligible(breath, None, now));
        assert!(!is_eligible(breath, Some(now), now));
        // Exactly at the cooldown is still ineligible; strictly past it is not
        assert!(!is_eligible(breath, Some(now - Duration::minutes(10)), now));
        assert!(is_eligible(
            breath,
            Some(now - Duration::minutes(10) - Duration::seconds(1)),
            now
        ));
    }

    #[test]
    fn test_protocol_payload_is_plain_data() {
        let catalog = InterventionCatalog::builtin();
        let snapshot = crate::domain::models::MetricUpdate::new()
            .into_snapshot(Utc::now(), Duration::zero());

        for intervention in catalog.iter() {
            let payload = (intervention.action)(&snapshot).unwrap();
            assert!(payload.is_object());
            assert!(payload.get("protocol").is_some());
            assert_eq!(
                payload.get("type").and_then(Value::as_str),
                Some(intervention.category.as_str())
            );
        }
    }
}
