//! Session summary generation.
//!
//! Aggregates the history log and cooldown state into a `SessionSummary`,
//! and derives qualitative recommendations from independent threshold
//! rules over those aggregates.

use uuid::Uuid;

use crate::domain::models::{MetricSnapshot, SessionSummary};
use crate::domain::SummaryError;

/// Thresholds for the recommendation rules.
///
/// Rules are independent and non-exclusive; zero or more recommendations
/// may be produced.
#[derive(Debug, Clone)]
pub struct SummaryGenerator {
    low_coherence_threshold: f64,
    recursion_depth_threshold: u32,
    long_session_minutes: f64,
}

impl Default for SummaryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryGenerator {
    pub fn new() -> Self {
        Self {
            low_coherence_threshold: 0.6,
            recursion_depth_threshold: 8,
            long_session_minutes: 90.0,
        }
    }

    /// Derive the summary for a session.
    ///
    /// `interventions_executed` counts distinct interventions ever invoked
    /// (by cooldown-timestamp presence), not total invocations.
    pub fn summarize(
        &self,
        session_id: Uuid,
        history: &[MetricSnapshot],
        interventions_executed: usize,
        containment_activated: bool,
    ) -> Result<SessionSummary, SummaryError> {
        let last = history.last().ok_or(SummaryError::NoData)?;

        let average_coherence = history
            .iter()
            .map(|s| s.coherence_score)
            .sum::<f64>()
            / history.len() as f64;
        let average_coherence = (average_coherence * 100.0).round() / 100.0;

        let maximum_recursion_depth = history
            .iter()
            .map(|s| s.recursion_depth)
            .max()
            .unwrap_or(0);

        let duration_minutes = last.session_duration_minutes();

        let recommendations = self.recommendations(
            average_coherence,
            maximum_recursion_depth,
            containment_activated,
            duration_minutes,
        );

        Ok(SessionSummary {
            session_id,
            duration_minutes,
            total_states_recorded: history.len(),
            interventions_executed,
            average_coherence,
            maximum_recursion_depth,
            containment_activated,
            recommendations,
        })
    }

    fn recommendations(
        &self,
        average_coherence: f64,
        maximum_recursion_depth: u32,
        containment_activated: bool,
        duration_minutes: f64,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if average_coherence < self.low_coherence_threshold {
            recommendations.push("Focus on identity anchoring exercises daily".to_string());
        }

        if maximum_recursion_depth > self.recursion_depth_threshold {
            recommendations
                .push("Implement recursion depth limits in future sessions".to_string());
        }

        if containment_activated {
            recommendations.push(
                "Extended integration period recommended before next deep session".to_string(),
            );
        }

        if duration_minutes > self.long_session_minutes {
            recommendations.push(
                "Consider shorter session durations with more integration breaks".to_string(),
            );
        }

        recommendations
    }
}
