//! Cycle orchestration.
//!
//! `LoopBreaker` owns all mutable session state: the append-only history
//! log, the per-intervention cooldown timestamps, and the one-way
//! containment flag. Each `process_cycle` call runs the five-step pipeline
//! intake → detect → select → invoke → report, reading the wall clock once
//! at entry. Every entry point returns a value; failures inside the
//! pipeline are absorbed and re-expressed as data in the report.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::domain::models::{
    CycleReport, DetectedPattern, Intervention, InterventionCategory, MetricSnapshot,
    MetricUpdate, SessionSummary, StateReport,
};
use crate::domain::SummaryError;
use crate::services::catalog::{is_eligible, InterventionCatalog};
use crate::services::detectors::PatternCatalog;
use crate::services::summary::SummaryGenerator;

/// Stateful monitoring-and-intervention engine for one session.
///
/// Single-threaded and synchronous: callers must serialize calls to one
/// instance. Concurrent sessions each get their own engine with their own
/// session id; no state is shared across instances.
pub struct LoopBreaker {
    session_id: Uuid,
    history: Vec<MetricSnapshot>,
    detectors: PatternCatalog,
    catalog: InterventionCatalog,
    /// Last-invoked timestamps keyed by intervention id. The catalog stays
    /// immutable; this map is the only cooldown state.
    last_invoked: HashMap<Uuid, DateTime<Utc>>,
    /// One-way flag: set when any containment intervention is invoked,
    /// never cleared within the session.
    containment_active: bool,
}

impl Default for LoopBreaker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopBreaker {
    /// New session with the builtin detector and intervention catalogs.
    pub fn new() -> Self {
        Self::with_catalogs(PatternCatalog::builtin(), InterventionCatalog::builtin())
    }

    /// New session with injected catalogs.
    pub fn with_catalogs(detectors: PatternCatalog, catalog: InterventionCatalog) -> Self {
        let session_id = Uuid::new_v4();
        tracing::debug!(%session_id, "session started");
        Self {
            session_id,
            history: Vec::new(),
            detectors,
            catalog,
            last_invoked: HashMap::new(),
            containment_active: false,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The session history, chronological.
    pub fn history(&self) -> &[MetricSnapshot] {
        &self.history
    }

    /// Whether a containment intervention has been invoked this session.
    pub fn containment_active(&self) -> bool {
        self.containment_active
    }

    /// Record a new snapshot from named metric values. Always succeeds.
    pub fn record_state(&mut self, update: MetricUpdate) -> &MetricSnapshot {
        self.record_state_at(update, Utc::now())
    }

    pub(crate) fn record_state_at(
        &mut self,
        update: MetricUpdate,
        now: DateTime<Utc>,
    ) -> &MetricSnapshot {
        let session_duration = self
            .history
            .first()
            .map_or_else(Duration::zero, |first| now - first.timestamp);

        let snapshot = update.into_snapshot(now, session_duration);
        self.history.push(snapshot);
        self.history.last().expect("history is non-empty after push")
    }

    /// Select the intervention for the detected patterns, or `None` when
    /// nothing fired, the mapped category is empty, or every candidate is
    /// cooling down.
    pub fn select_intervention(&self, detected: &[DetectedPattern]) -> Option<&Intervention> {
        self.select_intervention_at(detected, Utc::now())
    }

    pub(crate) fn select_intervention_at(
        &self,
        detected: &[DetectedPattern],
        now: DateTime<Utc>,
    ) -> Option<&Intervention> {
        if detected.is_empty() {
            return None;
        }

        // Stable sort: equal confidences keep detection (registration) order,
        // so the first-registered pattern wins ties.
        let mut ranked: Vec<&DetectedPattern> = detected.iter().collect();
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let primary = ranked[0];
        let category = primary.pattern.intervention_category();

        // Highest-priority eligible intervention; strict comparison keeps
        // the first-registered one on priority ties.
        let mut chosen: Option<&Intervention> = None;
        for intervention in self.catalog.in_category(category) {
            if !is_eligible(
                intervention,
                self.last_invoked.get(&intervention.id).copied(),
                now,
            ) {
                continue;
            }
            if chosen.is_none_or(|c| intervention.priority > c.priority) {
                chosen = Some(intervention);
            }
        }

        if chosen.is_none() {
            tracing::debug!(
                pattern = %primary.pattern,
                category = %category,
                "no eligible intervention for primary pattern"
            );
        }

        chosen
    }

    /// Invoke an intervention against the current snapshot.
    ///
    /// The cooldown starts at the attempt: the last-invoked timestamp is
    /// recorded before the action runs, even if it fails. An action failure
    /// is returned as a degraded record, never propagated.
    pub fn invoke_intervention(
        &mut self,
        intervention: &Intervention,
        snapshot: &MetricSnapshot,
    ) -> Value {
        self.invoke_intervention_at(intervention, snapshot, Utc::now())
    }

    pub(crate) fn invoke_intervention_at(
        &mut self,
        intervention: &Intervention,
        snapshot: &MetricSnapshot,
        now: DateTime<Utc>,
    ) -> Value {
        self.last_invoked.insert(intervention.id, now);

        if intervention.category == InterventionCategory::Containment {
            if !self.containment_active {
                tracing::info!(session_id = %self.session_id, "containment activated");
            }
            self.containment_active = true;
        }

        match (intervention.action)(snapshot) {
            Ok(mut payload) => {
                if let Some(record) = payload.as_object_mut() {
                    record.insert("invocation_id".into(), json!(Uuid::new_v4()));
                    record.insert("executed_at".into(), json!(now.to_rfc3339()));
                    record.insert("session_id".into(), json!(self.session_id));
                }
                tracing::info!(
                    intervention = intervention.name,
                    category = %intervention.category,
                    priority = intervention.priority,
                    "intervention invoked"
                );
                payload
            }
            Err(e) => {
                tracing::warn!(
                    intervention = intervention.name,
                    error = %e,
                    "intervention action failed, returning degraded record"
                );
                json!({
                    "error": format!("Intervention execution failed: {e}"),
                    "intervention_type": intervention.category.as_str(),
                    "fallback": "Initiate manual grounding protocol"
                })
            }
        }
    }

    /// Run one full cycle: intake → detect → select → invoke → report.
    ///
    /// Always completes and always returns a report; no step is retried or
    /// rolled back.
    pub fn process_cycle(&mut self, update: MetricUpdate) -> CycleReport {
        self.process_cycle_at(update, Utc::now())
    }

    pub(crate) fn process_cycle_at(
        &mut self,
        update: MetricUpdate,
        now: DateTime<Utc>,
    ) -> CycleReport {
        let snapshot = self.record_state_at(update, now).clone();
        let detected = self.detectors.detect(&snapshot, &self.history);

        let intervention = self
            .select_intervention_at(&detected, now)
            .cloned()
            .map(|chosen| self.invoke_intervention_at(&chosen, &snapshot, now));

        CycleReport {
            timestamp: now,
            session_id: self.session_id,
            state: StateReport::from(&snapshot),
            patterns_detected: detected,
            intervention,
        }
    }

    /// Derive the session summary from the history and cooldown state.
    ///
    /// Idempotent between cycles. Returns [`SummaryError::NoData`] when no
    /// snapshot has been recorded.
    pub fn summarize(&self) -> Result<SessionSummary, SummaryError> {
        SummaryGenerator::new().summarize(
            self.session_id,
            &self.history,
            self.last_invoked.len(),
            self.containment_active,
        )
    }
}
