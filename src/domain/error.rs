use thiserror::Error;

/// Errors raised by pattern detector predicates.
///
/// Builtin detectors are total functions and never fail; this exists so
/// injected detectors can report malformed input without aborting the
/// cycle. The engine logs the failure and treats the detector as
/// non-firing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    #[error("Insufficient history: need {needed} snapshots, have {available}")]
    InsufficientHistory { needed: usize, available: usize },

    #[error("Malformed metric data: {0}")]
    MalformedMetrics(String),
}

/// Errors raised by intervention action functions.
///
/// Never propagated to the caller: the engine converts these into a
/// degraded result record with a fallback instruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterventionError {
    #[error("Protocol unavailable: {0}")]
    ProtocolUnavailable(String),

    #[error("Intervention action failed: {0}")]
    Action(String),
}

/// Errors raised when generating a session summary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("No session data available")]
    NoData,
}
