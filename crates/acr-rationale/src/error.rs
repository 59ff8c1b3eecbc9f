// error.rs — Validation errors for generated rationales.

use thiserror::Error;

/// A rationale failed its post-generation invariant checks.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The human summary string is empty.
    #[error("rationale human summary is empty")]
    MissingHumanSummary,

    /// The human summary exceeds the 140-character hard cap.
    #[error("rationale human summary is {length} characters (limit 140)")]
    HumanSummaryTooLong { length: usize },

    /// A required structured field is empty or missing.
    #[error("rationale structured field '{field}' is missing")]
    MissingField { field: &'static str },
}
