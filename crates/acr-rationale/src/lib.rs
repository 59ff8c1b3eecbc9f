//! # acr-rationale
//!
//! Deterministic rationale generation for governance decisions.
//!
//! Every decision (allow / deny / escalate / conditional) gets a paired
//! explanation: a human-readable one-liner hard-capped at 140 characters,
//! and a structured record suitable for the audit trail. Formatting is a
//! fixed lookup — no model calls, no randomness — so the same decision
//! context always explains itself the same way.
//!
//! Two legacy decision-result shapes (the tier-based policy evaluation
//! result and the multi-agent process result) normalize onto the same
//! contract through [`DecisionOutcome`].
//!
//! ## Key invariants
//!
//! - The human string never exceeds 140 characters; overlong text is
//!   truncated to exactly 140 ending in "...".
//! - [`validate_rationale`] is a post-condition check, not a gate:
//!   generation always produces output, validation reports whether it
//!   meets the audit contract.

pub mod adapter;
pub mod error;
pub mod generator;

pub use adapter::{AgentProcessResult, DecisionOutcome, PolicyEvaluationResult, Reviewer};
pub use error::ValidationError;
pub use generator::{
    generate_rationale, validate_rationale, Actor, Decision, Rationale, RationaleInputs,
    RationaleRequest, StructuredRationale, Tool,
};
