//! # acr-risk
//!
//! Risk tier classification for AI tools.
//!
//! Tools are scored 0–100 across six dimensions (NIST AI RMF-inspired),
//! combined into a fixed-weight composite, and mapped onto a five-tier
//! scale from minimal to critical. Each tier carries an escalating audit
//! checklist — every higher tier's checklist is a strict superset of the
//! tier below.
//!
//! [`classify`] is a pure function: no I/O, no randomness, no
//! time-dependence. Identical scores always produce the identical profile.

pub mod classifier;
pub mod error;
pub mod tier;

pub use classifier::{classify, DimensionScores, RiskProfile};
pub use error::RiskError;
pub use tier::RiskTier;
