//! # acr-policy
//!
//! Policy inheritance and conflict detection for aicomplyr.
//!
//! Policies attach to scopes in the organizational hierarchy and combine
//! down the tree according to their inheritance mode:
//!
//! - **replace** — the level's rule set fully overwrites everything above it
//! - **merge** — key-by-key merge, the child's value wins on collision
//! - **append** — list fields become the union of parent and child values
//!
//! [`resolve_effective_policy`] computes the merged rule set visible at any
//! scope, with an ordered trace of which policy contributed at each level.
//! [`ConflictDetector`] compares a child policy against its parent on the
//! governance-critical field set and flags disagreements by severity.
//!
//! ## Key invariants
//!
//! - Resolution is deterministic: same tree + same policies → same rules.
//! - Conflicts are append-only audit records; resolution transitions the
//!   status exactly once and never alters the conflicting values.

pub mod conflict;
pub mod error;
pub mod policy;
pub mod resolver;
pub mod rules;

pub use conflict::{
    BlockedActionDivergence, ConflictDetector, ConflictKind, FieldCheck, PolicyConflict,
    Resolution, ResolutionStatus, Severity,
};
pub use error::{ConflictError, ResolveError};
pub use policy::{InheritanceMode, PolicyIndex, ScopedPolicy};
pub use resolver::{resolve_effective_policy, AppliedLayer, EffectivePolicy};
pub use rules::{RuleSet, RuleValue};
