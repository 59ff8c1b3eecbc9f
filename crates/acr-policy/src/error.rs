// error.rs — Error types for resolution and conflict handling.

use thiserror::Error;
use uuid::Uuid;

use crate::conflict::ResolutionStatus;

/// Errors raised while resolving an effective policy.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The target scope id does not exist in the hierarchy.
    #[error("scope '{scope_id}' not found in hierarchy")]
    ScopeNotFound { scope_id: Uuid },
}

/// Errors raised while resolving a policy conflict.
#[derive(Debug, Error)]
pub enum ConflictError {
    /// The conflict has already been resolved; resolution is one-shot.
    #[error("conflict '{conflict_id}' already resolved as {status}")]
    AlreadyResolved {
        conflict_id: Uuid,
        status: ResolutionStatus,
    },
}
