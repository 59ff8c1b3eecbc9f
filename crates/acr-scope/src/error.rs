// error.rs — Error types for hierarchy construction.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while building a [`crate::ScopeTree`] from flat records.
///
/// All of these indicate malformed input from the scope store — the build
/// either fully succeeds or fails with the first problem found.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// No scope of type "enterprise" was present in the input.
    #[error("no enterprise root scope found")]
    NoRoot,

    /// More than one scope of type "enterprise" was present.
    #[error("multiple enterprise root scopes: '{first}' and '{second}'")]
    MultipleRoots { first: Uuid, second: Uuid },

    /// A scope's parent id references a scope that is not in the input.
    #[error("scope '{scope_id}' references missing parent '{parent_id}'")]
    OrphanScope { scope_id: Uuid, parent_id: Uuid },

    /// A non-root scope has no parent reference at all.
    #[error("non-root scope '{scope_id}' has no parent")]
    DetachedScope { scope_id: Uuid },

    /// Two scopes share the same id.
    #[error("duplicate scope id '{scope_id}'")]
    DuplicateId { scope_id: Uuid },

    /// Two scopes share the same materialized path.
    #[error("duplicate scope path '{path}'")]
    DuplicatePath { path: String },

    /// A scope is not reachable from the root by parent links (cycle).
    #[error("scope '{scope_id}' is not reachable from the root")]
    UnreachableScope { scope_id: Uuid },
}
