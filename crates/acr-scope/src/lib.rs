//! # acr-scope
//!
//! Organizational scope hierarchy for aicomplyr.
//!
//! A tenant's organization is modeled as a tree of scopes:
//! enterprise → region → country → brand. Policies attach to scopes and
//! inherit down the tree, so the hierarchy must be well-formed before any
//! policy resolution can run.
//!
//! [`ScopeTree::build`] assembles the tree from flat [`ScopeRecord`] rows
//! (as read from the scope store) and rejects malformed input:
//!
//! - no enterprise root, or more than one
//! - a scope whose parent id references nothing (orphan)
//! - duplicate ids or materialized paths
//!
//! The built tree is read-only. Building twice from the same rows yields
//! structurally identical trees.

pub mod error;
pub mod record;
pub mod tree;

pub use error::HierarchyError;
pub use record::{ScopeRecord, ScopeType};
pub use tree::ScopeTree;
