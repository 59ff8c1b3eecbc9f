// tenant.rs — Tenant fixture loading.
//
// Commands operate on a tenant file: a YAML document with a `scopes`
// list and a `policies` list, matching the store's row shapes. The file
// is parsed, the scope tree is built (which validates the hierarchy),
// and policies are indexed by scope.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use uuid::Uuid;

use acr_policy::{PolicyIndex, ScopedPolicy};
use acr_scope::{ScopeRecord, ScopeTree};

/// A parsed tenant file: flat scope and policy rows.
#[derive(Debug, Deserialize)]
pub struct TenantFile {
    pub scopes: Vec<ScopeRecord>,
    #[serde(default)]
    pub policies: Vec<ScopedPolicy>,
}

impl TenantFile {
    /// Load and parse a tenant YAML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tenant file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse tenant file {}", path.display()))
    }

    /// Build the validated scope tree and policy index.
    pub fn build(self) -> anyhow::Result<(ScopeTree, PolicyIndex)> {
        let tree = ScopeTree::build(self.scopes).context("invalid scope hierarchy")?;
        let index = PolicyIndex::from_policies(self.policies);
        Ok((tree, index))
    }
}

/// Find a scope by UUID or by materialized path ("acme.na.us").
pub fn find_scope(tree: &ScopeTree, selector: &str) -> Option<Uuid> {
    if let Ok(id) = Uuid::parse_str(selector) {
        if tree.contains(id) {
            return Some(id);
        }
    }
    all_scopes(tree)
        .into_iter()
        .find(|scope| scope.path == selector)
        .map(|scope| scope.id)
}

/// All scope records in the tree, root first then by level.
pub fn all_scopes(tree: &ScopeTree) -> Vec<&ScopeRecord> {
    let mut scopes = vec![tree.root()];
    scopes.extend(tree.regions());
    scopes.extend(tree.countries());
    scopes.extend(tree.brands());
    scopes
}
