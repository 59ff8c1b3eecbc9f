// policy.rs — Scoped policies and the per-tenant policy index.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rules::RuleSet;

/// How a policy combines with the rule set accumulated above its scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InheritanceMode {
    /// This level's rules fully overwrite everything accumulated so far.
    Replace,
    /// Key-by-key merge; this level's value wins on collision.
    Merge,
    /// List fields union with the accumulated lists; scalars merge.
    Append,
}

impl std::fmt::Display for InheritanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InheritanceMode::Replace => write!(f, "replace"),
            InheritanceMode::Merge => write!(f, "merge"),
            InheritanceMode::Append => write!(f, "append"),
        }
    }
}

/// A policy attached to one scope in the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopedPolicy {
    /// Unique identifier for this policy.
    pub id: Uuid,

    /// The scope this policy attaches to.
    pub scope_id: Uuid,

    /// Human-readable name (e.g., "US HIPAA Compliance Policy").
    pub policy_name: String,

    /// How this policy combines with its ancestors.
    pub inheritance_mode: InheritanceMode,

    /// The rule set this policy contributes.
    pub rules: RuleSet,

    /// Optional overrides folded over `rules` before inheritance applies.
    #[serde(default)]
    pub override_rules: Option<RuleSet>,

    /// Explicit inheritance-chain parent, independent of scope nesting.
    /// Must belong to an ancestor scope, or be None for root policies.
    #[serde(default)]
    pub parent_policy_id: Option<Uuid>,

    /// The tenant this policy belongs to.
    pub enterprise_id: Uuid,

    /// When this policy was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When this policy was last updated.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,

    /// Who created this policy.
    pub created_by: String,
}

impl ScopedPolicy {
    /// Create a policy with a fresh id and current timestamps.
    pub fn new(
        scope_id: Uuid,
        policy_name: impl Into<String>,
        inheritance_mode: InheritanceMode,
        rules: RuleSet,
        enterprise_id: Uuid,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            scope_id,
            policy_name: policy_name.into(),
            inheritance_mode,
            rules,
            override_rules: None,
            parent_policy_id: None,
            enterprise_id,
            created_at: now,
            updated_at: now,
            created_by: created_by.into(),
        }
    }

    /// Set the override rules and return self (builder pattern).
    pub fn with_overrides(mut self, overrides: RuleSet) -> Self {
        self.override_rules = Some(overrides);
        self
    }

    /// Set the explicit parent policy and return self.
    pub fn with_parent(mut self, parent_policy_id: Uuid) -> Self {
        self.parent_policy_id = Some(parent_policy_id);
        self
    }

    /// The rule set this policy actually contributes at its level:
    /// `rules` with `override_rules` folded over it (override wins).
    pub fn effective_layer(&self) -> RuleSet {
        match &self.override_rules {
            None => self.rules.clone(),
            Some(overrides) => {
                let mut layer = self.rules.clone();
                layer.merge_from(overrides);
                layer
            }
        }
    }
}

/// Policies for one tenant, indexed by scope and by id.
///
/// At most one policy per scope — a later policy for the same scope
/// replaces the earlier one, matching the store's upsert semantics.
#[derive(Debug, Clone, Default)]
pub struct PolicyIndex {
    by_id: HashMap<Uuid, ScopedPolicy>,
    scope_to_policy: HashMap<Uuid, Uuid>,
}

impl PolicyIndex {
    /// Build an index from flat policy records.
    pub fn from_policies(policies: Vec<ScopedPolicy>) -> Self {
        let mut index = Self::default();
        for policy in policies {
            index.insert(policy);
        }
        index
    }

    /// Insert a policy, replacing any existing policy on the same scope.
    pub fn insert(&mut self, policy: ScopedPolicy) {
        if let Some(previous) = self.scope_to_policy.insert(policy.scope_id, policy.id) {
            self.by_id.remove(&previous);
        }
        self.by_id.insert(policy.id, policy);
    }

    /// The policy attached to a scope, if any.
    pub fn for_scope(&self, scope_id: Uuid) -> Option<&ScopedPolicy> {
        self.scope_to_policy
            .get(&scope_id)
            .and_then(|id| self.by_id.get(id))
    }

    /// Look up a policy by id.
    pub fn get(&self, policy_id: Uuid) -> Option<&ScopedPolicy> {
        self.by_id.get(&policy_id)
    }

    /// Number of policies in the index.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleValue;

    fn rules(pairs: &[(&str, RuleValue)]) -> RuleSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn mode_serializes_as_snake_case() {
        let json = serde_json::to_string(&InheritanceMode::Replace).unwrap();
        assert_eq!(json, "\"replace\"");
    }

    #[test]
    fn effective_layer_without_overrides_is_rules() {
        let policy = ScopedPolicy::new(
            Uuid::new_v4(),
            "Global Policy",
            InheritanceMode::Replace,
            rules(&[("min_approvals", 3i64.into())]),
            Uuid::new_v4(),
            "admin@acme.test",
        );
        assert_eq!(policy.effective_layer(), policy.rules);
    }

    #[test]
    fn override_rules_win_over_rules() {
        let policy = ScopedPolicy::new(
            Uuid::new_v4(),
            "Brand Policy",
            InheritanceMode::Append,
            rules(&[("min_approvals", 3i64.into()), ("brand_review", true.into())]),
            Uuid::new_v4(),
            "admin@acme.test",
        )
        .with_overrides(rules(&[("min_approvals", 5i64.into())]));

        let layer = policy.effective_layer();
        assert_eq!(layer.get("min_approvals"), Some(&RuleValue::Int(5)));
        assert_eq!(layer.get("brand_review"), Some(&RuleValue::Bool(true)));
    }

    #[test]
    fn index_keeps_one_policy_per_scope() {
        let scope = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let first = ScopedPolicy::new(
            scope,
            "v1",
            InheritanceMode::Merge,
            RuleSet::new(),
            tenant,
            "admin",
        );
        let second = ScopedPolicy::new(
            scope,
            "v2",
            InheritanceMode::Merge,
            RuleSet::new(),
            tenant,
            "admin",
        );
        let first_id = first.id;

        let index = PolicyIndex::from_policies(vec![first, second]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.for_scope(scope).unwrap().policy_name, "v2");
        assert!(index.get(first_id).is_none());
    }
}
