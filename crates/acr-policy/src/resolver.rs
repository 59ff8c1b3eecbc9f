// resolver.rs — Effective policy computation.
//
// Walks the scope chain from the enterprise root down to the target and
// folds each level's policy into an accumulated rule set according to its
// inheritance mode. Levels without a policy pass through. The result is a
// computed view — nothing here is persisted.

use tracing::debug;
use uuid::Uuid;

use acr_scope::ScopeTree;

use crate::error::ResolveError;
use crate::policy::{InheritanceMode, PolicyIndex};
use crate::rules::RuleSet;

/// One level's contribution to an effective policy, in application order.
///
/// Recorded so callers can show *why* the effective policy looks the way
/// it does — the same observability the audit trail expects.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AppliedLayer {
    /// The policy that contributed at this level.
    pub policy_id: Uuid,
    /// The scope the policy is attached to.
    pub scope_id: Uuid,
    /// The policy's display name.
    pub policy_name: String,
    /// The inheritance mode that was applied.
    pub mode: InheritanceMode,
}

/// The merged rule set visible at a scope.
///
/// Computed on demand; has no identity of its own and is never stored.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EffectivePolicy {
    /// The scope this view was resolved for.
    pub scope_id: Uuid,
    /// The fully merged rule set.
    pub rules: RuleSet,
    /// Root-to-leaf trace of the layers that were applied.
    pub applied: Vec<AppliedLayer>,
}

/// Resolve the effective policy at a scope.
///
/// Deterministic: the same tree and policy index always yield the same
/// rule set, independent of any map iteration order.
pub fn resolve_effective_policy(
    tree: &ScopeTree,
    policies: &PolicyIndex,
    scope_id: Uuid,
) -> Result<EffectivePolicy, ResolveError> {
    let chain = tree
        .path_from_root(scope_id)
        .ok_or(ResolveError::ScopeNotFound { scope_id })?;

    let mut rules = RuleSet::new();
    let mut applied = Vec::new();

    for scope in chain {
        let Some(policy) = policies.for_scope(scope.id) else {
            continue; // pass-through level
        };
        let layer = policy.effective_layer();
        match policy.inheritance_mode {
            InheritanceMode::Replace => rules = layer,
            InheritanceMode::Merge => rules.merge_from(&layer),
            InheritanceMode::Append => rules.append_from(&layer),
        }
        applied.push(AppliedLayer {
            policy_id: policy.id,
            scope_id: scope.id,
            policy_name: policy.policy_name.clone(),
            mode: policy.inheritance_mode,
        });
    }

    debug!(
        %scope_id,
        layers = applied.len(),
        fields = rules.len(),
        "effective policy resolved"
    );

    Ok(EffectivePolicy {
        scope_id,
        rules,
        applied,
    })
}
