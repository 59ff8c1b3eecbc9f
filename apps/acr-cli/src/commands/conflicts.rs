// conflicts.rs — Tenant-wide conflict detection.
//
// Each scope's policy is compared against its inheritance parent: the
// explicitly declared parent policy when set, otherwise the nearest
// ancestor scope that carries a policy. The root policy has no parent
// and is never a child side.

use std::path::Path;

use uuid::Uuid;

use acr_policy::{ConflictDetector, PolicyConflict, PolicyIndex, ScopedPolicy};
use acr_scope::ScopeTree;

use crate::tenant::{all_scopes, find_scope, TenantFile};

pub fn execute(tenant_path: &Path, scope: Option<&str>, json: bool) -> anyhow::Result<()> {
    let (tree, policies) = TenantFile::load(tenant_path)?.build()?;

    let scope_filter = match scope {
        Some(selector) => Some(
            find_scope(&tree, selector)
                .ok_or_else(|| anyhow::anyhow!("no scope matching '{}' in tenant file", selector))?,
        ),
        None => None,
    };

    let detector = ConflictDetector::new();
    let mut conflicts: Vec<(Uuid, PolicyConflict)> = Vec::new();

    for record in all_scopes(&tree) {
        if let Some(filter) = scope_filter {
            if record.id != filter {
                continue;
            }
        }
        let Some(child) = policies.for_scope(record.id) else {
            continue;
        };
        let Some(parent) = parent_policy(&tree, &policies, child)? else {
            continue;
        };
        for conflict in detector.detect(child, parent) {
            conflicts.push((record.id, conflict));
        }
    }

    if json {
        let records: Vec<&PolicyConflict> = conflicts.iter().map(|(_, c)| c).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if conflicts.is_empty() {
        println!("No conflicts detected.");
        return Ok(());
    }

    println!("{:<8} {:<18} {:<42} SCOPE", "SEVERITY", "KIND", "FIELD");
    println!("{}", "-".repeat(92));
    for (scope_id, conflict) in &conflicts {
        let path = tree
            .get(*scope_id)
            .map(|s| s.path.as_str())
            .unwrap_or("?");
        println!(
            "{:<8} {:<18} {:<42} {}",
            conflict.severity.to_string(),
            format!("{:?}", conflict.kind),
            conflict.field_path,
            path,
        );
        if let Some(divergence) = &conflict.divergence {
            if !divergence.client_only_blocked.is_empty() {
                println!("         client-only blocked: {}", divergence.client_only_blocked.join(", "));
            }
            if !divergence.agency_only_blocked.is_empty() {
                println!("         agency-only blocked: {}", divergence.agency_only_blocked.join(", "));
            }
        }
    }
    println!();
    println!("{} conflict(s) detected.", conflicts.len());

    Ok(())
}

/// The policy a child policy inherits from, if any.
///
/// An explicit parent reference must point at a policy on an ancestor
/// scope; anything else is a malformed tenant file.
fn parent_policy<'a>(
    tree: &ScopeTree,
    policies: &'a PolicyIndex,
    child: &ScopedPolicy,
) -> anyhow::Result<Option<&'a ScopedPolicy>> {
    let Some(chain) = tree.path_from_root(child.scope_id) else {
        return Ok(None);
    };
    if let Some(parent_id) = child.parent_policy_id {
        let parent = policies.get(parent_id).ok_or_else(|| {
            anyhow::anyhow!(
                "policy '{}' references missing parent policy '{}'",
                child.id,
                parent_id
            )
        })?;
        let is_ancestor = chain
            .iter()
            .rev()
            .skip(1)
            .any(|scope| scope.id == parent.scope_id);
        if !is_ancestor {
            anyhow::bail!(
                "policy '{}' declares parent policy '{}' on a non-ancestor scope",
                child.id,
                parent_id
            );
        }
        return Ok(Some(parent));
    }
    // Nearest ancestor scope carrying a policy, walking leaf to root.
    Ok(chain
        .iter()
        .rev()
        .skip(1)
        .find_map(|scope| policies.for_scope(scope.id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use acr_policy::{InheritanceMode, RuleSet};
    use acr_scope::{ScopeRecord, ScopeType};

    /// Helper: root with two regions, returning the tree and the three ids.
    fn two_region_tree() -> (ScopeTree, [Uuid; 3]) {
        let tenant = Uuid::new_v4();
        let root = ScopeRecord::new(
            Uuid::new_v4(),
            "Acme",
            ScopeType::Enterprise,
            "acme",
            None,
            tenant,
        );
        let na = ScopeRecord::new(
            Uuid::new_v4(),
            "NA",
            ScopeType::Region,
            "acme.na",
            Some(root.id),
            tenant,
        );
        let eu = ScopeRecord::new(
            Uuid::new_v4(),
            "EU",
            ScopeType::Region,
            "acme.eu",
            Some(root.id),
            tenant,
        );
        let ids = [root.id, na.id, eu.id];
        (ScopeTree::build(vec![root, na, eu]).unwrap(), ids)
    }

    fn policy(scope: Uuid) -> ScopedPolicy {
        ScopedPolicy::new(
            scope,
            "test",
            InheritanceMode::Merge,
            RuleSet::new(),
            Uuid::new_v4(),
            "admin",
        )
    }

    #[test]
    fn explicit_parent_on_ancestor_scope_is_accepted() {
        let (tree, [root, na, _]) = two_region_tree();
        let root_policy = policy(root);
        let child = policy(na).with_parent(root_policy.id);
        let root_policy_id = root_policy.id;
        let index = PolicyIndex::from_policies(vec![root_policy, child.clone()]);

        let parent = parent_policy(&tree, &index, &child).unwrap().unwrap();
        assert_eq!(parent.id, root_policy_id);
    }

    #[test]
    fn explicit_parent_on_sibling_scope_is_rejected() {
        let (tree, [_, na, eu]) = two_region_tree();
        let sibling_policy = policy(eu);
        let child = policy(na).with_parent(sibling_policy.id);
        let index = PolicyIndex::from_policies(vec![sibling_policy, child.clone()]);

        let err = parent_policy(&tree, &index, &child).unwrap_err();
        assert!(err.to_string().contains("non-ancestor scope"));
    }

    #[test]
    fn implicit_parent_is_nearest_ancestor_policy() {
        let (tree, [root, na, _]) = two_region_tree();
        let root_policy = policy(root);
        let child = policy(na);
        let root_policy_id = root_policy.id;
        let index = PolicyIndex::from_policies(vec![root_policy, child.clone()]);

        let parent = parent_policy(&tree, &index, &child).unwrap().unwrap();
        assert_eq!(parent.id, root_policy_id);

        // The root policy itself has no parent.
        let root_side = index.for_scope(root).unwrap();
        assert!(parent_policy(&tree, &index, root_side).unwrap().is_none());
    }
}
