// resolve.rs — Effective policy resolution for a scope.

use std::path::Path;

use acr_policy::resolve_effective_policy;

use crate::tenant::{find_scope, TenantFile};

pub fn execute(tenant_path: &Path, scope: &str, json: bool) -> anyhow::Result<()> {
    let (tree, policies) = TenantFile::load(tenant_path)?.build()?;
    let scope_id = find_scope(&tree, scope)
        .ok_or_else(|| anyhow::anyhow!("no scope matching '{}' in tenant file", scope))?;

    let effective = resolve_effective_policy(&tree, &policies, scope_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    let record = tree.get(scope_id).expect("scope resolved above");
    println!("Effective policy at {} ({})", record.path, record.scope_type);
    println!();

    if effective.applied.is_empty() {
        println!("No policies apply to this scope.");
        return Ok(());
    }

    println!("Layers applied (root to leaf):");
    for layer in &effective.applied {
        let path = tree
            .get(layer.scope_id)
            .map(|s| s.path.as_str())
            .unwrap_or("?");
        println!("  {:<10} {:<30} {}", layer.mode.to_string(), layer.policy_name, path);
    }
    println!();

    println!("Merged rules:");
    for (field, value) in effective.rules.iter() {
        println!("  {} = {}", field, serde_json::to_string(value)?);
    }

    Ok(())
}
