// governance_flow.rs — End-to-end flow over the governance crates:
// load a tenant fixture, resolve an effective policy, detect and resolve
// a conflict, explain the decision, and record it on the trail.

use serde::Deserialize;
use tempfile::tempdir;
use uuid::Uuid;

use acr_policy::{
    resolve_effective_policy, ConflictDetector, PolicyIndex, Resolution, ResolutionStatus,
    RuleValue, ScopedPolicy,
};
use acr_rationale::DecisionOutcome;
use acr_scope::{ScopeRecord, ScopeTree};
use acr_trail::{DecisionTrail, TrailEvent, TrailKind};

#[derive(Deserialize)]
struct TenantFixture {
    scopes: Vec<ScopeRecord>,
    policies: Vec<ScopedPolicy>,
}

const TENANT_YAML: &str = r#"
scopes:
  - id: 00000000-0000-0000-0000-000000000001
    name: Acme
    scope_type: enterprise
    path: acme
    parent_id: null
    enterprise_id: 00000000-0000-0000-0000-0000000000aa
  - id: 00000000-0000-0000-0000-000000000002
    name: North America
    scope_type: region
    path: acme.na
    parent_id: 00000000-0000-0000-0000-000000000001
    enterprise_id: 00000000-0000-0000-0000-0000000000aa
  - id: 00000000-0000-0000-0000-000000000003
    name: United States
    scope_type: country
    path: acme.na.us
    parent_id: 00000000-0000-0000-0000-000000000002
    enterprise_id: 00000000-0000-0000-0000-0000000000aa
policies:
  - id: 00000000-0000-0000-0000-000000000010
    scope_id: 00000000-0000-0000-0000-000000000001
    policy_name: Global Baseline
    inheritance_mode: replace
    rules:
      min_approvals: 3
      controls:
        hitl:
          required: true
    enterprise_id: 00000000-0000-0000-0000-0000000000aa
    created_by: admin@acme.test
  - id: 00000000-0000-0000-0000-000000000011
    scope_id: 00000000-0000-0000-0000-000000000003
    policy_name: US HIPAA Policy
    inheritance_mode: merge
    rules:
      min_approvals: 5
      controls:
        hitl:
          required: false
    enterprise_id: 00000000-0000-0000-0000-0000000000aa
    created_by: admin@acme.test
"#;

fn load_fixture() -> (ScopeTree, PolicyIndex) {
    let fixture: TenantFixture = serde_yaml::from_str(TENANT_YAML).unwrap();
    let tree = ScopeTree::build(fixture.scopes).unwrap();
    let index = PolicyIndex::from_policies(fixture.policies);
    (tree, index)
}

#[test]
fn resolve_detect_explain_record() {
    let (tree, policies) = load_fixture();
    let us = Uuid::parse_str("00000000-0000-0000-0000-000000000003").unwrap();

    // Resolve: the US merge layer wins min_approvals.
    let effective = resolve_effective_policy(&tree, &policies, us).unwrap();
    assert_eq!(effective.rules.get("min_approvals"), Some(&RuleValue::Int(5)));
    assert_eq!(effective.applied.len(), 2);

    // Detect: the US policy relaxes the enterprise HITL requirement.
    let child = policies.for_scope(us).unwrap();
    let root_scope = tree.root().id;
    let parent = policies.for_scope(root_scope).unwrap();
    let mut conflicts = ConflictDetector::new().detect(child, parent);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].field_path, "controls.hitl.required");

    // Resolve the conflict: enterprise requirement stands.
    conflicts[0]
        .resolve(Resolution::RevertToParent, "compliance@acme.test", None)
        .unwrap();
    assert_eq!(
        conflicts[0].resolution_status,
        ResolutionStatus::RevertedToParent
    );

    // Explain: a denial under the effective policy.
    let outcome: DecisionOutcome = serde_json::from_value(serde_json::json!({
        "source": "policy_evaluation",
        "decision": "deny",
        "policy_id": "us-hipaa",
        "tool_name": "ChatGPT",
        "tool_version": "4",
        "data_classification": "phi"
    }))
    .unwrap();
    let rationale = outcome.into_rationale().unwrap();
    assert!(rationale.human.starts_with("Denied per us-hipaa"));

    // Record everything on the trail and verify the chain.
    let dir = tempdir().unwrap();
    let trail_path = dir.path().join("trail.jsonl");
    {
        let mut trail = DecisionTrail::open(&trail_path).unwrap();
        let mut detected = TrailEvent::new(us.to_string(), TrailKind::ConflictDetected)
            .with_payload(&conflicts[0])
            .unwrap();
        let mut resolved = TrailEvent::new(us.to_string(), TrailKind::ConflictResolved)
            .with_actor("compliance@acme.test");
        let mut decided = TrailEvent::new(us.to_string(), TrailKind::DecisionRecorded)
            .with_policy("us-hipaa")
            .with_payload(&rationale)
            .unwrap();
        trail.append(&mut detected).unwrap();
        trail.append(&mut resolved).unwrap();
        trail.append(&mut decided).unwrap();
    }

    assert!(DecisionTrail::verify_chain(&trail_path).unwrap());
    let events = DecisionTrail::read_all(&trail_path).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2].kind, TrailKind::DecisionRecorded);
}
