// conflict.rs — Governance-field conflict detection and resolution.
//
// The detector compares a child policy against its parent on a fixed,
// explicit set of governance-critical fields. It is deliberately not a
// generic deep diff: cosmetic fields differing between levels is normal
// inheritance, not a conflict, and flagging them would bury the real
// disagreements.
//
// Detected conflicts are append-only audit records. Resolution transitions
// the status exactly once and never touches the conflicting values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ConflictError;
use crate::policy::ScopedPolicy;
use crate::rules::{RuleSet, RuleValue};

/// How serious a detected disagreement is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// What kind of disagreement was found.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// A scalar governance field differs between child and parent.
    ScalarMismatch,
    /// A list field's symmetric difference is non-empty.
    ListDivergence,
}

/// Where a conflict stands in its (one-shot) resolution lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Unresolved,
    AcceptedChild,
    RevertedToParent,
    Acknowledged,
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionStatus::Unresolved => write!(f, "unresolved"),
            ResolutionStatus::AcceptedChild => write!(f, "accepted_child"),
            ResolutionStatus::RevertedToParent => write!(f, "reverted_to_parent"),
            ResolutionStatus::Acknowledged => write!(f, "acknowledged"),
        }
    }
}

/// The explicit resolution action a reviewer takes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Keep the child's value; the deviation is intentional.
    AcceptChild,
    /// The child must fall back to the parent's value.
    RevertToParent,
    /// Noted, no action — the conflict stands as documented.
    Acknowledge,
}

impl Resolution {
    fn status(self) -> ResolutionStatus {
        match self {
            Resolution::AcceptChild => ResolutionStatus::AcceptedChild,
            Resolution::RevertToParent => ResolutionStatus::RevertedToParent,
            Resolution::Acknowledge => ResolutionStatus::Acknowledged,
        }
    }
}

/// The asymmetric sets of a blocked-action list divergence.
///
/// The parent (client/enterprise) side and the child (agency) side each
/// block actions the other does not.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockedActionDivergence {
    /// Actions blocked only by the parent policy.
    pub client_only_blocked: Vec<String>,
    /// Actions blocked only by the child policy.
    pub agency_only_blocked: Vec<String>,
}

/// A detected disagreement between a child policy and its parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConflict {
    /// Unique identifier for this conflict record.
    pub id: Uuid,
    /// The deviating child policy.
    pub child_policy_id: Uuid,
    /// The parent policy it deviates from.
    pub parent_policy_id: Uuid,
    /// What kind of disagreement this is.
    pub kind: ConflictKind,
    /// How serious the disagreement is.
    pub severity: Severity,
    /// The dotted path of the field that disagrees.
    pub field_path: String,
    /// The parent's value at the field, if present.
    pub parent_value: Option<RuleValue>,
    /// The child's value at the field, if present.
    pub child_value: Option<RuleValue>,
    /// The asymmetric sets, for list divergences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divergence: Option<BlockedActionDivergence>,
    /// Where this conflict stands in its resolution lifecycle.
    pub resolution_status: ResolutionStatus,
    /// Who resolved it, once resolved.
    #[serde(default)]
    pub resolved_by: Option<String>,
    /// Free-form notes recorded at resolution time.
    #[serde(default)]
    pub resolution_notes: Option<String>,
    /// When the conflict was detected.
    pub created_at: DateTime<Utc>,
}

impl PolicyConflict {
    /// Resolve this conflict. The status transition is one-shot: resolving
    /// an already-resolved conflict is an error, and the original
    /// parent/child values are never altered.
    pub fn resolve(
        &mut self,
        resolution: Resolution,
        resolved_by: impl Into<String>,
        notes: Option<String>,
    ) -> Result<(), ConflictError> {
        if self.resolution_status != ResolutionStatus::Unresolved {
            return Err(ConflictError::AlreadyResolved {
                conflict_id: self.id,
                status: self.resolution_status,
            });
        }
        self.resolution_status = resolution.status();
        self.resolved_by = Some(resolved_by.into());
        self.resolution_notes = notes;
        Ok(())
    }
}

/// How a checked field is compared.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Values must be equal; any difference is a conflict.
    Scalar,
    /// String lists; a non-empty symmetric difference is a conflict.
    List,
}

/// One field the detector compares, with the severity a mismatch carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCheck {
    /// Dotted path into the rule set (e.g., "controls.hitl.required").
    pub field_path: String,
    /// How the field is compared.
    pub kind: CheckKind,
    /// Severity assigned to a mismatch on this field.
    pub severity: Severity,
}

impl FieldCheck {
    pub fn scalar(field_path: impl Into<String>, severity: Severity) -> Self {
        Self {
            field_path: field_path.into(),
            kind: CheckKind::Scalar,
            severity,
        }
    }

    pub fn list(field_path: impl Into<String>, severity: Severity) -> Self {
        Self {
            field_path: field_path.into(),
            kind: CheckKind::List,
            severity,
        }
    }
}

/// Compares child policies against their parents on an ordered set of
/// field checks.
///
/// The default check set is the four governance-critical fields; callers
/// with different field schemas can supply their own via
/// [`ConflictDetector::with_checks`].
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    checks: Vec<FieldCheck>,
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self {
            checks: vec![
                FieldCheck::scalar("controls.hitl.required", Severity::High),
                FieldCheck::scalar("data_controls.isolation.boundary", Severity::High),
                FieldCheck::scalar(
                    "data_controls.third_parties.data_sharing_allowed",
                    Severity::Medium,
                ),
                FieldCheck::list("guardrails.blocked_actions", Severity::Medium),
            ],
        }
    }
}

impl ConflictDetector {
    /// A detector with the default governance field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A detector with a custom ordered check set.
    pub fn with_checks(checks: Vec<FieldCheck>) -> Self {
        Self { checks }
    }

    /// The checks this detector runs, in order.
    pub fn checks(&self) -> &[FieldCheck] {
        &self.checks
    }

    /// Compare a child policy against its parent.
    ///
    /// Returns conflicts in check order. A field is only compared when
    /// both sides define it — an absent field is not a disagreement.
    /// No side effects: persisting the returned conflicts is the caller's
    /// job.
    pub fn detect(&self, child: &ScopedPolicy, parent: &ScopedPolicy) -> Vec<PolicyConflict> {
        let child_rules = child.effective_layer();
        let parent_rules = parent.effective_layer();
        let mut conflicts = Vec::new();

        for check in &self.checks {
            let Some(conflict) = self.check_field(check, child, parent, &child_rules, &parent_rules)
            else {
                continue;
            };
            conflicts.push(conflict);
        }

        debug!(
            child = %child.id,
            parent = %parent.id,
            conflicts = conflicts.len(),
            "conflict detection run"
        );
        conflicts
    }

    fn check_field(
        &self,
        check: &FieldCheck,
        child: &ScopedPolicy,
        parent: &ScopedPolicy,
        child_rules: &RuleSet,
        parent_rules: &RuleSet,
    ) -> Option<PolicyConflict> {
        let child_value = child_rules.get_path(&check.field_path)?;
        let parent_value = parent_rules.get_path(&check.field_path)?;

        match check.kind {
            CheckKind::Scalar => {
                if child_value == parent_value {
                    return None;
                }
                Some(self.conflict(
                    check,
                    ConflictKind::ScalarMismatch,
                    child,
                    parent,
                    parent_value,
                    child_value,
                    None,
                ))
            }
            CheckKind::List => {
                let child_items = string_items(child_value);
                let parent_items = string_items(parent_value);
                let agency_only: Vec<String> = child_items
                    .iter()
                    .filter(|i| !parent_items.contains(i))
                    .cloned()
                    .collect();
                let client_only: Vec<String> = parent_items
                    .iter()
                    .filter(|i| !child_items.contains(i))
                    .cloned()
                    .collect();
                if agency_only.is_empty() && client_only.is_empty() {
                    return None;
                }
                Some(self.conflict(
                    check,
                    ConflictKind::ListDivergence,
                    child,
                    parent,
                    parent_value,
                    child_value,
                    Some(BlockedActionDivergence {
                        client_only_blocked: client_only,
                        agency_only_blocked: agency_only,
                    }),
                ))
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn conflict(
        &self,
        check: &FieldCheck,
        kind: ConflictKind,
        child: &ScopedPolicy,
        parent: &ScopedPolicy,
        parent_value: &RuleValue,
        child_value: &RuleValue,
        divergence: Option<BlockedActionDivergence>,
    ) -> PolicyConflict {
        PolicyConflict {
            id: Uuid::new_v4(),
            child_policy_id: child.id,
            parent_policy_id: parent.id,
            kind,
            severity: check.severity,
            field_path: check.field_path.clone(),
            parent_value: Some(parent_value.clone()),
            child_value: Some(child_value.clone()),
            divergence,
            resolution_status: ResolutionStatus::Unresolved,
            resolved_by: None,
            resolution_notes: None,
            created_at: Utc::now(),
        }
    }
}

/// Collect a list value's string items (non-strings are ignored).
fn string_items(value: &RuleValue) -> Vec<String> {
    value
        .as_list()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::InheritanceMode;

    /// Helper: a policy whose rules come from a JSON object.
    fn policy_with(rules: serde_json::Value) -> ScopedPolicy {
        ScopedPolicy::new(
            Uuid::new_v4(),
            "test",
            InheritanceMode::Merge,
            serde_json::from_value(rules).unwrap(),
            Uuid::new_v4(),
            "admin",
        )
    }

    /// Helper: a full governance rule set with the given knobs.
    fn governance(hitl: bool, sharing: bool, blocked: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "controls": { "hitl": { "required": hitl } },
            "data_controls": {
                "isolation": { "boundary": "tenant" },
                "third_parties": { "data_sharing_allowed": sharing }
            },
            "guardrails": { "blocked_actions": blocked }
        })
    }

    #[test]
    fn hitl_mismatch_is_one_high_conflict() {
        let child = policy_with(governance(false, false, &["export"]));
        let parent = policy_with(governance(true, false, &["export"]));

        let conflicts = ConflictDetector::new().detect(&child, &parent);
        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.severity, Severity::High);
        assert_eq!(conflict.field_path, "controls.hitl.required");
        assert_eq!(conflict.kind, ConflictKind::ScalarMismatch);
        assert_eq!(conflict.parent_value, Some(RuleValue::Bool(true)));
        assert_eq!(conflict.child_value, Some(RuleValue::Bool(false)));
        assert_eq!(conflict.resolution_status, ResolutionStatus::Unresolved);
    }

    #[test]
    fn identical_policies_yield_no_conflicts() {
        let child = policy_with(governance(true, false, &["export", "share"]));
        let parent = policy_with(governance(true, false, &["export", "share"]));
        assert!(ConflictDetector::new().detect(&child, &parent).is_empty());
    }

    #[test]
    fn sharing_flag_mismatch_is_medium() {
        let child = policy_with(governance(true, true, &[]));
        let parent = policy_with(governance(true, false, &[]));

        let conflicts = ConflictDetector::new().detect(&child, &parent);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, Severity::Medium);
        assert_eq!(
            conflicts[0].field_path,
            "data_controls.third_parties.data_sharing_allowed"
        );
    }

    #[test]
    fn blocked_action_divergence_reports_asymmetric_sets() {
        let child = policy_with(governance(true, false, &["export", "delete"]));
        let parent = policy_with(governance(true, false, &["export", "share"]));

        let conflicts = ConflictDetector::new().detect(&child, &parent);
        assert_eq!(conflicts.len(), 1);
        let conflict = &conflicts[0];
        assert_eq!(conflict.kind, ConflictKind::ListDivergence);
        assert_eq!(conflict.severity, Severity::Medium);
        let divergence = conflict.divergence.as_ref().unwrap();
        assert_eq!(divergence.client_only_blocked, vec!["share"]);
        assert_eq!(divergence.agency_only_blocked, vec!["delete"]);
    }

    #[test]
    fn absent_fields_are_not_compared() {
        // Child defines nothing; parent has a full governance block.
        let child = policy_with(serde_json::json!({ "min_approvals": 4 }));
        let parent = policy_with(governance(true, false, &["export"]));
        assert!(ConflictDetector::new().detect(&child, &parent).is_empty());
    }

    #[test]
    fn conflicts_come_back_in_check_order() {
        let child = policy_with(governance(false, true, &["delete"]));
        let parent = policy_with(governance(true, false, &["share"]));

        let conflicts = ConflictDetector::new().detect(&child, &parent);
        let fields: Vec<&str> = conflicts.iter().map(|c| c.field_path.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "controls.hitl.required",
                "data_controls.third_parties.data_sharing_allowed",
                "guardrails.blocked_actions",
            ]
        );
    }

    #[test]
    fn custom_check_set_replaces_defaults() {
        let detector = ConflictDetector::with_checks(vec![FieldCheck::scalar(
            "min_approvals",
            Severity::Low,
        )]);
        let child = policy_with(serde_json::json!({ "min_approvals": 4 }));
        let parent = policy_with(serde_json::json!({ "min_approvals": 3 }));

        let conflicts = detector.detect(&child, &parent);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].severity, Severity::Low);
        assert_eq!(conflicts[0].field_path, "min_approvals");
    }

    #[test]
    fn resolution_is_one_shot() {
        let child = policy_with(governance(false, false, &[]));
        let parent = policy_with(governance(true, false, &[]));
        let mut conflict = ConflictDetector::new()
            .detect(&child, &parent)
            .into_iter()
            .next()
            .unwrap();

        conflict
            .resolve(
                Resolution::RevertToParent,
                "compliance@acme.test",
                Some("Global HITL requirement stands".to_string()),
            )
            .unwrap();
        assert_eq!(conflict.resolution_status, ResolutionStatus::RevertedToParent);
        assert_eq!(conflict.resolved_by.as_deref(), Some("compliance@acme.test"));
        // The conflicting values are untouched.
        assert_eq!(conflict.parent_value, Some(RuleValue::Bool(true)));
        assert_eq!(conflict.child_value, Some(RuleValue::Bool(false)));

        // Second resolution attempt fails.
        match conflict.resolve(Resolution::Acknowledge, "other@acme.test", None) {
            Err(ConflictError::AlreadyResolved { status, .. }) => {
                assert_eq!(status, ResolutionStatus::RevertedToParent);
            }
            other => panic!("expected AlreadyResolved, got {:?}", other),
        }
    }
}
