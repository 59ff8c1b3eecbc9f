// adapter.rs — Normalizing legacy decision-result shapes.
//
// Two older result shapes feed the rationale contract: the tier-based
// policy evaluation result and the broader multi-agent process result.
// Rather than sniffing fields at the call site, each shape is a variant of
// one sum type with an explicit normalization step, and both paths run
// through the same generator and validator.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::generator::{
    generate_rationale, validate_rationale, Actor, Decision, Rationale, RationaleRequest, Tool,
};

/// The tier-based policy evaluation result (legacy `evaluatePolicy` shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyEvaluationResult {
    /// The decision word ("allow", "deny", "conditional", ...).
    pub decision: String,
    pub policy_id: String,
    #[serde(default)]
    pub policy_version: Option<String>,
    /// The rule that fired, when the evaluator reported one.
    #[serde(default)]
    pub rule_matched: Option<String>,
    pub tool_name: String,
    #[serde(default)]
    pub tool_version: Option<String>,
    pub data_classification: String,
    /// The risk tier the evaluation ran under, when present.
    #[serde(default)]
    pub risk_tier: Option<String>,
}

/// A named reviewer attached to a process result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reviewer {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// The multi-agent process result (legacy orchestrator `process` shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProcessResult {
    /// The pipeline's final decision word ("approved", "rejected",
    /// "escalate", ...).
    pub final_decision: String,
    pub policy_id: String,
    #[serde(default)]
    pub policy_version: Option<String>,
    /// The primary rule the pipeline settled on.
    #[serde(default)]
    pub primary_rule: Option<String>,
    #[serde(default)]
    pub secondary_rules: Vec<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    pub tool: String,
    #[serde(default)]
    pub tool_version: Option<String>,
    #[serde(default)]
    pub dataset_class: Option<String>,
    #[serde(default)]
    pub request_type: Option<String>,
    /// A human reviewer in the loop, if any — turns the actor hybrid.
    #[serde(default)]
    pub reviewer: Option<Reviewer>,
}

/// Either legacy decision-result shape, tagged by source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DecisionOutcome {
    PolicyEvaluation(PolicyEvaluationResult),
    AgentProcess(AgentProcessResult),
}

impl DecisionOutcome {
    /// Normalize this outcome into a rationale request.
    pub fn to_request(&self) -> RationaleRequest {
        match self {
            DecisionOutcome::PolicyEvaluation(result) => {
                let mut tool = Tool::new(result.tool_name.clone());
                if let Some(version) = &result.tool_version {
                    tool = tool.with_version(version.clone());
                }
                // No rule reported → fall back to the tier the evaluation
                // ran under, so the audit record still says what gated it.
                let rule = result.rule_matched.clone().unwrap_or_else(|| {
                    match &result.risk_tier {
                        Some(tier) => format!("risk_tier_{}", tier),
                        None => "policy_evaluation".to_string(),
                    }
                });
                let mut request = RationaleRequest::new(
                    Decision::parse(&result.decision),
                    result.policy_id.clone(),
                    tool,
                    result.data_classification.clone(),
                    Actor::Automated,
                )
                .with_rule_matched(rule)
                .with_request_type("policy_evaluation");
                if let Some(version) = &result.policy_version {
                    request = request.with_policy_version(version.clone());
                }
                request
            }
            DecisionOutcome::AgentProcess(result) => {
                let mut tool = Tool::new(result.tool.clone());
                if let Some(version) = &result.tool_version {
                    tool = tool.with_version(version.clone());
                }
                let actor = match &result.reviewer {
                    Some(reviewer) => Actor::Hybrid {
                        name: Some(reviewer.name.clone()),
                    },
                    None => Actor::Automated,
                };
                let mut request = RationaleRequest::new(
                    Decision::parse(&result.final_decision),
                    result.policy_id.clone(),
                    tool,
                    result
                        .dataset_class
                        .clone()
                        .unwrap_or_else(|| "unclassified".to_string()),
                    actor,
                );
                if let Some(rule) = &result.primary_rule {
                    request = request.with_rule_matched(rule.clone());
                }
                if let Some(version) = &result.policy_version {
                    request = request.with_policy_version(version.clone());
                }
                if let Some(request_type) = &result.request_type {
                    request = request.with_request_type(request_type.clone());
                }
                if let Some(score) = result.confidence_score {
                    request = request.with_confidence(score);
                }
                if !result.secondary_rules.is_empty() {
                    request = request.with_secondary_rules(result.secondary_rules.clone());
                }
                request
            }
        }
    }

    /// Normalize, generate, and validate in one step.
    pub fn into_rationale(self) -> Result<Rationale, ValidationError> {
        let rationale = generate_rationale(&self.to_request());
        validate_rationale(&rationale)?;
        Ok(rationale)
    }
}
