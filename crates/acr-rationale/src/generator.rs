// generator.rs — Rationale construction and validation.
//
// The human string is assembled from a fixed verb table plus policy id,
// tool, data classification, and actor annotation, then hard-truncated to
// 140 characters. The structured record carries the full context for the
// audit trail — the human string is for feeds and notifications, the
// structured record is the durable explanation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;

/// Hard cap on the human summary string.
const HUMAN_SUMMARY_LIMIT: usize = 140;

/// The decision being explained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
    Escalate,
    Conditional,
    /// A decision word the verb table doesn't recognize. Kept verbatim so
    /// nothing is lost, explained with the neutral fallback verb.
    #[serde(untagged)]
    Other(String),
}

impl Decision {
    /// Parse a legacy decision word. Never fails — unrecognized words
    /// become [`Decision::Other`].
    pub fn parse(word: &str) -> Self {
        match word.to_ascii_lowercase().as_str() {
            "allow" | "approved" => Decision::Allow,
            "deny" | "rejected" => Decision::Deny,
            "escalate" => Decision::Escalate,
            "conditional" => Decision::Conditional,
            _ => Decision::Other(word.to_string()),
        }
    }

    /// The fixed verb phrase the human summary opens with.
    fn verb(&self) -> &'static str {
        match self {
            Decision::Allow => "Allowed under",
            Decision::Deny => "Denied per",
            Decision::Escalate => "Escalate",
            Decision::Conditional => "Conditional",
            Decision::Other(_) => "Processed under",
        }
    }
}

/// The AI tool a decision concerns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl Tool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// "ChatGPT-4" when versioned, "ChatGPT" otherwise.
    fn label(&self) -> String {
        match &self.version {
            Some(version) => format!("{}-{}", self.name, version),
            None => self.name.clone(),
        }
    }
}

/// Who (or what) made the decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Actor {
    /// A named human in a role (e.g., a compliance reviewer).
    Human { name: String, role: String },
    /// A fully automated check, no human involved.
    Automated,
    /// An automated check with a human in the loop.
    Hybrid {
        #[serde(default)]
        name: Option<String>,
    },
}

impl Actor {
    /// The annotation appended to the human summary:
    /// `role=Name` for humans, `auto-check` for automated,
    /// `hybrid[=Name]` for hybrid.
    fn annotation(&self) -> String {
        match self {
            Actor::Human { name, role } => format!("{}={}", role, name),
            Actor::Automated => "auto-check".to_string(),
            Actor::Hybrid { name: Some(name) } => format!("hybrid={}", name),
            Actor::Hybrid { name: None } => "hybrid".to_string(),
        }
    }
}

/// Everything the generator needs to explain one decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RationaleRequest {
    pub decision: Decision,
    pub policy_id: String,
    pub policy_version: String,
    pub rule_matched: String,
    pub tool: Tool,
    pub dataset_class: String,
    #[serde(default)]
    pub request_type: Option<String>,
    pub actor: Actor,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub secondary_rules: Option<Vec<String>>,
}

impl RationaleRequest {
    /// A request with the required context; version and rule default to
    /// the store's conventions ("1.0", "policy_evaluation").
    pub fn new(
        decision: Decision,
        policy_id: impl Into<String>,
        tool: Tool,
        dataset_class: impl Into<String>,
        actor: Actor,
    ) -> Self {
        Self {
            decision,
            policy_id: policy_id.into(),
            policy_version: "1.0".to_string(),
            rule_matched: "policy_evaluation".to_string(),
            tool,
            dataset_class: dataset_class.into(),
            request_type: None,
            actor,
            confidence_score: None,
            secondary_rules: None,
        }
    }

    /// Set the policy version and return self (builder pattern).
    pub fn with_policy_version(mut self, version: impl Into<String>) -> Self {
        self.policy_version = version.into();
        self
    }

    /// Set the matched rule and return self.
    pub fn with_rule_matched(mut self, rule: impl Into<String>) -> Self {
        self.rule_matched = rule.into();
        self
    }

    /// Set the request type and return self.
    pub fn with_request_type(mut self, request_type: impl Into<String>) -> Self {
        self.request_type = Some(request_type.into());
        self
    }

    /// Set the confidence score and return self.
    pub fn with_confidence(mut self, score: f64) -> Self {
        self.confidence_score = Some(score);
        self
    }

    /// Set the secondary rules and return self.
    pub fn with_secondary_rules(mut self, rules: Vec<String>) -> Self {
        self.secondary_rules = Some(rules);
        self
    }
}

/// The `inputs` sub-object of the structured record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RationaleInputs {
    pub tool: String,
    #[serde(default)]
    pub tool_version: Option<String>,
    pub dataset_class: String,
    #[serde(default)]
    pub request_type: Option<String>,
}

/// The structured half of a rationale — the durable audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRationale {
    pub policy_id: String,
    pub policy_version: String,
    pub rule_matched: String,
    pub inputs: RationaleInputs,
    pub actor: Actor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_rules: Option<Vec<String>>,
    /// Captured at generation time, ISO-8601 in serialized form.
    pub timestamp: DateTime<Utc>,
}

/// A paired human + structured explanation. Immutable once generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rationale {
    pub human: String,
    pub structured: StructuredRationale,
}

/// Generate a rationale for a decision.
///
/// Always produces output; use [`validate_rationale`] afterwards to check
/// the audit contract.
pub fn generate_rationale(request: &RationaleRequest) -> Rationale {
    let human = truncate(format!(
        "{} {}: tool={}, data={}, {}",
        request.decision.verb(),
        request.policy_id,
        request.tool.label(),
        data_class_label(&request.dataset_class),
        request.actor.annotation(),
    ));

    debug!(policy_id = %request.policy_id, human = %human, "rationale generated");

    Rationale {
        human,
        structured: StructuredRationale {
            policy_id: request.policy_id.clone(),
            policy_version: request.policy_version.clone(),
            rule_matched: request.rule_matched.clone(),
            inputs: RationaleInputs {
                tool: request.tool.name.clone(),
                tool_version: request.tool.version.clone(),
                dataset_class: request.dataset_class.clone(),
                request_type: request.request_type.clone(),
            },
            actor: request.actor.clone(),
            confidence_score: request.confidence_score,
            secondary_rules: request.secondary_rules.clone(),
            timestamp: Utc::now(),
        },
    }
}

/// Check a rationale against the audit contract.
///
/// Post-condition check, not a gate — callers decide what a failure means.
pub fn validate_rationale(rationale: &Rationale) -> Result<(), ValidationError> {
    if rationale.human.is_empty() {
        return Err(ValidationError::MissingHumanSummary);
    }
    let length = rationale.human.chars().count();
    if length > HUMAN_SUMMARY_LIMIT {
        return Err(ValidationError::HumanSummaryTooLong { length });
    }
    let structured = &rationale.structured;
    if structured.policy_id.is_empty() {
        return Err(ValidationError::MissingField {
            field: "structured.policy_id",
        });
    }
    if structured.rule_matched.is_empty() {
        return Err(ValidationError::MissingField {
            field: "structured.rule_matched",
        });
    }
    if structured.inputs.tool.is_empty() {
        return Err(ValidationError::MissingField {
            field: "structured.inputs.tool",
        });
    }
    if structured.inputs.dataset_class.is_empty() {
        return Err(ValidationError::MissingField {
            field: "structured.inputs.dataset_class",
        });
    }
    Ok(())
}

/// Format a data classification for the human summary.
///
/// Known acronym classes come out uppercased ("pii" → "PII"), anything
/// else gets its first letter capitalized ("internal" → "Internal").
fn data_class_label(dataset_class: &str) -> String {
    match dataset_class.to_ascii_lowercase().as_str() {
        "pii" => "PII".to_string(),
        "phi" => "PHI".to_string(),
        "pci" => "PCI".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

/// Hard-truncate to the 140-character cap, ending in "..." when cut.
fn truncate(text: String) -> String {
    if text.chars().count() <= HUMAN_SUMMARY_LIMIT {
        return text;
    }
    let mut cut: String = text.chars().take(HUMAN_SUMMARY_LIMIT - 3).collect();
    cut.push_str("...");
    cut
}
