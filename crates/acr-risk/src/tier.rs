// tier.rs — The five risk tiers and their derived controls.
//
// Checklists escalate: each tier includes everything below it plus its own
// additions, so a reviewer can always answer "what does moving up a tier
// cost us" by diffing adjacent checklists.

use serde::{Deserialize, Serialize};

/// One of the five risk tiers a tool can land in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

/// Controls applied at every tier.
const BASE_CONTROLS: &[&str] = &["usage_tracking", "basic_logging"];

/// Additions per tier, lowest to highest.
const LOW_ADDITIONS: &[&str] = &["basic_monitoring", "quarterly_review"];
const MEDIUM_ADDITIONS: &[&str] = &["content_review", "periodic_spot_checks", "user_feedback_loops"];
const HIGH_ADDITIONS: &[&str] = &[
    "enhanced_monitoring",
    "periodic_audits",
    "bias_detection",
    "escalation_protocols",
];
const CRITICAL_ADDITIONS: &[&str] = &[
    "full_model_audit",
    "continuous_monitoring",
    "human_in_the_loop",
    "regular_bias_testing",
];

impl RiskTier {
    /// The audit checklist for this tier: the base controls plus every
    /// lower tier's additions plus this tier's own.
    pub fn audit_checklist(self) -> Vec<&'static str> {
        let mut items: Vec<&'static str> = BASE_CONTROLS.to_vec();
        let tiers: &[(&[&str], RiskTier)] = &[
            (LOW_ADDITIONS, RiskTier::Low),
            (MEDIUM_ADDITIONS, RiskTier::Medium),
            (HIGH_ADDITIONS, RiskTier::High),
            (CRITICAL_ADDITIONS, RiskTier::Critical),
        ];
        for (additions, tier) in tiers {
            if self >= *tier {
                items.extend_from_slice(additions);
            }
        }
        items
    }

    /// Multiplier applied when this tier feeds policy weighting
    /// (e.g., scaling approval thresholds by tool risk).
    pub fn risk_multiplier(self) -> f64 {
        match self {
            RiskTier::Minimal => 0.5,
            RiskTier::Low => 0.75,
            RiskTier::Medium => 1.0,
            RiskTier::High => 1.5,
            RiskTier::Critical => 2.0,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Minimal => write!(f, "minimal"),
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
            RiskTier::Critical => write!(f, "critical"),
        }
    }
}
