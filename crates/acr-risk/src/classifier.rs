// classifier.rs — Weighted composite scoring and tier assignment.
//
// Composite = fixed-weight linear combination of the six dimension scores.
// Weights sum to 1.0, so the composite stays on the same 0–100 scale as
// the inputs. Tier boundaries are half-open, lower-inclusive: a composite
// of exactly 40.0 is medium, not low.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RiskError;
use crate::tier::RiskTier;

/// Dimension weights. Must sum to 1.0.
const WEIGHT_DATA_SENSITIVITY: f64 = 0.25;
const WEIGHT_EXTERNAL_EXPOSURE: f64 = 0.20;
const WEIGHT_MODEL_TRANSPARENCY: f64 = 0.15;
const WEIGHT_MISUSE_VECTORS: f64 = 0.15;
const WEIGHT_LEGAL_IP_RISK: f64 = 0.15;
const WEIGHT_OPERATIONAL_CRITICALITY: f64 = 0.10;

/// The six named dimension scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DimensionScores {
    /// Data sensitivity & privacy exposure.
    pub data_sensitivity: f64,
    /// External exposure & decision impact.
    pub external_exposure: f64,
    /// Model transparency / interpretability risk.
    pub model_transparency: f64,
    /// Misuse / adversarial vectors.
    pub misuse_vectors: f64,
    /// Legal / IP risk.
    pub legal_ip_risk: f64,
    /// Operational criticality.
    pub operational_criticality: f64,
}

impl DimensionScores {
    /// A scores record with every dimension set to the same value.
    /// Mostly useful in tests and smoke fixtures.
    pub fn uniform(value: f64) -> Self {
        Self {
            data_sensitivity: value,
            external_exposure: value,
            model_transparency: value,
            misuse_vectors: value,
            legal_ip_risk: value,
            operational_criticality: value,
        }
    }

    fn named(&self) -> [(&'static str, f64, f64); 6] {
        [
            ("data_sensitivity", self.data_sensitivity, WEIGHT_DATA_SENSITIVITY),
            ("external_exposure", self.external_exposure, WEIGHT_EXTERNAL_EXPOSURE),
            ("model_transparency", self.model_transparency, WEIGHT_MODEL_TRANSPARENCY),
            ("misuse_vectors", self.misuse_vectors, WEIGHT_MISUSE_VECTORS),
            ("legal_ip_risk", self.legal_ip_risk, WEIGHT_LEGAL_IP_RISK),
            (
                "operational_criticality",
                self.operational_criticality,
                WEIGHT_OPERATIONAL_CRITICALITY,
            ),
        ]
    }
}

/// The classification result: inputs, composite, and tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskProfile {
    /// The dimension scores the profile was computed from.
    pub scores: DimensionScores,
    /// The weighted composite, on the same 0–100 scale.
    pub composite_score: f64,
    /// The tier the composite lands in.
    pub tier: RiskTier,
}

impl RiskProfile {
    /// The audit checklist derived from this profile's tier.
    pub fn audit_checklist(&self) -> Vec<&'static str> {
        self.tier.audit_checklist()
    }
}

/// Classify six dimension scores into a risk profile.
///
/// Pure and deterministic. Fails if any score is outside [0, 100]
/// (NaN included).
pub fn classify(scores: &DimensionScores) -> Result<RiskProfile, RiskError> {
    let mut composite = 0.0;
    for (dimension, value, weight) in scores.named() {
        if !(0.0..=100.0).contains(&value) {
            return Err(RiskError::ScoreOutOfRange { dimension, value });
        }
        composite += value * weight;
    }

    let tier = tier_for(composite);
    debug!(composite, %tier, "risk profile classified");

    Ok(RiskProfile {
        scores: *scores,
        composite_score: composite,
        tier,
    })
}

/// Map a composite onto a tier. Boundaries are lower-inclusive.
fn tier_for(composite: f64) -> RiskTier {
    if composite < 20.0 {
        RiskTier::Minimal
    } else if composite < 40.0 {
        RiskTier::Low
    } else if composite < 60.0 {
        RiskTier::Medium
    } else if composite < 80.0 {
        RiskTier::High
    } else {
        RiskTier::Critical
    }
}
