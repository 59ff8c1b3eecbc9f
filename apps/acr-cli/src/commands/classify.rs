// classify.rs — Risk classification from six dimension scores.

use acr_risk::{classify, DimensionScores};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    data_sensitivity: f64,
    external_exposure: f64,
    model_transparency: f64,
    misuse_vectors: f64,
    legal_ip_risk: f64,
    operational_criticality: f64,
    json: bool,
) -> anyhow::Result<()> {
    let scores = DimensionScores {
        data_sensitivity,
        external_exposure,
        model_transparency,
        misuse_vectors,
        legal_ip_risk,
        operational_criticality,
    };
    let profile = classify(&scores)?;

    if json {
        let payload = serde_json::json!({
            "scores": profile.scores,
            "composite_score": profile.composite_score,
            "tier": profile.tier,
            "risk_multiplier": profile.tier.risk_multiplier(),
            "audit_checklist": profile.audit_checklist(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Composite score: {:.1}", profile.composite_score);
    println!("Risk tier:       {}", profile.tier);
    println!("Risk multiplier: {:.2}", profile.tier.risk_multiplier());
    println!();
    println!("Audit checklist:");
    for item in profile.audit_checklist() {
        println!("  - {}", item);
    }

    Ok(())
}
