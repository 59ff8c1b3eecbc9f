// explain.rs — Generate the rationale for a recorded decision.
//
// Input is a JSON file holding either a tagged legacy outcome (with a
// `source` field) or a rationale request directly. Optionally appends
// the result to the decision trail.

use std::path::Path;

use anyhow::Context;

use acr_rationale::{
    generate_rationale, validate_rationale, DecisionOutcome, Rationale, RationaleRequest,
};
use acr_trail::{DecisionTrail, TrailEvent, TrailKind};

pub fn execute(
    input: &Path,
    scope: Option<&str>,
    trail: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read decision input {}", input.display()))?;

    let rationale = parse_rationale(&content)
        .with_context(|| format!("failed to parse decision input {}", input.display()))?;

    if let Some(trail_path) = trail {
        let mut trail = DecisionTrail::open(trail_path)?;
        let mut event = TrailEvent::new(
            scope.unwrap_or("unscoped"),
            TrailKind::DecisionRecorded,
        )
        .with_policy(rationale.structured.policy_id.clone())
        .with_payload(&rationale)?;
        trail.append(&mut event)?;
        eprintln!("Recorded to trail at {}", trail_path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rationale)?);
    } else {
        println!("{}", rationale.human);
        println!();
        println!("policy:  {} (v{})", rationale.structured.policy_id, rationale.structured.policy_version);
        println!("rule:    {}", rationale.structured.rule_matched);
        println!("tool:    {}", rationale.structured.inputs.tool);
        println!("data:    {}", rationale.structured.inputs.dataset_class);
    }

    Ok(())
}

/// Accept either legacy shape (tagged with `source`) or a direct request.
fn parse_rationale(content: &str) -> anyhow::Result<Rationale> {
    if let Ok(outcome) = serde_json::from_str::<DecisionOutcome>(content) {
        return Ok(outcome.into_rationale()?);
    }
    let request: RationaleRequest = serde_json::from_str(content)?;
    let rationale = generate_rationale(&request);
    validate_rationale(&rationale)?;
    Ok(rationale)
}
