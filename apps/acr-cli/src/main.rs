//! # acr-cli
//!
//! Command-line interface for aicomplyr governance.
//!
//! Inspect and exercise the governance core against tenant files:
//! - `acr resolve` — compute the effective policy at a scope
//! - `acr conflicts` — detect child/parent policy conflicts
//! - `acr classify` — classify six risk dimension scores into a tier
//! - `acr explain` — generate the rationale for a recorded decision
//! - `acr trail verify/tail` — inspect the tamper-evident decision trail

mod commands;
mod tenant;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// aicomplyr governance CLI — resolve, review, classify, explain.
#[derive(Parser)]
#[command(name = "acr", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the effective policy at a scope.
    Resolve {
        /// Tenant file with scopes and policies (YAML).
        #[arg(long)]
        tenant: PathBuf,
        /// Scope to resolve, by materialized path or UUID.
        #[arg(long)]
        scope: String,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Detect policy conflicts across a tenant.
    Conflicts {
        /// Tenant file with scopes and policies (YAML).
        #[arg(long)]
        tenant: PathBuf,
        /// Restrict detection to one scope (path or UUID).
        #[arg(long)]
        scope: Option<String>,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Classify six risk dimension scores into a tier.
    Classify {
        /// Data sensitivity & privacy exposure (0-100).
        #[arg(long)]
        data_sensitivity: f64,
        /// External exposure & decision impact (0-100).
        #[arg(long)]
        external_exposure: f64,
        /// Model transparency / interpretability risk (0-100).
        #[arg(long)]
        model_transparency: f64,
        /// Misuse / adversarial vectors (0-100).
        #[arg(long)]
        misuse_vectors: f64,
        /// Legal / IP risk (0-100).
        #[arg(long)]
        legal_ip_risk: f64,
        /// Operational criticality (0-100).
        #[arg(long)]
        operational_criticality: f64,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Generate the rationale for a recorded decision.
    Explain {
        /// JSON file holding a decision outcome or rationale request.
        #[arg(long)]
        input: PathBuf,
        /// Scope id to record against when appending to the trail.
        #[arg(long)]
        scope: Option<String>,
        /// Append the rationale to a decision trail file.
        #[arg(long)]
        trail: Option<PathBuf>,
        /// Emit JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Inspect the decision trail.
    Trail {
        #[command(subcommand)]
        command: commands::trail::TrailCommands,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Resolve {
            tenant,
            scope,
            json,
        } => commands::resolve::execute(tenant, scope, *json),
        Commands::Conflicts {
            tenant,
            scope,
            json,
        } => commands::conflicts::execute(tenant, scope.as_deref(), *json),
        Commands::Classify {
            data_sensitivity,
            external_exposure,
            model_transparency,
            misuse_vectors,
            legal_ip_risk,
            operational_criticality,
            json,
        } => commands::classify::execute(
            *data_sensitivity,
            *external_exposure,
            *model_transparency,
            *misuse_vectors,
            *legal_ip_risk,
            *operational_criticality,
            *json,
        ),
        Commands::Explain {
            input,
            scope,
            trail,
            json,
        } => commands::explain::execute(input, scope.as_deref(), trail.as_deref(), *json),
        Commands::Trail { command } => commands::trail::execute(command),
    }
}
