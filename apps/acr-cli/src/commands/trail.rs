// trail.rs — Trail subcommands: verify, tail.

use std::path::PathBuf;

use clap::Subcommand;

use acr_trail::{DecisionTrail, TrailError};

#[derive(Subcommand)]
pub enum TrailCommands {
    /// Verify the trail's hash chain integrity.
    Verify {
        /// Path to the trail file (defaults to .acr/trail.jsonl).
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show recent trail events.
    Tail {
        /// Path to the trail file (defaults to .acr/trail.jsonl).
        #[arg(long)]
        file: Option<PathBuf>,
        /// Number of events to show.
        #[arg(short, default_value = "10")]
        n: usize,
    },
}

fn default_trail() -> PathBuf {
    PathBuf::from(".acr/trail.jsonl")
}

pub fn execute(cmd: &TrailCommands) -> anyhow::Result<()> {
    match cmd {
        TrailCommands::Verify { file } => {
            let path = file.clone().unwrap_or_else(default_trail);
            if !path.exists() {
                println!("No trail found at {}", path.display());
                return Ok(());
            }

            match DecisionTrail::verify_chain(&path) {
                Ok(_) => {
                    let events = DecisionTrail::read_all(&path)?;
                    println!(
                        "Trail verified: {} event(s), hash chain intact.",
                        events.len()
                    );
                }
                Err(TrailError::IntegrityViolation {
                    line,
                    expected,
                    actual,
                }) => {
                    println!("INTEGRITY VIOLATION at line {}:", line);
                    println!("  Expected previous_hash: {}", expected);
                    println!("  Actual previous_hash:   {}", actual);
                    println!();
                    println!("The trail may have been tampered with.");
                    anyhow::bail!("Trail integrity check failed");
                }
                Err(e) => return Err(e.into()),
            }
        }

        TrailCommands::Tail { file, n } => {
            let path = file.clone().unwrap_or_else(default_trail);
            if !path.exists() {
                println!("No trail found at {}", path.display());
                return Ok(());
            }

            let events = DecisionTrail::read_all(&path)?;
            let start = events.len().saturating_sub(*n);
            let recent = &events[start..];

            if recent.is_empty() {
                println!("No trail events.");
                return Ok(());
            }

            println!("{:<26} {:<20} {:<36} POLICY", "TIMESTAMP", "KIND", "SCOPE");
            println!("{}", "-".repeat(96));
            for event in recent {
                println!(
                    "{:<26} {:<20} {:<36} {}",
                    event.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    format!("{:?}", event.kind),
                    event.scope_id,
                    event.policy_id.as_deref().unwrap_or("-"),
                );
            }
        }
    }

    Ok(())
}
