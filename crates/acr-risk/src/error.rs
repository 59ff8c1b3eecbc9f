// error.rs — Error types for risk classification.

use thiserror::Error;

/// Errors raised while classifying a risk profile.
#[derive(Debug, Error)]
pub enum RiskError {
    /// A dimension score fell outside the [0, 100] range.
    #[error("dimension '{dimension}' score {value} is outside [0, 100]")]
    ScoreOutOfRange { dimension: &'static str, value: f64 },
}
