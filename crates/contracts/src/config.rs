//! Runtime tuning for the null-stream engine.

use serde::{Deserialize, Serialize};

/// Numeric thresholds applied when solving for combination coefficients.
///
/// `singular_epsilon` is the hard-failure bound on the antenna-pattern
/// denominator; at or below it the detector geometry is treated as
/// degenerate. Between `singular_epsilon` and `warn_epsilon` the solve
/// still proceeds but is logged as near-singular. Values are never
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NullStreamConfig {
    #[serde(default = "default_singular_epsilon")]
    pub singular_epsilon: f64,
    #[serde(default = "default_warn_epsilon")]
    pub warn_epsilon: f64,
}

fn default_singular_epsilon() -> f64 {
    1e-12
}

fn default_warn_epsilon() -> f64 {
    1e-3
}

impl Default for NullStreamConfig {
    fn default() -> Self {
        Self {
            singular_epsilon: default_singular_epsilon(),
            warn_epsilon: default_warn_epsilon(),
        }
    }
}
