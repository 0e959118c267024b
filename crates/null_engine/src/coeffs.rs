//! Gürsel–Tinto combination coefficients.
//!
//! For three detectors with plus/cross responses toward a common sky
//! position, the weights `[1, -eta, -xi]` cancel any strain of the form
//! `F+·h+ + F×·h×`. `eta` and `xi` solve the 2x2 system
//!
//! ```text
//! F+[1]·eta + F+[2]·xi = F+[0]
//! F×[1]·eta + F×[2]·xi = F×[0]
//! ```
//!
//! whose determinant is the antenna-pattern denominator. When detectors 1
//! and 2 have proportional responses the system is degenerate and no null
//! combination exists.

use contracts::{NullStreamConfig, NullStreamError};
use tracing::warn;

/// Solved combination coefficients for one detector triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GurselTintoCoefficients {
    pub eta: f64,
    pub xi: f64,
    /// Determinant of the antenna-pattern system, kept for diagnostics.
    pub denominator: f64,
}

impl GurselTintoCoefficients {
    /// Per-channel weights in detector order.
    pub fn weights(&self) -> [f64; 3] {
        [1.0, -self.eta, -self.xi]
    }
}

/// Solves for the coefficients, failing hard on a degenerate geometry.
///
/// A denominator within `warn_epsilon` of zero is reported but never
/// clamped; the caller gets exactly what the geometry produced.
pub fn solve(
    f_plus: [f64; 3],
    f_cross: [f64; 3],
    config: &NullStreamConfig,
) -> Result<GurselTintoCoefficients, NullStreamError> {
    let denominator = f_plus[1] * f_cross[2] - f_cross[1] * f_plus[2];
    if denominator.abs() <= config.singular_epsilon {
        return Err(NullStreamError::singular_antenna_pattern(
            denominator,
            config.singular_epsilon,
        ));
    }
    if denominator.abs() < config.warn_epsilon {
        warn!(
            denominator,
            threshold = config.warn_epsilon,
            "near-singular antenna pattern, coefficients will be poorly conditioned"
        );
    }
    let eta = (f_plus[0] * f_cross[2] - f_cross[0] * f_plus[2]) / denominator;
    let xi = (f_cross[0] * f_plus[1] - f_cross[1] * f_plus[0]) / denominator;
    Ok(GurselTintoCoefficients {
        eta,
        xi,
        denominator,
    })
}
