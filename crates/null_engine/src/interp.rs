//! Piecewise-linear interpolation over a strictly increasing knot grid.
//!
//! Queries outside the table's domain return a constant fill value rather
//! than extrapolating, so a delayed channel contributes nothing where it
//! has no coverage.

use contracts::NullStreamError;

/// Table interpolant with constant fill outside `[x[0], x[n-1]]`.
#[derive(Debug, Clone)]
pub struct LinearInterpolant {
    x: Vec<f64>,
    y: Vec<f64>,
    fill: f64,
}

impl LinearInterpolant {
    /// Builds a table from matched knot and value vectors.
    ///
    /// The knot vector must be non-empty and strictly increasing; a NaN
    /// knot fails the ordering check like any other violation.
    pub fn new(x: Vec<f64>, y: Vec<f64>, fill: f64) -> Result<Self, NullStreamError> {
        if x.is_empty() {
            return Err(NullStreamError::invalid_input("interpolation table is empty"));
        }
        if x.len() != y.len() {
            return Err(NullStreamError::invalid_input(format!(
                "interpolation table has {} knots but {} values",
                x.len(),
                y.len()
            )));
        }
        for pair in x.windows(2) {
            if !(pair[0] < pair[1]) {
                return Err(NullStreamError::invalid_input(
                    "interpolation knots are not strictly increasing",
                ));
            }
        }
        Ok(Self { x, y, fill })
    }

    /// Inclusive domain covered by the table.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Evaluates the interpolant at a single point.
    ///
    /// Knot queries return the stored value exactly, including both
    /// endpoints. A single-knot table is a point mass: exact at its knot,
    /// fill everywhere else.
    pub fn eval(&self, at: f64) -> f64 {
        if at.is_nan() {
            return self.fill;
        }
        let n = self.x.len();
        if at < self.x[0] || at > self.x[n - 1] {
            return self.fill;
        }
        let idx = self.x.partition_point(|&knot| knot <= at);
        if idx >= n {
            return self.y[n - 1];
        }
        let x0 = self.x[idx - 1];
        let x1 = self.x[idx];
        let t = (at - x0) / (x1 - x0);
        self.y[idx - 1] + t * (self.y[idx] - self.y[idx - 1])
    }

    /// Evaluates the interpolant over a whole grid.
    pub fn sample(&self, grid: &[f64]) -> Vec<f64> {
        grid.iter().map(|&at| self.eval(at)).collect()
    }
}
