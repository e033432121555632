//! Robust averaging: `y = argmin_u Σ φ(u − x_i; α)`.
//!
//! Convex penalties have a single minimum, the root of the non-decreasing
//! slope `Σ φ'(u − x_i)`, which always lies between `min(x)` and `max(x)`.
//! It is found by Newton's method on the slope, keeping that bracket and
//! bisecting whenever a Newton step would leave it or the curvature vanishes.
//!
//! Non-convex penalties use iteratively reweighted least squares (IRLS).
//! Each step replaces `u` with the weighted mean of the data, weighting each
//! point by `φ'(u − x_i) / (u − x_i)`, which never increases the objective.
//! IRLS starts from the mean, the median and every data point, keeping the
//! best local minimum found.
//!
//! The Jacobian follows from implicit differentiation of the optimality
//! condition `Σ φ'(y − x_i) = 0`:
//!
//! ```text
//! ∂y/∂x_i = φ''(y − x_i) / Σ_j φ''(y − x_j)
//! ```

mod config;
mod error;
mod penalty;

pub use config::{ConfigError, RobustConfig};
pub use error::RobustError;
pub use penalty::Penalty;

use ddn_core::{Error, Node, Solution, ensure_len};
use log::{debug, trace};
use ndarray::{Array1, Array2, ArrayView1, Axis, array};

/// The robust average of an `n`-vector under a [`Penalty`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobustAverage {
    dim: usize,
    penalty: Penalty,
    config: RobustConfig,
}

/// Context recorded by [`RobustAverage::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct RobustContext {
    /// `φ''(y − x_i)` for each input element at the solution.
    pub curvature: Array1<f64>,
}

impl RobustAverage {
    /// Creates a robust average over inputs of length `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `dim` is zero or the penalty's
    /// `α` is not finite and positive.
    pub fn new(dim: usize, penalty: Penalty) -> Result<Self, Error> {
        if dim == 0 {
            return Err(Error::InvalidConfig {
                reason: "input dimension must be positive",
            });
        }
        penalty
            .validate()
            .map_err(|reason| Error::InvalidConfig { reason })?;

        Ok(Self {
            dim,
            penalty,
            config: RobustConfig::default(),
        })
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_config(self, config: RobustConfig) -> Self {
        Self { config, ..self }
    }

    /// The penalty this node minimizes.
    #[must_use]
    pub fn penalty(&self) -> Penalty {
        self.penalty
    }

    /// `Σ φ(y − x_i)`.
    #[must_use]
    pub fn objective(&self, x: ArrayView1<'_, f64>, y: f64) -> f64 {
        x.iter().map(|&xi| self.penalty.value(y - xi)).sum()
    }

    fn minimize(&self, x: ArrayView1<'_, f64>) -> Result<f64, RobustError> {
        #[allow(clippy::cast_precision_loss)]
        let mean = x.sum() / x.len() as f64;
        if !mean.is_finite() {
            return Err(RobustError::NonFinite);
        }
        if self.penalty == Penalty::Quadratic {
            return Ok(mean);
        }

        if self.penalty.is_convex() {
            let y = self.newton(x, median(x))?.ok_or(RobustError::NotConverged {
                max_iters: self.config.max_iters(),
            })?;
            debug!("robust average converged: y = {y}");
            return Ok(y);
        }

        let mut best: Option<(f64, f64)> = None;
        for start in [mean, median(x)].into_iter().chain(x.iter().copied()) {
            let Some(y) = self.reweight(x, start)? else {
                continue;
            };
            let objective = self.objective(x, y);
            trace!("robust average from {start}: y = {y}, objective = {objective}");
            if best.is_none_or(|(_, best_objective)| objective < best_objective) {
                best = Some((y, objective));
            }
        }

        let (y, objective) = best.ok_or(RobustError::NotConverged {
            max_iters: self.config.max_iters(),
        })?;
        debug!("robust average converged: y = {y}, objective = {objective}");
        Ok(y)
    }

    /// Finds the root of the slope `Σ φ'(y − x_i)` from `start`.
    ///
    /// Returns `None` when the iteration did not converge.
    fn newton(&self, x: ArrayView1<'_, f64>, start: f64) -> Result<Option<f64>, RobustError> {
        let mut lo = x.fold(f64::INFINITY, |lo, &xi| lo.min(xi));
        let mut hi = x.fold(f64::NEG_INFINITY, |hi, &xi| hi.max(xi));
        let mut y = start.clamp(lo, hi);

        for _ in 0..self.config.max_iters() {
            let (slope, curvature) = x.iter().fold((0.0, 0.0), |(slope, curvature), &xi| {
                (
                    slope + self.penalty.derivative(y - xi),
                    curvature + self.penalty.curvature(y - xi),
                )
            });
            if !slope.is_finite() {
                return Err(RobustError::NonFinite);
            }
            if slope == 0.0 {
                return Ok(Some(y));
            }
            if slope > 0.0 {
                hi = y;
            } else {
                lo = y;
            }

            let candidate = y - slope / curvature;
            let next = if curvature > 0.0 && candidate > lo && candidate < hi {
                candidate
            } else {
                0.5 * (lo + hi)
            };
            if (next - y).abs() <= self.config.tol() * (1.0 + y.abs()) {
                return Ok(Some(next));
            }
            y = next;
        }

        trace!("robust average from {start} stopped at max_iters with y = {y}");
        Ok(None)
    }

    /// Runs IRLS from `start`.
    ///
    /// Returns `None` when the iteration did not converge, or when every
    /// weight vanished so the start has no support.
    fn reweight(&self, x: ArrayView1<'_, f64>, start: f64) -> Result<Option<f64>, RobustError> {
        let mut y = start;

        for _ in 0..self.config.max_iters() {
            let (weighted, total) = x.iter().fold((0.0, 0.0), |(weighted, total), &xi| {
                let w = self.penalty.weight(y - xi);
                (weighted + w * xi, total + w)
            });
            if total <= 0.0 {
                return Ok(None);
            }

            let next = weighted / total;
            if !next.is_finite() {
                return Err(RobustError::NonFinite);
            }
            if (next - y).abs() <= self.config.tol() * (1.0 + y.abs()) {
                return Ok(Some(next));
            }
            y = next;
        }

        trace!("robust average from {start} stopped at max_iters with y = {y}");
        Ok(None)
    }
}

impl Node for RobustAverage {
    type Context = RobustContext;

    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<RobustContext>, Error> {
        ensure_len(self.dim, x.len())?;

        let y = self.minimize(x).map_err(Error::leaf)?;
        let curvature = x.mapv(|xi| self.penalty.curvature(y - xi));

        Ok(Solution::new(array![y], RobustContext { curvature }))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        context: &RobustContext,
    ) -> Result<Array2<f64>, Error> {
        ensure_len(self.dim, x.len())?;
        ensure_len(1, y.len())?;
        ensure_len(self.dim, context.curvature.len())?;

        let total = context.curvature.sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(Error::leaf(RobustError::DegenerateCurvature { y: y[0], total }));
        }

        Ok((&context.curvature / total).insert_axis(Axis(0)))
    }
}

fn median(x: ArrayView1<'_, f64>) -> f64 {
    let mut sorted = x.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        0.5 * (sorted[mid - 1] + sorted[mid])
    } else {
        sorted[mid]
    }
}
