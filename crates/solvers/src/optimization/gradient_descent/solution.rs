use ndarray::Array1;

use crate::optimization::Evaluation;

/// Indicates why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,

    /// The line search found no step that lowers the objective.
    Stalled,
}

/// The result of a gradient descent run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// The final point.
    pub x: Array1<f64>,

    /// Objective at the final point.
    pub objective: f64,

    /// Gradient at the final point.
    pub gradient: Array1<f64>,

    /// Objective at the starting point.
    pub initial_objective: f64,

    /// Number of accepted steps.
    pub iters: usize,
}

impl Solution {
    pub(super) fn from_eval(
        eval: Evaluation,
        initial_objective: f64,
        status: Status,
        iters: usize,
    ) -> Self {
        Self {
            status,
            x: eval.x,
            objective: eval.objective,
            gradient: eval.gradient,
            initial_objective,
            iters,
        }
    }
}
