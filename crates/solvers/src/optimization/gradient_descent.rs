//! Gradient descent over the input of a scalar-valued network.
//!
//! # Algorithm
//!
//! Each iteration evaluates the network and its gradient `g` at the current
//! point `x`, then searches along `−g` with Armijo backtracking: starting
//! from the configured step `t`, it accepts `x − t·g` once the objective has
//! dropped by at least `c · t · ‖g‖²`, halving `t` (by default) otherwise.
//! Only accepted steps move the iterate, so the objective never increases.
//!
//! The gradient comes from the network's own `gradient`, which for declarative
//! nodes is computed by implicit differentiation at each node's solution.
//!
//! # Termination
//!
//! - [`Status::Converged`] — the gradient's largest component is within
//!   `gradient_tol`, or an accepted step improved the objective by no more
//!   than `objective_tol · (1 + |f|)`
//! - [`Status::Stalled`] — no step down to `min_step` lowered the objective
//! - [`Status::MaxIters`] — the iteration limit was reached
//! - [`Status::StoppedByObserver`] — an observer returned [`Action::StopEarly`]
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per accepted step, after the iterate has
//! moved. Trial points rejected by the line search are not reported.

mod action;
mod config;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use config::{Config, ConfigError, LineSearch};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use ddn_core::{Node, Observer};
use log::{debug, warn};
use ndarray::Array1;

use crate::optimization::{Evaluation, differentiate, evaluate, scalar_output};

/// Minimizes the node's scalar output starting from `x0`.
///
/// The observer receives an [`Event`] after every accepted step.
///
/// # Errors
///
/// Returns an error if the node is not scalar-valued, if the objective or
/// gradient at `x0` is not finite, or if any evaluation of the node fails.
pub fn minimize<N, Obs>(
    node: &N,
    x0: Array1<f64>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    N: Node + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    if node.output_dim() != 1 {
        return Err(Error::NotScalar {
            output_dim: node.output_dim(),
        });
    }

    let mut current = evaluate(node, x0)?;
    let initial_objective = current.objective;
    if !initial_objective.is_finite() {
        return Err(Error::NonFiniteObjective {
            objective: initial_objective,
        });
    }
    if !is_finite(&current.gradient) {
        return Err(Error::NonFiniteGradient);
    }
    debug!("gradient descent starting at objective {initial_objective}");

    for iter in 1..=config.max_iters() {
        if max_abs(&current.gradient) <= config.gradient_tol() {
            debug!(
                "gradient descent converged on gradient after {} iterations",
                iter - 1
            );
            return Ok(Solution::from_eval(
                current,
                initial_objective,
                Status::Converged,
                iter - 1,
            ));
        }

        let Some((next, step)) = line_search(node, &current, config)? else {
            warn!(
                "line search stalled at iteration {iter} with objective {}",
                current.objective
            );
            return Ok(Solution::from_eval(
                current,
                initial_objective,
                Status::Stalled,
                iter - 1,
            ));
        };

        let improvement = current.objective - next.objective;
        current = next;
        debug!("iteration {iter}: objective {}, step {step}", current.objective);

        let event = Event {
            iter,
            x: current.x.view(),
            objective: current.objective,
            gradient: current.gradient.view(),
            step,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::from_eval(
                current,
                initial_objective,
                Status::StoppedByObserver,
                iter,
            ));
        }

        if improvement <= config.objective_tol() * (1.0 + current.objective.abs()) {
            debug!("gradient descent converged on objective after {iter} iterations");
            return Ok(Solution::from_eval(
                current,
                initial_objective,
                Status::Converged,
                iter,
            ));
        }
    }

    Ok(Solution::from_eval(
        current,
        initial_objective,
        Status::MaxIters,
        config.max_iters(),
    ))
}

/// Minimizes the node's scalar output without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the node is not scalar-valued, if the objective at
/// `x0` is not finite, or if any evaluation of the node fails.
pub fn minimize_unobserved<N>(
    node: &N,
    x0: Array1<f64>,
    config: &Config,
) -> Result<Solution, Error>
where
    N: Node + ?Sized,
{
    minimize(node, x0, config, ())
}

/// Backtracks along the negative gradient until the Armijo condition holds.
///
/// Trial points are only solved; the Jacobian is computed once a point passes
/// the Armijo test. Returns the accepted evaluation and step, or `None` if every step down to
/// `min_step` failed to lower the objective enough.
fn line_search<N>(
    node: &N,
    current: &Evaluation,
    config: &Config,
) -> Result<Option<(Evaluation, f64)>, Error>
where
    N: Node + ?Sized,
{
    let params = config.line_search();
    let slope = current.gradient.dot(&current.gradient);
    let mut step = params.initial_step();

    while step >= params.min_step() {
        let candidate = &current.x - &(&current.gradient * step);
        let solution = node.solve(candidate.view())?;
        let trial_objective = scalar_output(&solution)?;

        let target = current.objective - params.sufficient_decrease() * step * slope;
        if trial_objective.is_finite()
            && trial_objective <= target
            && trial_objective < current.objective
        {
            let trial = differentiate(node, candidate, &solution)?;
            if is_finite(&trial.gradient) {
                return Ok(Some((trial, step)));
            }
        }
        step *= params.shrink();
    }

    Ok(None)
}

fn max_abs(values: &Array1<f64>) -> f64 {
    values.iter().fold(0.0, |max, v| max.max(v.abs()))
}

fn is_finite(values: &Array1<f64>) -> bool {
    values.iter().all(|v| v.is_finite())
}
