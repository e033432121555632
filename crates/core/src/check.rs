//! Finite-difference checks for node Jacobians.
//!
//! These helpers evaluate a node at perturbed inputs and compare the result
//! with the Jacobian the node reports, which is how a new leaf node's
//! implicit-differentiation formula is usually validated.

use ndarray::{Array2, ArrayView1, Zip};

use crate::{Error, Node, ensure_len};

/// Estimates `dy/dx` at `x` with central differences of width `step`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `step` is not finite and positive,
/// [`Error::DimensionMismatch`] if `x` has the wrong length, and propagates
/// any error from [`Node::solve`] at the perturbed points.
pub fn numerical_jacobian<N>(
    node: &N,
    x: ArrayView1<'_, f64>,
    step: f64,
) -> Result<Array2<f64>, Error>
where
    N: Node + ?Sized,
{
    if !step.is_finite() || step <= 0.0 {
        return Err(Error::InvalidConfig {
            reason: "finite-difference step must be finite and positive",
        });
    }
    ensure_len(node.input_dim(), x.len())?;

    let mut jacobian = Array2::zeros((node.output_dim(), node.input_dim()));
    let mut probe = x.to_owned();

    for col in 0..x.len() {
        let original = probe[col];

        probe[col] = original + step;
        let forward = node.solve(probe.view())?.y;
        probe[col] = original - step;
        let backward = node.solve(probe.view())?.y;
        probe[col] = original;

        ensure_len(node.output_dim(), forward.len())?;
        ensure_len(node.output_dim(), backward.len())?;
        jacobian
            .column_mut(col)
            .assign(&((forward - backward) / (2.0 * step)));
    }

    Ok(jacobian)
}

/// Returns the largest elementwise error between the node's Jacobian and a
/// central-difference estimate, relative to the estimate's magnitude with a
/// floor of one.
///
/// # Errors
///
/// Propagates errors from [`numerical_jacobian`] and [`Node::gradient`].
pub fn gradient_error<N>(node: &N, x: ArrayView1<'_, f64>, step: f64) -> Result<f64, Error>
where
    N: Node + ?Sized,
{
    let numerical = numerical_jacobian(node, x, step)?;
    let analytic = node.gradient(x, None)?;
    ensure_len(numerical.nrows(), analytic.nrows())?;
    ensure_len(numerical.ncols(), analytic.ncols())?;

    let mut worst = 0.0_f64;
    Zip::from(&analytic)
        .and(&numerical)
        .for_each(|&a, &n| worst = worst.max((a - n).abs() / n.abs().max(1.0)));
    Ok(worst)
}
