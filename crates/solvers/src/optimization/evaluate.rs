use ddn_core::{Error, Node, Solution, ensure_len};
use ndarray::Array1;

/// A scalar-valued node evaluated at `x`, with its gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub x: Array1<f64>,

    pub objective: f64,

    pub gradient: Array1<f64>,
}

/// Solves the node at `x` and differentiates it, reusing the solve's context.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `x` has the wrong length or the
/// node does not produce a single output, and propagates node failures.
pub fn evaluate<N>(node: &N, x: Array1<f64>) -> Result<Evaluation, Error>
where
    N: Node + ?Sized,
{
    let solution = node.solve(x.view())?;
    differentiate(node, x, &solution)
}

/// Returns the scalar objective carried by a solution.
pub(crate) fn scalar_output<C>(solution: &Solution<C>) -> Result<f64, Error> {
    ensure_len(1, solution.y.len())?;
    Ok(solution.y[0])
}

/// Completes an [`Evaluation`] from a solution already computed at `x`.
pub(crate) fn differentiate<N>(
    node: &N,
    x: Array1<f64>,
    solution: &Solution<N::Context>,
) -> Result<Evaluation, Error>
where
    N: Node + ?Sized,
{
    let objective = scalar_output(solution)?;

    let jacobian = node.gradient(x.view(), Some(solution))?;
    ensure_len(1, jacobian.nrows())?;
    ensure_len(x.len(), jacobian.ncols())?;

    Ok(Evaluation {
        objective,
        gradient: jacobian.row(0).to_owned(),
        x,
    })
}
