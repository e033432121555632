use ndarray::{Array1, Array2, ArrayView1};

use crate::{BoxedNode, ComposedNode, Error, boxed::Erased};

/// The output of [`Node::solve`]: the solution vector and the context needed
/// to differentiate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<C> {
    pub y: Array1<f64>,
    pub context: C,
}

impl<C> Solution<C> {
    /// Creates a new solution from an output vector and its context.
    pub fn new(y: Array1<f64>, context: C) -> Self {
        Self { y, context }
    }
}

/// Checks that a vector has the length a node expects.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] when `actual != expected`.
pub fn ensure_len(expected: usize, actual: usize) -> Result<(), Error> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, actual })
    }
}

/// The core trait for declarative nodes.
///
/// A `Node` has a fixed input dimension and output dimension. Calling
/// [`solve()`] maps an input `x` to an output `y`, typically the solution of an
/// optimization problem parametrized by `x`, along with an opaque context that
/// records whatever the node needs to differentiate that solution cheaply.
/// Calling [`jacobian()`] returns `dy/dx` as an `output_dim × input_dim`
/// matrix, row `i` holding the gradient of `y[i]`.
///
/// For nodes defined by an optimization problem, the Jacobian comes from
/// implicit differentiation of the optimality conditions at the solution, not
/// from differentiating through solver iterations.
///
/// Nodes hold no per-call state. Anything computed during a solve travels in
/// the returned [`Solution`] and is handed back to [`jacobian()`] explicitly.
///
/// ## Composing nodes
///
/// - [`Node::then()`] chains two nodes into a [`ComposedNode`].
/// - [`Node::boxed()`] erases a node's type so heterogeneous nodes can be
///   placed side by side in a [`ParallelNode`](crate::ParallelNode).
///
/// # Example
///
/// ```
/// use ddn_core::{Error, Node, Solution, ensure_len};
/// use ndarray::{Array2, ArrayView1, array};
///
/// /// Doubles every element of its input.
/// struct Double {
///     dim: usize,
/// }
///
/// impl Node for Double {
///     type Context = ();
///
///     fn input_dim(&self) -> usize {
///         self.dim
///     }
///
///     fn output_dim(&self) -> usize {
///         self.dim
///     }
///
///     fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
///         ensure_len(self.dim, x.len())?;
///         Ok(Solution::new(x.mapv(|v| 2.0 * v), ()))
///     }
///
///     fn jacobian(
///         &self,
///         x: ArrayView1<'_, f64>,
///         _y: ArrayView1<'_, f64>,
///         _context: &(),
///     ) -> Result<Array2<f64>, Error> {
///         ensure_len(self.dim, x.len())?;
///         Ok(Array2::<f64>::eye(self.dim) * 2.0)
///     }
/// }
///
/// let node = Double { dim: 2 };
/// let x = array![1.0, 2.0];
///
/// let solution = node.solve(x.view()).unwrap();
/// assert_eq!(solution.y, array![2.0, 4.0]);
///
/// let jacobian = node.gradient(x.view(), Some(&solution)).unwrap();
/// assert_eq!(jacobian, Array2::<f64>::eye(2) * 2.0);
/// ```
///
/// [`solve()`]: Node::solve
/// [`jacobian()`]: Node::jacobian
pub trait Node {
    /// Opaque data passed from [`Node::solve`] to [`Node::jacobian`].
    type Context;

    /// Length of the input vector this node accepts.
    fn input_dim(&self) -> usize;

    /// Length of the output vector this node produces.
    fn output_dim(&self) -> usize;

    /// Solves the node's problem for input `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `x.len() != self.input_dim()`,
    /// or whatever error the node's own problem produces.
    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<Self::Context>, Error>;

    /// Returns the Jacobian `dy/dx` at `x`, given the solution `y` and the
    /// context that [`Node::solve`] produced for it.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` or `y` has the wrong length, or if the node
    /// cannot differentiate its problem at this point.
    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        context: &Self::Context,
    ) -> Result<Array2<f64>, Error>;

    /// Returns the Jacobian at `x`, solving first if no solution is supplied.
    ///
    /// Passing the solution from an earlier [`Node::solve`] avoids solving the
    /// problem twice. Both forms return the same matrix.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Node::solve`] and [`Node::jacobian`].
    fn gradient(
        &self,
        x: ArrayView1<'_, f64>,
        solution: Option<&Solution<Self::Context>>,
    ) -> Result<Array2<f64>, Error> {
        match solution {
            Some(solution) => self.jacobian(x, solution.y.view(), &solution.context),
            None => {
                let solution = self.solve(x)?;
                self.jacobian(x, solution.y.view(), &solution.context)
            }
        }
    }

    /// Returns the vector-Jacobian product `vᵀ · dy/dx`.
    ///
    /// This is the gradient of `vᵀ y` with respect to `x`, the quantity
    /// reverse-mode backpropagation pushes through a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `v.len() != self.output_dim()`,
    /// and propagates errors from [`Node::gradient`].
    fn vjp(
        &self,
        x: ArrayView1<'_, f64>,
        solution: Option<&Solution<Self::Context>>,
        v: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>, Error> {
        ensure_len(self.output_dim(), v.len())?;
        let jacobian = self.gradient(x, solution)?;
        Ok(v.dot(&jacobian))
    }

    /// Chains this node with another, feeding this node's output to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if this node's output dimension
    /// differs from `next`'s input dimension.
    fn then<Next>(self, next: Next) -> Result<ComposedNode<Self, Next>, Error>
    where
        Self: Sized,
        Next: Node,
    {
        ComposedNode::new(self, next)
    }

    /// Erases this node's concrete type and context type.
    fn boxed(self) -> BoxedNode
    where
        Self: Sized + Send + Sync + 'static,
        Self::Context: Send + Sync + 'static,
    {
        Box::new(Erased::new(self))
    }
}

impl<N> Node for Box<N>
where
    N: Node + ?Sized,
{
    type Context = N::Context;

    fn input_dim(&self) -> usize {
        (**self).input_dim()
    }

    fn output_dim(&self) -> usize {
        (**self).output_dim()
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<Self::Context>, Error> {
        (**self).solve(x)
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        context: &Self::Context,
    ) -> Result<Array2<f64>, Error> {
        (**self).jacobian(x, y, context)
    }
}
