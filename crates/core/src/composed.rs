use ndarray::{Array1, Array2, ArrayView1};

use crate::{Error, Node, Solution, ensure_len};

/// Two nodes called in sequence: `first`, then `second`.
///
/// Built by [`Node::then()`] or [`ComposedNode::new`]. The output of `first`
/// becomes the input of `second`, and the Jacobian is the chain-rule product
/// `J_second · J_first`, with each factor computed by the child itself.
///
/// A `ComposedNode` is a [`Node`], so it can be nested inside further
/// compositions without special cases.
#[derive(Debug, Clone)]
pub struct ComposedNode<F, G> {
    first: F,
    second: G,
}

/// Context recorded by [`ComposedNode::solve`].
#[derive(Debug, Clone)]
pub struct ComposedContext<CF, CG> {
    /// Output of the first node, which is the input of the second.
    pub intermediate: Array1<f64>,

    /// Context of the first node.
    pub first: CF,

    /// Context of the second node.
    pub second: CG,
}

impl<F, G> ComposedNode<F, G>
where
    F: Node,
    G: Node,
{
    /// Wires `first`'s output into `second`'s input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `first.output_dim()` differs
    /// from `second.input_dim()`.
    pub fn new(first: F, second: G) -> Result<Self, Error> {
        ensure_len(first.output_dim(), second.input_dim())?;
        Ok(Self { first, second })
    }

    /// Returns the node applied first.
    pub fn first(&self) -> &F {
        &self.first
    }

    /// Returns the node applied second.
    pub fn second(&self) -> &G {
        &self.second
    }

    /// Splits the composition back into its two nodes.
    pub fn into_parts(self) -> (F, G) {
        (self.first, self.second)
    }
}

impl<F, G> Node for ComposedNode<F, G>
where
    F: Node,
    G: Node,
{
    type Context = ComposedContext<F::Context, G::Context>;

    fn input_dim(&self) -> usize {
        self.first.input_dim()
    }

    fn output_dim(&self) -> usize {
        self.second.output_dim()
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<Self::Context>, Error> {
        let Solution {
            y: intermediate,
            context: first,
        } = self.first.solve(x)?;
        let Solution { y, context: second } = self.second.solve(intermediate.view())?;

        Ok(Solution::new(
            y,
            ComposedContext {
                intermediate,
                first,
                second,
            },
        ))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        context: &Self::Context,
    ) -> Result<Array2<f64>, Error> {
        let u = context.intermediate.view();
        let first = self.first.jacobian(x, u, &context.first)?;
        let second = self.second.jacobian(u, y, &context.second)?;
        ensure_len(second.ncols(), first.nrows())?;
        Ok(second.dot(&first))
    }
}
