use std::any::Any;

use ndarray::{Array2, ArrayView1};

use crate::{Error, Node, Solution};

/// A type-erased solver context.
pub type BoxedContext = Box<dyn Any + Send + Sync>;

/// A type-erased node, as produced by [`Node::boxed()`].
///
/// Boxed nodes share a single context type, so nodes of different concrete
/// types can be stored together, for example as children of a
/// [`ParallelNode`](crate::ParallelNode).
pub type BoxedNode = Box<dyn Node<Context = BoxedContext> + Send + Sync>;

/// Adapts a node so its context is boxed on the way out of `solve` and
/// downcast on the way into `jacobian`.
pub(crate) struct Erased<N> {
    node: N,
}

impl<N> Erased<N> {
    pub(crate) fn new(node: N) -> Self {
        Self { node }
    }
}

impl<N> Node for Erased<N>
where
    N: Node,
    N::Context: Send + Sync + 'static,
{
    type Context = BoxedContext;

    fn input_dim(&self) -> usize {
        self.node.input_dim()
    }

    fn output_dim(&self) -> usize {
        self.node.output_dim()
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<BoxedContext>, Error> {
        let Solution { y, context } = self.node.solve(x)?;
        let context: BoxedContext = Box::new(context);
        Ok(Solution::new(y, context))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        context: &BoxedContext,
    ) -> Result<Array2<f64>, Error> {
        let context = (**context)
            .downcast_ref::<N::Context>()
            .ok_or(Error::ContextMismatch)?;
        self.node.jacobian(x, y, context)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::SelectNode;

    #[test]
    fn boxed_node_matches_concrete_node() {
        let select = SelectNode::new(4, 1, Some(2)).unwrap();
        let boxed = SelectNode::new(4, 1, Some(2)).unwrap().boxed();
        let x = array![1.0, 2.0, 3.0, 4.0];

        assert_eq!(boxed.input_dim(), 4);
        assert_eq!(boxed.output_dim(), 2);

        let solution = boxed.solve(x.view()).unwrap();
        assert_eq!(solution.y, select.solve(x.view()).unwrap().y);
        assert_eq!(
            boxed.gradient(x.view(), Some(&solution)).unwrap(),
            select.gradient(x.view(), None).unwrap()
        );
    }

    #[test]
    fn foreign_context_is_rejected() {
        let boxed = SelectNode::new(3, 0, None).unwrap().boxed();
        let x = array![1.0, 2.0, 3.0];
        let foreign: BoxedContext = Box::new(42_u32);

        let result = boxed.jacobian(x.view(), x.view(), &foreign);

        assert!(matches!(result, Err(Error::ContextMismatch)));
    }
}
