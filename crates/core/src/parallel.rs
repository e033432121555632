use std::ops::Range;

use ndarray::{Array1, Array2, ArrayView1, s};

use crate::{BoxedContext, BoxedNode, Error, Node, Solution, ensure_len};

/// Nodes evaluated side by side on disjoint slices of a shared input.
///
/// Children are assigned contiguous input slices in the order they were
/// added, covering the input exactly. Their outputs are concatenated in the
/// same order. Because no child sees another child's input, the Jacobian is
/// block diagonal: child `i`'s Jacobian sits at its output rows and input
/// columns, and every other entry is zero.
///
/// Children are stored as [`BoxedNode`]s so nodes of different types can be
/// combined; use [`Node::boxed()`] to convert them.
pub struct ParallelNode {
    children: Vec<BoxedNode>,
    inputs: Vec<Range<usize>>,
    outputs: Vec<Range<usize>>,
}

/// Context recorded by [`ParallelNode::solve`]: one context per child, in
/// child order.
#[derive(Debug)]
pub struct ParallelContext {
    pub children: Vec<BoxedContext>,
}

impl ParallelNode {
    /// Creates a parallel node from an ordered list of children.
    ///
    /// A single child is allowed and behaves exactly like that child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `children` is empty.
    pub fn new(children: Vec<BoxedNode>) -> Result<Self, Error> {
        if children.is_empty() {
            return Err(Error::InvalidConfig {
                reason: "a parallel node needs at least one child",
            });
        }

        let mut node = Self {
            children: Vec::with_capacity(children.len()),
            inputs: Vec::with_capacity(children.len()),
            outputs: Vec::with_capacity(children.len()),
        };
        for child in children {
            node.push(child);
        }
        Ok(node)
    }

    /// Appends a child, extending both the input and the output.
    pub fn push(&mut self, child: BoxedNode) {
        let input_start = self.input_dim();
        let output_start = self.output_dim();
        self.inputs
            .push(input_start..input_start + child.input_dim());
        self.outputs
            .push(output_start..output_start + child.output_dim());
        self.children.push(child);
    }

    /// Number of children.
    #[must_use]
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// The slice of the shared input routed to child `index`.
    #[must_use]
    pub fn input_range(&self, index: usize) -> Option<Range<usize>> {
        self.inputs.get(index).cloned()
    }

    /// The slice of the concatenated output produced by child `index`.
    #[must_use]
    pub fn output_range(&self, index: usize) -> Option<Range<usize>> {
        self.outputs.get(index).cloned()
    }

    fn blocks(&self) -> impl Iterator<Item = (&BoxedNode, &Range<usize>, &Range<usize>)> {
        self.children
            .iter()
            .zip(&self.inputs)
            .zip(&self.outputs)
            .map(|((child, input), output)| (child, input, output))
    }
}

impl Node for ParallelNode {
    type Context = ParallelContext;

    fn input_dim(&self) -> usize {
        self.inputs.last().map_or(0, |range| range.end)
    }

    fn output_dim(&self) -> usize {
        self.outputs.last().map_or(0, |range| range.end)
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<ParallelContext>, Error> {
        ensure_len(self.input_dim(), x.len())?;

        let mut y = Array1::zeros(self.output_dim());
        let mut children = Vec::with_capacity(self.children.len());

        for (child, input, output) in self.blocks() {
            let solution = child.solve(x.slice(s![input.clone()]))?;
            ensure_len(output.len(), solution.y.len())?;
            y.slice_mut(s![output.clone()]).assign(&solution.y);
            children.push(solution.context);
        }

        Ok(Solution::new(y, ParallelContext { children }))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        context: &ParallelContext,
    ) -> Result<Array2<f64>, Error> {
        ensure_len(self.input_dim(), x.len())?;
        ensure_len(self.output_dim(), y.len())?;
        if context.children.len() != self.children.len() {
            return Err(Error::ContextMismatch);
        }

        let mut jacobian = Array2::zeros((self.output_dim(), self.input_dim()));

        for ((child, input, output), child_context) in self.blocks().zip(&context.children) {
            let block = child.jacobian(
                x.slice(s![input.clone()]),
                y.slice(s![output.clone()]),
                child_context,
            )?;
            ensure_len(output.len(), block.nrows())?;
            ensure_len(input.len(), block.ncols())?;
            jacobian
                .slice_mut(s![output.clone(), input.clone()])
                .assign(&block);
        }

        Ok(jacobian)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        SelectNode,
        check::gradient_error,
        test_nodes::{Cube, Failing, Mix, SumOfSquares},
    };

    fn mix_and_cube() -> ParallelNode {
        ParallelNode::new(vec![Mix.boxed(), Cube { dim: 3 }.boxed()]).unwrap()
    }

    #[test]
    fn dimensions_are_sums_of_children() {
        let parallel = mix_and_cube();

        assert_eq!(parallel.num_children(), 2);
        assert_eq!(parallel.input_dim(), 5);
        assert_eq!(parallel.output_dim(), 5);
        assert_eq!(parallel.input_range(0), Some(0..2));
        assert_eq!(parallel.input_range(1), Some(2..5));
        assert_eq!(parallel.input_range(2), None);
    }

    #[test]
    fn outputs_are_concatenated_in_order() {
        let parallel = ParallelNode::new(vec![
            SumOfSquares { dim: 2 }.boxed(),
            Cube { dim: 2 }.boxed(),
        ])
        .unwrap();
        let x = array![1.0, 2.0, 3.0, -1.0];

        let solution = parallel.solve(x.view()).unwrap();

        assert_eq!(solution.y, array![5.0, 27.0, -1.0]);
        assert_eq!(solution.context.children.len(), 2);
        assert_eq!(parallel.output_range(1), Some(1..3));
    }

    #[test]
    fn jacobian_is_block_diagonal() {
        let parallel = ParallelNode::new(vec![
            SumOfSquares { dim: 2 }.boxed(),
            Cube { dim: 2 }.boxed(),
        ])
        .unwrap();
        let x = array![1.0, 2.0, 3.0, -1.0];

        let jacobian = parallel.gradient(x.view(), None).unwrap();

        assert_eq!(
            jacobian,
            array![
                [2.0, 4.0, 0.0, 0.0],
                [0.0, 0.0, 27.0, 0.0],
                [0.0, 0.0, 0.0, 3.0],
            ]
        );
    }

    #[test]
    fn perturbing_one_slice_leaves_other_block_unchanged() {
        let parallel = mix_and_cube();
        let x = array![0.5, -0.3, 1.0, 2.0, -1.5];
        let mut perturbed = x.clone();
        perturbed[0] += 0.25;
        perturbed[1] -= 0.5;

        let before = parallel.solve(x.view()).unwrap();
        let after = parallel.solve(perturbed.view()).unwrap();
        assert_eq!(before.y.slice(s![2..]), after.y.slice(s![2..]));
        assert_ne!(before.y.slice(s![..2]), after.y.slice(s![..2]));

        let j_before = parallel.gradient(x.view(), Some(&before)).unwrap();
        let j_after = parallel.gradient(perturbed.view(), Some(&after)).unwrap();
        assert_eq!(j_before.slice(s![2.., 2..]), j_after.slice(s![2.., 2..]));
        assert_eq!(j_after.slice(s![2.., ..2]), Array2::<f64>::zeros((3, 2)));
        assert_eq!(j_after.slice(s![..2, 2..]), Array2::<f64>::zeros((2, 3)));
    }

    #[test]
    fn single_child_behaves_like_the_child() {
        let parallel = ParallelNode::new(vec![Mix.boxed()]).unwrap();
        let x = array![0.9, 1.7];

        assert_eq!(
            parallel.solve(x.view()).unwrap().y,
            Mix.solve(x.view()).unwrap().y
        );
        assert_eq!(
            parallel.gradient(x.view(), None).unwrap(),
            Mix.gradient(x.view(), None).unwrap()
        );
    }

    #[test]
    fn push_extends_dimensions() {
        let mut parallel = ParallelNode::new(vec![Mix.boxed()]).unwrap();
        parallel.push(SumOfSquares { dim: 4 }.boxed());

        assert_eq!(parallel.input_dim(), 6);
        assert_eq!(parallel.output_dim(), 3);
        assert_eq!(parallel.input_range(1), Some(2..6));
    }

    #[test]
    fn rejects_empty_children() {
        assert!(matches!(
            ParallelNode::new(Vec::new()),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn child_failure_propagates_unchanged() {
        let parallel = ParallelNode::new(vec![Mix.boxed(), Failing { dim: 1 }.boxed()]).unwrap();
        let x = array![1.0, 2.0, 3.0];

        let err = parallel.solve(x.view()).unwrap_err();

        assert!(matches!(err, Error::LeafSolve(_)));
    }

    #[test]
    fn rejects_context_from_another_node() {
        let parallel = mix_and_cube();
        let other = ParallelNode::new(vec![Mix.boxed()]).unwrap();
        let x = array![0.5, -0.3, 1.0, 2.0, -1.5];
        let y = parallel.solve(x.view()).unwrap().y;
        let foreign = other.solve(array![0.5, -0.3].view()).unwrap().context;

        assert!(matches!(
            parallel.jacobian(x.view(), y.view(), &foreign),
            Err(Error::ContextMismatch)
        ));
    }

    #[test]
    fn nested_network_matches_finite_differences() {
        let mut rng = StdRng::seed_from_u64(11);

        // Two branches on a 6-vector, each reduced to a scalar, then combined.
        let upper = SelectNode::new(3, 0, Some(1))
            .unwrap()
            .then(Mix)
            .unwrap()
            .then(SumOfSquares { dim: 2 })
            .unwrap();
        let lower = Cube { dim: 3 }.then(SumOfSquares { dim: 3 }).unwrap();
        let network = ParallelNode::new(vec![upper.boxed(), lower.boxed()])
            .unwrap()
            .then(Mix)
            .unwrap();

        assert_eq!(network.input_dim(), 6);
        assert_eq!(network.output_dim(), 2);

        for _ in 0..10 {
            let x = Array1::from_shape_fn(6, |_| rng.gen_range(-1.0..1.0));
            let error = gradient_error(&network, x.view(), 1e-6).unwrap();
            assert!(error < 1e-5, "relative error {error} at {x}");
        }
    }

    #[test]
    fn vjp_of_block_diagonal() {
        let parallel = mix_and_cube();
        let x = array![0.5, -0.3, 1.0, 2.0, -1.5];
        let v = array![1.0, 0.0, 0.0, 0.0, 0.0];

        let product = parallel.vjp(x.view(), None, v.view()).unwrap();

        assert_relative_eq!(product, array![-0.3, 0.5, 0.0, 0.0, 0.0]);
    }
}
