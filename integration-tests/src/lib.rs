//! Networks shared by the workspace's end-to-end tests.

use ddn_core::{BoxedNode, ComposedNode, Error, Node, ParallelNode, SelectNode};
use ddn_nodes::{Difference, Mean, Penalty, RobustAverage, SquaredError};

/// The two halves of a `2n` input, each reduced by its own mean.
pub struct Branches {
    pub upper: ComposedNode<SelectNode, Mean>,
    pub lower: ComposedNode<SelectNode, Mean>,
}

/// Builds the upper and lower mean branches over an input of length `2n`.
///
/// # Errors
///
/// Returns an error if `n` is zero.
pub fn mean_branches(n: usize) -> Result<Branches, Error> {
    if n == 0 {
        return Err(Error::InvalidConfig {
            reason: "branch length must be positive",
        });
    }

    let upper = SelectNode::new(2 * n, 0, Some(n - 1))?.then(Mean::new(n)?)?;
    let lower = SelectNode::new(2 * n, n, None)?.then(Mean::new(n)?)?;
    Ok(Branches { upper, lower })
}

/// How each half of the input is averaged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    Mean,
    Robust(Penalty),
}

impl Average {
    fn node(self, n: usize) -> Result<BoxedNode, Error> {
        Ok(match self {
            Self::Mean => Mean::new(n)?.boxed(),
            Self::Robust(penalty) => RobustAverage::new(n, penalty)?.boxed(),
        })
    }
}

/// The scalar loss `½(avg(x[..n]) − avg(x[n..]))²` over an input of length `2n`.
pub type GapLoss = ComposedNode<ComposedNode<ParallelNode, Difference>, SquaredError>;

/// Builds a network whose minimum is reached when both halves of the input
/// share the same average.
///
/// # Errors
///
/// Returns an error if `n` is zero or the penalty is invalid.
pub fn gap_loss(n: usize, average: Average) -> Result<GapLoss, Error> {
    let halves = ParallelNode::new(vec![average.node(n)?, average.node(n)?])?;
    halves.then(Difference)?.then(SquaredError::zeros(1)?)
}
