use ddn_core::{Error, Node, Solution, ensure_len};
use ndarray::{Array2, ArrayView1, array};

/// The arithmetic mean of an `n`-vector.
///
/// This is the solution of `min_y Σ ½(y − x_i)²`, whose Jacobian is the
/// constant row `[1/n, …, 1/n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mean {
    dim: usize,
}

impl Mean {
    /// Creates a mean over inputs of length `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `dim` is zero.
    pub fn new(dim: usize) -> Result<Self, Error> {
        if dim == 0 {
            return Err(Error::InvalidConfig {
                reason: "input dimension must be positive",
            });
        }
        Ok(Self { dim })
    }
}

impl Node for Mean {
    type Context = ();

    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        1
    }

    #[allow(clippy::cast_precision_loss)]
    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
        ensure_len(self.dim, x.len())?;
        Ok(Solution::new(array![x.sum() / self.dim as f64], ()))
    }

    #[allow(clippy::cast_precision_loss)]
    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        _context: &(),
    ) -> Result<Array2<f64>, Error> {
        ensure_len(self.dim, x.len())?;
        ensure_len(1, y.len())?;
        Ok(Array2::from_elem((1, self.dim), 1.0 / self.dim as f64))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn averages_input() {
        let mean = Mean::new(4).unwrap();
        let x = array![1.0, 2.0, 3.0, 6.0];

        let solution = mean.solve(x.view()).unwrap();

        assert_relative_eq!(solution.y[0], 3.0);
    }

    #[test]
    fn gradient_is_uniform_row() {
        let mean = Mean::new(4).unwrap();
        let x = array![1.0, 2.0, 3.0, 6.0];

        let jacobian = mean.gradient(x.view(), None).unwrap();

        assert_eq!(jacobian, array![[0.25, 0.25, 0.25, 0.25]]);
    }

    #[test]
    fn rejects_zero_dimension() {
        assert!(matches!(Mean::new(0), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_wrong_length() {
        let mean = Mean::new(3).unwrap();

        assert!(matches!(
            mean.solve(array![1.0, 2.0].view()),
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
