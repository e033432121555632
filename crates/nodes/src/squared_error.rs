use ddn_core::{Error, Node, Solution, ensure_len};
use ndarray::{Array1, Array2, ArrayView1, Axis, array};

/// Half the squared distance to a fixed target, `½‖x − target‖²`.
///
/// With a zero target this is the usual terminal loss that reduces a vector
/// (often a single residual) to a scalar for minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct SquaredError {
    target: Array1<f64>,
}

impl SquaredError {
    /// Creates a squared error against `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `target` is empty.
    pub fn new(target: Array1<f64>) -> Result<Self, Error> {
        if target.is_empty() {
            return Err(Error::InvalidConfig {
                reason: "target must not be empty",
            });
        }
        Ok(Self { target })
    }

    /// Creates a squared error against the zero vector of length `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `dim` is zero.
    pub fn zeros(dim: usize) -> Result<Self, Error> {
        Self::new(Array1::zeros(dim))
    }

    /// The target vector.
    #[must_use]
    pub fn target(&self) -> &Array1<f64> {
        &self.target
    }
}

impl Node for SquaredError {
    type Context = ();

    fn input_dim(&self) -> usize {
        self.target.len()
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
        ensure_len(self.input_dim(), x.len())?;
        let residual = &x - &self.target;
        Ok(Solution::new(array![0.5 * residual.dot(&residual)], ()))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        _context: &(),
    ) -> Result<Array2<f64>, Error> {
        ensure_len(self.input_dim(), x.len())?;
        ensure_len(1, y.len())?;
        Ok((&x - &self.target).insert_axis(Axis(0)))
    }
}
