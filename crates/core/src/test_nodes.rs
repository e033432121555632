//! Small analytic nodes shared by unit tests.

use ndarray::{Array2, ArrayView1, Axis, array};

use crate::{Error, Node, Solution, ensure_len};

/// Elementwise `y_i = x_i³`.
pub(crate) struct Cube {
    pub(crate) dim: usize,
}

impl Node for Cube {
    type Context = ();

    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        self.dim
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
        ensure_len(self.dim, x.len())?;
        Ok(Solution::new(x.mapv(|v| v.powi(3)), ()))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        _y: ArrayView1<'_, f64>,
        _context: &(),
    ) -> Result<Array2<f64>, Error> {
        ensure_len(self.dim, x.len())?;
        Ok(Array2::from_diag(&x.mapv(|v| 3.0 * v * v)))
    }
}

/// `y = [x₀·x₁, sin(x₀) + x₁]`.
pub(crate) struct Mix;

impl Node for Mix {
    type Context = ();

    fn input_dim(&self) -> usize {
        2
    }

    fn output_dim(&self) -> usize {
        2
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
        ensure_len(2, x.len())?;
        Ok(Solution::new(array![x[0] * x[1], x[0].sin() + x[1]], ()))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        _y: ArrayView1<'_, f64>,
        _context: &(),
    ) -> Result<Array2<f64>, Error> {
        ensure_len(2, x.len())?;
        Ok(array![[x[1], x[0]], [x[0].cos(), 1.0]])
    }
}

/// `y = Σ x_i²`.
pub(crate) struct SumOfSquares {
    pub(crate) dim: usize,
}

impl Node for SumOfSquares {
    type Context = ();

    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
        ensure_len(self.dim, x.len())?;
        Ok(Solution::new(array![x.dot(&x)], ()))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        _y: ArrayView1<'_, f64>,
        _context: &(),
    ) -> Result<Array2<f64>, Error> {
        ensure_len(self.dim, x.len())?;
        Ok(x.mapv(|v| 2.0 * v).insert_axis(Axis(0)))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("the leaf gave up")]
pub(crate) struct GaveUp;

/// Always fails with a leaf error.
pub(crate) struct Failing {
    pub(crate) dim: usize,
}

impl Node for Failing {
    type Context = ();

    fn input_dim(&self) -> usize {
        self.dim
    }

    fn output_dim(&self) -> usize {
        self.dim
    }

    fn solve(&self, _x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
        Err(Error::leaf(GaveUp))
    }

    fn jacobian(
        &self,
        _x: ArrayView1<'_, f64>,
        _y: ArrayView1<'_, f64>,
        _context: &(),
    ) -> Result<Array2<f64>, Error> {
        Err(Error::leaf(GaveUp))
    }
}
