use ndarray::{Array2, ArrayView1, s};

use crate::{Error, Node, Solution, ensure_len};

/// Selects a contiguous sub-vector of its input.
///
/// `SelectNode` solves no problem: it is the linear projection
/// `y = x[start..=end]`, used to route parts of a shared input vector to
/// different branches of a network. Its Jacobian is the 0/1 selection matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectNode {
    len: usize,
    start: usize,
    end: usize,
}

impl SelectNode {
    /// Creates a node selecting `x[start..=end]` from an input of length `len`.
    ///
    /// An `end` of `None` selects through the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelection`] unless `start <= end < len`.
    pub fn new(len: usize, start: usize, end: Option<usize>) -> Result<Self, Error> {
        let end = end.unwrap_or_else(|| len.saturating_sub(1));
        if len == 0 || start > end || end >= len {
            return Err(Error::InvalidSelection { start, end, len });
        }
        Ok(Self { len, start, end })
    }

    /// Index of the first selected element.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the last selected element (inclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }
}

impl Node for SelectNode {
    type Context = ();

    fn input_dim(&self) -> usize {
        self.len
    }

    fn output_dim(&self) -> usize {
        self.end - self.start + 1
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
        ensure_len(self.len, x.len())?;
        Ok(Solution::new(
            x.slice(s![self.start..=self.end]).to_owned(),
            (),
        ))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        _context: &(),
    ) -> Result<Array2<f64>, Error> {
        ensure_len(self.len, x.len())?;
        ensure_len(self.output_dim(), y.len())?;

        let mut jacobian = Array2::zeros((self.output_dim(), self.len));
        for row in 0..self.output_dim() {
            jacobian[[row, self.start + row]] = 1.0;
        }
        Ok(jacobian)
    }
}
