use ddn_core::{Error, Node, Solution, ensure_len};
use ndarray::{Array2, ArrayView1, array};

/// The difference `a − b` of a two-element input `[a, b]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Difference;

impl Node for Difference {
    type Context = ();

    fn input_dim(&self) -> usize {
        2
    }

    fn output_dim(&self) -> usize {
        1
    }

    fn solve(&self, x: ArrayView1<'_, f64>) -> Result<Solution<()>, Error> {
        ensure_len(2, x.len())?;
        Ok(Solution::new(array![x[0] - x[1]], ()))
    }

    fn jacobian(
        &self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        _context: &(),
    ) -> Result<Array2<f64>, Error> {
        ensure_len(2, x.len())?;
        ensure_len(1, y.len())?;
        Ok(array![[1.0, -1.0]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtracts_second_from_first() {
        let x = array![5.0, 3.5];

        assert_eq!(Difference.solve(x.view()).unwrap().y, array![1.5]);
        assert_eq!(
            Difference.gradient(x.view(), None).unwrap(),
            array![[1.0, -1.0]]
        );
    }
}
