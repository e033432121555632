//! Leaf nodes for declarative networks.
//!
//! Each node here implements [`ddn_core::Node`] directly and can be combined
//! with the composition operators in `ddn-core`:
//!
//! - [`Mean`] — the arithmetic mean of its input
//! - [`Difference`] — `a − b` for a two-element input
//! - [`SquaredError`] — `½‖x − target‖²`
//! - [`RobustAverage`] — the minimizer of a robust penalty over residuals,
//!   differentiated implicitly through its optimality condition

mod difference;
mod mean;
mod squared_error;

pub mod robust;

pub use difference::Difference;
pub use mean::Mean;
pub use robust::{Penalty, RobustAverage};
pub use squared_error::SquaredError;
