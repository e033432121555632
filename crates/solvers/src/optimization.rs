//! Solvers that minimize the scalar output of a network over its input.
//!
//! # Solvers
//!
//! - [`gradient_descent`] — steepest descent with a backtracking line search

mod evaluate;

pub use evaluate::{Evaluation, evaluate};
pub(crate) use evaluate::{differentiate, scalar_output};

pub mod gradient_descent;
