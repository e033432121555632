//! Core traits and types for composing deep declarative nodes.
//!
//! A declarative node maps an input vector to the solution of some problem
//! parametrized by that input, and can report the Jacobian of that solution
//! with respect to the input. This crate defines the shared contract and the
//! operators that build larger nodes out of smaller ones:
//!
//! - [`Node`] — the uniform `solve` / `gradient` contract
//! - [`ComposedNode`] — sequential composition, chaining Jacobians
//! - [`ParallelNode`] — concatenation over disjoint input slices, assembling
//!   a block-diagonal Jacobian
//! - [`SelectNode`] — a linear projection onto a contiguous sub-vector
//! - [`Observer`] — receives solver events and optionally returns control actions
//!
//! Every composite is itself a [`Node`], so networks nest without limit.

pub mod check;

mod boxed;
mod composed;
mod error;
mod node;
mod observer;
mod parallel;
mod select;

#[cfg(test)]
mod test_nodes;

pub use boxed::{BoxedContext, BoxedNode};
pub use composed::{ComposedContext, ComposedNode};
pub use error::Error;
pub use node::{Node, Solution, ensure_len};
pub use observer::Observer;
pub use parallel::{ParallelContext, ParallelNode};
pub use select::SelectNode;
