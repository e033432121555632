//! Optimizers for declarative networks.
//!
//! A network whose root node produces a scalar can be minimized over its
//! input vector. The optimizers here only use the [`Node`] contract: they call
//! `solve` for the objective and `gradient` for its row-vector Jacobian, and
//! know nothing about how the network is built.
//!
//! [`Node`]: ddn_core::Node

pub mod optimization;
