//! Reusable observers for declarative network optimizers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the optimizers in `ddn-solvers`.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasObjective`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`History`] records the objective reported by every event, giving the
//!   convergence curve of a run.
//! - [`StopBelow`] stops a run once the objective falls below a threshold.
//!
//! [`Observer`]: ddn_core::Observer
//! [`HasObjective`]: traits::HasObjective
//! [`CanStopEarly`]: traits::CanStopEarly

mod history;
mod stop;
pub mod traits;

pub use history::History;
pub use stop::StopBelow;
