use ddn_core::Observer;

use crate::traits::HasObjective;

/// Records the objective of every observed event.
///
/// Never requests an action. Pass `&mut history` as the observer to keep
/// access to the recorded values after the run:
///
/// ```
/// use ddn_nodes::SquaredError;
/// use ddn_observers::History;
/// use ddn_solvers::optimization::gradient_descent::{self, Config};
/// use ndarray::array;
///
/// let loss = SquaredError::new(array![1.0, 2.0]).unwrap();
/// let mut history = History::new();
///
/// gradient_descent::minimize(&loss, array![0.0, 0.0], &Config::default(), &mut history)
///     .unwrap();
///
/// assert!(!history.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    values: Vec<f64>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded objectives, in event order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The most recently recorded objective.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if no recorded objective exceeds the one before it.
    #[must_use]
    pub fn is_non_increasing(&self) -> bool {
        self.values.windows(2).all(|pair| pair[1] <= pair[0])
    }

    /// Consumes the history, returning the recorded objectives.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl<E: HasObjective, A> Observer<E, A> for History {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.values.push(event.objective());
        None
    }
}

impl<E: HasObjective, A> Observer<E, A> for &mut History {
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
