use ddn_core::Observer;

use crate::traits::{CanStopEarly, HasObjective};

/// Stops a run once the objective drops below `threshold`.
///
/// Events with a non-finite objective never trigger a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopBelow {
    pub threshold: f64,
}

impl StopBelow {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl<E: HasObjective, A: CanStopEarly> Observer<E, A> for StopBelow {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.objective() < self.threshold).then(A::stop_early)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ddn_nodes::SquaredError;
    use ddn_solvers::optimization::gradient_descent::{self, Config, LineSearch, Status};
    use ndarray::array;

    #[test]
    fn stops_once_objective_is_small() {
        let loss = SquaredError::new(array![2.0]).unwrap();
        // Halving the residual each step quarters the objective: 2, 0.5, 0.125, ...
        let config =
            Config::default().with_line_search(LineSearch::new(0.5, 0.5, 1e-4, 1e-12).unwrap());

        let solution =
            gradient_descent::minimize(&loss, array![0.0], &config, StopBelow::new(0.2)).unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.iters, 2);
        assert_relative_eq!(solution.objective, 0.125);
    }

    #[test]
    fn never_stops_on_nan() {
        struct Nan;

        impl HasObjective for Nan {
            fn objective(&self) -> f64 {
                f64::NAN
            }
        }

        #[derive(Debug)]
        struct Halt;

        impl CanStopEarly for Halt {
            fn stop_early() -> Self {
                Halt
            }
        }

        let mut stop = StopBelow::new(1.0);
        let action: Option<Halt> = stop.observe(&Nan);

        assert!(action.is_none());
    }
}
