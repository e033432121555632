use ndarray::ArrayView1;

/// Emitted by the gradient descent solver after each accepted step.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Iteration counter, starting at 1.
    pub iter: usize,

    /// The new point.
    pub x: ArrayView1<'a, f64>,

    /// Objective at the new point.
    pub objective: f64,

    /// Gradient at the new point.
    pub gradient: ArrayView1<'a, f64>,

    /// Step length accepted by the line search.
    pub step: f64,
}
