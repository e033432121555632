use thiserror::Error;

/// Configuration for the gradient descent solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    gradient_tol: f64,
    objective_tol: f64,
    line_search: LineSearch,
}

/// Backtracking line search parameters.
///
/// Each iteration tries `initial_step`, multiplying the step by `shrink`
/// until the Armijo condition
/// `f(x − t·g) ≤ f(x) − sufficient_decrease · t · ‖g‖²` holds or the step
/// falls below `min_step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearch {
    initial_step: f64,
    shrink: f64,
    sufficient_decrease: f64,
    min_step: f64,
}

/// Errors that can occur when validating a gradient descent config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("gradient_tol must be finite and non-negative")]
    GradientTol,

    #[error("objective_tol must be finite and non-negative")]
    ObjectiveTol,

    #[error("initial_step must be finite and positive")]
    InitialStep,

    #[error("shrink must lie strictly between 0 and 1")]
    Shrink,

    #[error("sufficient_decrease must lie strictly between 0 and 1")]
    SufficientDecrease,

    #[error("min_step must be positive and no larger than initial_step")]
    MinStep,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            gradient_tol: 1e-10,
            objective_tol: 1e-14,
            line_search: LineSearch::default(),
        }
    }
}

impl Config {
    /// Creates a new config with the default line search.
    ///
    /// The solver converges when the largest gradient component is at most
    /// `gradient_tol`, or when an accepted step lowers the objective by at
    /// most `objective_tol · (1 + |f|)`.
    ///
    /// # Errors
    ///
    /// Returns an error if either tolerance is negative or non-finite.
    pub fn new(
        max_iters: usize,
        gradient_tol: f64,
        objective_tol: f64,
    ) -> Result<Self, ConfigError> {
        if !gradient_tol.is_finite() || gradient_tol < 0.0 {
            return Err(ConfigError::GradientTol);
        }
        if !objective_tol.is_finite() || objective_tol < 0.0 {
            return Err(ConfigError::ObjectiveTol);
        }

        Ok(Self {
            max_iters,
            gradient_tol,
            objective_tol,
            line_search: LineSearch::default(),
        })
    }

    /// Replaces the line search parameters.
    #[must_use]
    pub fn with_line_search(self, line_search: LineSearch) -> Self {
        Self {
            line_search,
            ..self
        }
    }

    /// Returns the maximum number of accepted steps.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the gradient convergence tolerance (infinity norm).
    #[must_use]
    pub fn gradient_tol(&self) -> f64 {
        self.gradient_tol
    }

    /// Returns the relative objective decrease tolerance.
    #[must_use]
    pub fn objective_tol(&self) -> f64 {
        self.objective_tol
    }

    /// Returns the line search parameters.
    #[must_use]
    pub fn line_search(&self) -> &LineSearch {
        &self.line_search
    }
}

impl Default for LineSearch {
    fn default() -> Self {
        Self {
            initial_step: 1.0,
            shrink: 0.5,
            sufficient_decrease: 1e-4,
            min_step: 1e-16,
        }
    }
}

impl LineSearch {
    /// Creates validated line search parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn new(
        initial_step: f64,
        shrink: f64,
        sufficient_decrease: f64,
        min_step: f64,
    ) -> Result<Self, ConfigError> {
        if !initial_step.is_finite() || initial_step <= 0.0 {
            return Err(ConfigError::InitialStep);
        }
        if !(shrink > 0.0 && shrink < 1.0) {
            return Err(ConfigError::Shrink);
        }
        if !(sufficient_decrease > 0.0 && sufficient_decrease < 1.0) {
            return Err(ConfigError::SufficientDecrease);
        }
        if !(min_step > 0.0 && min_step <= initial_step) {
            return Err(ConfigError::MinStep);
        }

        Ok(Self {
            initial_step,
            shrink,
            sufficient_decrease,
            min_step,
        })
    }

    /// Returns the first step length tried in each iteration.
    #[must_use]
    pub fn initial_step(&self) -> f64 {
        self.initial_step
    }

    /// Returns the factor applied to a rejected step.
    #[must_use]
    pub fn shrink(&self) -> f64 {
        self.shrink
    }

    /// Returns the Armijo constant.
    #[must_use]
    pub fn sufficient_decrease(&self) -> f64 {
        self.sufficient_decrease
    }

    /// Returns the smallest step tried before giving up.
    #[must_use]
    pub fn min_step(&self) -> f64 {
        self.min_step
    }
}
