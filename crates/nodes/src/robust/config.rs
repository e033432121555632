use thiserror::Error;

/// Configuration for the reweighting solve inside [`RobustAverage`].
///
/// [`RobustAverage`]: super::RobustAverage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobustConfig {
    max_iters: usize,
    tol: f64,
}

/// Errors that can occur when validating a [`RobustConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iters must be positive")]
    MaxIters,

    #[error("tol must be finite and positive")]
    Tol,
}

impl Default for RobustConfig {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            tol: 1e-12,
        }
    }
}

impl RobustConfig {
    /// Creates a new config.
    ///
    /// The solve stops once successive estimates differ by at most
    /// `tol · (1 + |y|)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or `tol` is not finite and positive.
    pub fn new(max_iters: usize, tol: f64) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ConfigError::Tol);
        }
        Ok(Self { max_iters, tol })
    }

    /// Returns the iteration limit for each starting point.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the relative step tolerance.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }
}
