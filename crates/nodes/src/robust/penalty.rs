/// A penalty function `φ(z; α)` applied to residuals `z = y − x_i`.
///
/// Every penalty is even, has its minimum at `z = 0`, and is quadratic near
/// the origin. `α` sets the scale beyond which residuals are treated as
/// outliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Penalty {
    /// `½z²`, whose minimizer is the mean.
    Quadratic,

    /// `α²(√(1 + (z/α)²) − 1)`, a smooth approximation of the Huber penalty.
    PseudoHuber { alpha: f64 },

    /// `½z²` for `|z| ≤ α`, otherwise `α(|z| − ½α)`.
    Huber { alpha: f64 },

    /// `1 − exp(−z²/(2α²))`, bounded and non-convex.
    Welsch { alpha: f64 },

    /// `½z²` for `|z| ≤ α`, otherwise `½α²`. Non-convex.
    TruncatedQuadratic { alpha: f64 },
}

impl Penalty {
    /// Checks that the scale parameter is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns a static reason when `α` is invalid.
    pub fn validate(&self) -> Result<(), &'static str> {
        match self.alpha() {
            Some(alpha) if !alpha.is_finite() || alpha <= 0.0 => {
                Err("penalty alpha must be finite and positive")
            }
            _ => Ok(()),
        }
    }

    /// The scale parameter, if the penalty has one.
    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        match *self {
            Self::Quadratic => None,
            Self::PseudoHuber { alpha }
            | Self::Huber { alpha }
            | Self::Welsch { alpha }
            | Self::TruncatedQuadratic { alpha } => Some(alpha),
        }
    }

    /// Whether the penalty is convex, so any local minimum is global.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        matches!(
            self,
            Self::Quadratic | Self::PseudoHuber { .. } | Self::Huber { .. }
        )
    }

    /// `φ(z)`.
    #[must_use]
    pub fn value(&self, z: f64) -> f64 {
        match *self {
            Self::Quadratic => 0.5 * z * z,
            Self::PseudoHuber { alpha } => {
                alpha * alpha * ((1.0 + (z / alpha).powi(2)).sqrt() - 1.0)
            }
            Self::Huber { alpha } => {
                if z.abs() <= alpha {
                    0.5 * z * z
                } else {
                    alpha * (z.abs() - 0.5 * alpha)
                }
            }
            Self::Welsch { alpha } => 1.0 - (-0.5 * (z / alpha).powi(2)).exp(),
            Self::TruncatedQuadratic { alpha } => 0.5 * z.abs().min(alpha).powi(2),
        }
    }

    /// `φ'(z)`.
    #[must_use]
    pub fn derivative(&self, z: f64) -> f64 {
        match *self {
            Self::Quadratic => z,
            Self::PseudoHuber { alpha } => z / (1.0 + (z / alpha).powi(2)).sqrt(),
            Self::Huber { alpha } => z.clamp(-alpha, alpha),
            Self::Welsch { alpha } => z / (alpha * alpha) * (-0.5 * (z / alpha).powi(2)).exp(),
            Self::TruncatedQuadratic { alpha } => {
                if z.abs() <= alpha {
                    z
                } else {
                    0.0
                }
            }
        }
    }

    /// `φ''(z)`, taking the inner branch at the kinks `|z| = α`.
    #[must_use]
    pub fn curvature(&self, z: f64) -> f64 {
        match *self {
            Self::Quadratic => 1.0,
            Self::PseudoHuber { alpha } => (1.0 + (z / alpha).powi(2)).powf(-1.5),
            Self::Huber { alpha } | Self::TruncatedQuadratic { alpha } => {
                if z.abs() <= alpha {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Welsch { alpha } => {
                let r2 = (z / alpha).powi(2);
                (1.0 - r2) / (alpha * alpha) * (-0.5 * r2).exp()
            }
        }
    }

    /// Reweighting factor `φ'(z) / z`, extended continuously to `z = 0`.
    pub(super) fn weight(&self, z: f64) -> f64 {
        match *self {
            Self::Quadratic => 1.0,
            Self::PseudoHuber { alpha } => 1.0 / (1.0 + (z / alpha).powi(2)).sqrt(),
            Self::Huber { alpha } => {
                if z.abs() <= alpha {
                    1.0
                } else {
                    alpha / z.abs()
                }
            }
            Self::Welsch { alpha } => (-0.5 * (z / alpha).powi(2)).exp() / (alpha * alpha),
            Self::TruncatedQuadratic { alpha } => {
                if z.abs() <= alpha {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}
