use thiserror::Error;

/// Ways a [`RobustAverage`](super::RobustAverage) can fail to solve or
/// differentiate its problem.
///
/// These reach callers wrapped in [`ddn_core::Error::LeafSolve`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RobustError {
    #[error("no starting point converged within {max_iters} iterations")]
    NotConverged { max_iters: usize },

    #[error("reweighting produced a non-finite estimate")]
    NonFinite,

    #[error("total curvature {total} at y = {y} is not positive")]
    DegenerateCurvature { y: f64, total: f64 },
}
