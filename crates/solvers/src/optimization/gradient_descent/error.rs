/// Errors that can occur during gradient descent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("objective must be scalar, but the node has output dimension {output_dim}")]
    NotScalar { output_dim: usize },

    #[error("non-finite objective {objective} at the starting point")]
    NonFiniteObjective { objective: f64 },

    #[error("non-finite gradient at the starting point")]
    NonFiniteGradient,

    #[error("node error: {0}")]
    Node(#[from] ddn_core::Error),
}
