use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlignError>;

#[derive(Debug, Error)]
pub enum AlignError {
    /// Empty sequence, zero length or zero thread count
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The score matrix could not be sized or reserved
    #[error("failed to allocate a {rows}x{cols} score matrix")]
    AllocationFailure { rows: usize, cols: usize },

    /// `step` is the diagonal in wavefront mode and the row in row-major mode
    #[error("alignment cancelled at step {step}")]
    Cancelled { step: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl AlignError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AlignError::InvalidInput(msg.into())
    }
}
