//! `error` gathers every failure a tensor operation can report.
//!
//! Singular matrices are deliberately absent: the `linalg` routines
//! report them through their integer status, the way LAPACK does.

/// All errors raised by `strata`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Ranks, extents or element counts are incompatible.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    /// An index or a region exceeds the extents it is applied to.
    #[error("index {index:?} is out of bounds for shape {shape:?}")]
    OutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    /// An axis permutation has the wrong length or is not a bijection.
    #[error("invalid permutation {permutation:?} for a tensor of rank {rank}")]
    InvalidPermutation { permutation: Vec<usize>, rank: usize },

    /// Malformed argument that does not fit any of the cases above.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
