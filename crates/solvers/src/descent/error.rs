use crate::UnknownId;

/// Errors that can occur at the boundary of a descent solve.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("x0 has {found} entries but the function takes {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error(transparent)]
    UnknownId(#[from] UnknownId),
}
