use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the matrix engine, the network and the data loaders.
///
/// `ShapeMismatch` and `UninitializedState` are caller contract violations:
/// they abort the operation before anything is mutated and are never worth
/// retrying. The remaining variants come from the outer I/O surface.
#[derive(Error, Debug)]
pub enum Error {
    /// Operand dimensions are incompatible with the requested operation.
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A matrix or network lacks the backing storage an operation needs.
    #[error("uninitialized state: {0}")]
    UninitializedState(String),

    /// A construction parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A dataset record could not be parsed.
    #[error("dataset error at line {line}: {message}")]
    Dataset { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn shape(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Error {
        Error::ShapeMismatch { op, left, right }
    }

    /// True for programmer errors (bad shapes, missing storage).
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::ShapeMismatch { .. } | Error::UninitializedState(_))
    }
}
