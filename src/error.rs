use thiserror::Error;

/// Errors raised by the shape utilities and the model contract.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Input is not a non-empty matrix (no rows, empty first row, or not a sequence of sequences).
    #[error("input must be a matrix: {0}")]
    InvalidType(String),

    /// A row whose length differs from the first row.
    #[error("input must have the same length in each row: expected {expected} columns, row {row} has {found}")]
    RaggedRow {
        expected: usize,
        row: usize,
        found: usize,
    },

    /// A flat buffer that cannot be laid out as the requested shape.
    #[error("invalid shape ({rows}, {cols}) for input of length {len}")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    /// Two matrices whose dimensions must agree but do not.
    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{0} method is not implemented")]
    NotImplemented(&'static str),

    #[error("model has not been trained")]
    Untrained,

    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl ModelError {
    /// True for every variant that reports a shape problem.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            ModelError::RaggedRow { .. }
                | ModelError::ShapeMismatch { .. }
                | ModelError::DimensionMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
