use thiserror::Error;

/// Errors that can occur while building a test from its input tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    // Input validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty input: {field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("Unsupported dimensionality: {ndim}-D input (expected a 1-D or 2-D table)")]
    TooManyDimensions { ndim: usize },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatchMsg(String),

    #[error("Insufficient data: {0}")]
    InsufficientDataMsg(String),

    #[error("Invalid value in {field}: {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    // Numerical errors
    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl StatsError {
    /// Whether the error was caused by the caller's input rather than the
    /// distribution provider.
    pub fn is_validation(&self) -> bool {
        !matches!(self, StatsError::Distribution(_))
    }
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
