//! Error types for statistical operations.

use std::fmt;

/// Result type for statistics operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that can occur during statistical operations.
#[derive(Debug, Clone)]
pub enum StatsError {
    /// Invalid parameter value for a distribution or test.
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    /// Input data is empty when non-empty data is required.
    EmptyData { context: String },

    /// Input data has insufficient length.
    InsufficientData {
        required: usize,
        got: usize,
        context: String,
    },

    /// Probability value out of range [0, 1].
    InvalidProbability { value: f64 },

    /// Mismatched sample lengths.
    LengthMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    /// Sample carries no information for the statistic (e.g. zero variance).
    DegenerateData { context: String },

    /// Numerical computation failed.
    NumericalError { message: String },

    /// Writing a rendered figure failed.
    Io { path: String, message: String },

    /// Figure specification could not be serialized.
    Serialization { message: String },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "Invalid parameter '{}' = {}: {}", name, value, reason),
            Self::EmptyData { context } => write!(f, "{}: sample is empty", context),
            Self::InsufficientData {
                required,
                got,
                context,
            } => write!(
                f,
                "{}: needs at least {} observations, got {}",
                context, required, got
            ),
            Self::InvalidProbability { value } => {
                write!(f, "Invalid probability {}: must be in [0, 1]", value)
            }
            Self::LengthMismatch {
                expected,
                got,
                context,
            } => write!(
                f,
                "{}: samples must be paired, lengths {} and {}",
                context, expected, got
            ),
            Self::DegenerateData { context } => write!(f, "Degenerate data in {}", context),
            Self::NumericalError { message } => write!(f, "Numerical error: {}", message),
            Self::Io { path, message } => write!(f, "Failed to write {}: {}", path, message),
            Self::Serialization { message } => {
                write!(f, "Figure serialization failed: {}", message)
            }
        }
    }
}

impl std::error::Error for StatsError {}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Require at least `required` observations.
pub(crate) fn ensure_len(got: usize, required: usize, context: &str) -> StatsResult<()> {
    if got == 0 && required > 0 {
        return Err(StatsError::EmptyData {
            context: context.to_string(),
        });
    }
    if got < required {
        return Err(StatsError::InsufficientData {
            required,
            got,
            context: context.to_string(),
        });
    }
    Ok(())
}

/// Require two samples of equal length.
pub(crate) fn ensure_same_len(a: &[f64], b: &[f64], context: &str) -> StatsResult<()> {
    if a.len() != b.len() {
        return Err(StatsError::LengthMismatch {
            expected: a.len(),
            got: b.len(),
            context: context.to_string(),
        });
    }
    Ok(())
}
