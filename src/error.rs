use std::fmt;

/// Error types for the simplex optimizer
#[derive(Debug, Clone, PartialEq)]
pub enum MinimizerError {
    FunctionEvaluationError,
    InvalidDimension,
    InvalidInitialSimplex,
    InvalidParameters(String),
    InvalidTolerance,
    OutputError(String),
}

impl fmt::Display for MinimizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MinimizerError::FunctionEvaluationError => {
                write!(f, "Function evaluation returned invalid value")
            }
            MinimizerError::InvalidDimension => {
                write!(f, "Invalid dimension: number of variables must be at least 1")
            }
            MinimizerError::InvalidInitialSimplex => {
                write!(
                    f,
                    "Invalid initial simplex: expected n+1 finite points of n coordinates"
                )
            }
            MinimizerError::InvalidParameters(msg) => {
                write!(f, "Invalid parameters: {}", msg)
            }
            MinimizerError::InvalidTolerance => {
                write!(f, "Tolerance must be positive and finite")
            }
            MinimizerError::OutputError(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for MinimizerError {}

impl From<std::io::Error> for MinimizerError {
    fn from(err: std::io::Error) -> Self {
        MinimizerError::OutputError(err.to_string())
    }
}
