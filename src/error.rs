use std::{fmt, io, result};
use thiserror::Error;

/// A type alias for `Result<T, vector_bench::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// The error type for benchmark runs.
#[derive(Error, Debug)]
pub enum Error {
    /// Two sequences that should correspond have different lengths
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Length of the reference sequence
        expected: usize,
        /// Length of the sequence under test
        actual: usize,
    },

    /// Vectorized and scalar results disagree
    #[error("value mismatch at index {index}: expected {expected}, got {actual}")]
    ValueMismatch {
        /// First index where the sequences differ
        index: usize,
        /// Reference value at `index`
        expected: String,
        /// Value under test at `index`
        actual: String,
    },

    /// An integer divisor was zero
    #[error("division by zero: {operand}[{index}] is zero")]
    DivideByZero {
        /// Name of the operand array holding the zero divisor
        operand: &'static str,
        /// Index of the zero divisor
        index: usize,
    },

    /// A failure inside one benchmark case, annotated with where it happened
    #[error("{case} aborted during {phase}: {source}")]
    Case {
        /// Label of the case's timing node
        case: String,
        /// Phase that was running when the failure surfaced
        phase: String,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Invalid argument provided
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Creates a new invalid argument error
    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Creates a new serialization error
    pub fn serialization<T: fmt::Display>(msg: T) -> Self {
        Error::Serialization(msg.to_string())
    }

    /// Wraps this error with the case label and phase it escaped from
    pub fn in_case(self, case: impl Into<String>, phase: impl fmt::Display) -> Self {
        Error::Case {
            case: case.into(),
            phase: phase.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through any case context
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Case { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
