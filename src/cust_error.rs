//! This module contains all custom errors used in this library.
//!
//! A missing solution is never an error: solvers return `Ok(None)` for "no feedback vertex set of
//! size at most `k`". `ProcessingError::InvariantViolation` marks a defect in a reduction rule or
//! in the branching and must not be swallowed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import: IoError")]
    IoError(#[from] std::io::Error),
    #[error("Import: Input is malformed.")]
    InputMalformedError,
    #[error("Import: Integer is malformed.")]
    BadIntError(#[from] std::num::ParseIntError),
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Graph error: {0}")]
    GraphError(String),
    /// A solver reached a state its reductions should have ruled out.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
    #[error("InvalidSolution: {0}")]
    InvalidSolution(String),
}
