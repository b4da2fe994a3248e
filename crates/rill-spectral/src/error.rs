//! Error type for plan construction.

use std::error::Error;
use std::fmt;

/// Errors from building a transform or tridiagonal plan.
///
/// Plans validate their geometry once at construction; execution itself is
/// infallible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// The signal / system length is below the kernel's minimum.
    TooShort {
        /// Requested length.
        nitems: usize,
        /// Minimum accepted length.
        minimum: usize,
    },
    /// The real Fourier transform needs an even signal length.
    OddLength {
        /// Requested length.
        nitems: usize,
    },
    /// Zero batches requested.
    EmptyBatch,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { nitems, minimum } => {
                write!(f, "length {nitems} is too small, give at least {minimum}")
            }
            Self::OddLength { nitems } => {
                write!(f, "signal length {nitems} should be a multiple of 2")
            }
            Self::EmptyBatch => write!(f, "batch count must be at least 1"),
        }
    }
}

impl Error for PlanError {}
