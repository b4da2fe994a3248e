//! Error types for the integration pipeline.

use std::error::Error;
use std::fmt;

use rill_core::BoundaryError;

/// The pipeline stage that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Explicit predictor update.
    Predict,
    /// Spectral pressure-correction solve.
    SolvePoisson,
    /// Velocity projection.
    Correct,
    /// Pressure accumulation.
    UpdatePressure,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predict => write!(f, "predict"),
            Self::SolvePoisson => write!(f, "solve_poisson"),
            Self::Correct => write!(f, "correct"),
            Self::UpdatePressure => write!(f, "update_pressure"),
        }
    }
}

/// A failed integration step.
///
/// The step is aborted at the failing stage with no rollback: the scratch
/// fields may hold partial results and the caller must treat the run as
/// terminated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A stage's boundary application failed.
    StageFailed {
        /// Which stage failed.
        stage: Stage,
        /// The underlying boundary error.
        reason: BoundaryError,
    },
}

impl StepError {
    pub(crate) fn at(stage: Stage) -> impl FnOnce(BoundaryError) -> Self {
        move |reason| Self::StageFailed { stage, reason }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StageFailed { stage, reason } => {
                write!(f, "stage '{stage}' failed: {reason}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StageFailed { reason, .. } => Some(reason),
        }
    }
}
