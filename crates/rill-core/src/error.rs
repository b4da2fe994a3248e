//! Error types for domain construction and boundary application.

use std::error::Error;
use std::fmt;

use crate::domain::Axis;

/// Errors from [`Domain`](crate::Domain) construction.
///
/// All of these are caller errors: the solver fails fast at startup and
/// never attempts recovery.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// An axis has fewer cells than the solver can handle.
    TooFewCells {
        /// The offending axis.
        axis: Axis,
        /// Requested cell count.
        value: usize,
        /// Minimum accepted cell count.
        minimum: usize,
    },
    /// A periodic x axis requires an even cell count (the real Fourier
    /// transform halves the signal).
    OddPeriodicLength {
        /// Requested cell count.
        value: usize,
    },
    /// A domain extent is zero or negative.
    NonPositiveExtent {
        /// The offending axis.
        axis: Axis,
        /// Requested extent.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewCells {
                axis,
                value,
                minimum,
            } => {
                write!(f, "{axis} cell count {value} is below the minimum {minimum}")
            }
            Self::OddPeriodicLength { value } => {
                write!(f, "periodic x axis needs an even cell count, got {value}")
            }
            Self::NonPositiveExtent { axis, value } => {
                write!(f, "{axis} extent must be positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from halo-exchange and boundary-condition appliers.
///
/// Each applier is tied to one periodicity: calling a halo exchange on a
/// walled axis (or a wall condition on a periodic axis) is a caller error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryError {
    /// A halo exchange was requested on a non-periodic axis.
    NotPeriodic {
        /// The offending axis.
        axis: Axis,
    },
    /// A wall boundary condition was requested on a periodic axis.
    Periodic {
        /// The offending axis.
        axis: Axis,
    },
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPeriodic { axis } => {
                write!(f, "halo exchange requested but {axis} axis is not periodic")
            }
            Self::Periodic { axis } => {
                write!(f, "wall condition requested but {axis} axis is periodic")
            }
        }
    }
}

impl Error for BoundaryError {}
