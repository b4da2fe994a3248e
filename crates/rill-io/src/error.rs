//! Error type for NPY serialization.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from reading or writing `.npy` files.
#[derive(Debug)]
pub enum NpyError {
    /// An underlying filesystem operation failed.
    Io(io::Error),
    /// The file is not a well-formed NPY file.
    Format {
        /// What was wrong with it.
        reason: String,
    },
    /// The file is valid NPY but not a layout this crate handles
    /// (little-endian f64, C order, two dimensions).
    Unsupported {
        /// The offending header description.
        reason: String,
    },
}

impl fmt::Display for NpyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Format { reason } => write!(f, "malformed npy file: {reason}"),
            Self::Unsupported { reason } => write!(f, "unsupported npy layout: {reason}"),
        }
    }
}

impl Error for NpyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for NpyError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
