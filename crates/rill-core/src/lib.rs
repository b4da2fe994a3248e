//! Core types for the Rill incompressible-flow solver.
//!
//! Defines the immutable [`Domain`] geometry, the halo-bearing [`Field`]
//! buffer, the [`FlowField`] state (staggered velocities, pressure, porosity
//! weight), and the halo-exchange / boundary-condition appliers consumed by
//! the integration pipeline.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
mod domain;
mod error;
mod field;
mod flow_field;

pub use domain::{Axis, Domain};
pub use error::{BoundaryError, ConfigError};
pub use field::Field;
pub use flow_field::{FlowField, WallValues};
