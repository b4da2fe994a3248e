//! Rill: a 2-D incompressible Navier-Stokes solver.
//!
//! This is the top-level facade crate re-exporting the public API from the
//! Rill sub-crates. For most users, adding `rill` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use rill::prelude::*;
//!
//! // A small periodic box with a walled y axis and a gentle inflow.
//! let domain = Domain::new(1.0, 2.0, 16, 32, true, false).unwrap();
//! let walls = WallValues { uy_yp: -1.0, ..WallValues::default() };
//! let mut flow = FlowField::new(&domain, walls).unwrap();
//! let mut solver = FlowSolver::new(&domain, 100.0).unwrap();
//!
//! let mut time = 0.0;
//! for _ in 0..10 {
//!     time += solver.integrate(&domain, &mut flow).unwrap();
//! }
//! let metrics = flow_metrics(&domain, &flow);
//! assert!(metrics.div_max.is_finite() && time > 0.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `rill-core` | Domain, fields, boundary appliers |
//! | [`spectral`] | `rill-spectral` | DCT / real-FFT engines, tridiagonal solver |
//! | [`solver`] | `rill-solver` | Poisson solver and the integration pipeline |
//! | [`io`] | `rill-io` | NPY snapshot serialization |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Domain geometry, fields, and boundary appliers (`rill-core`).
pub use rill_core as core;

/// Transform engines and the batched tridiagonal solver (`rill-spectral`).
pub use rill_spectral as spectral;

/// The Poisson solver and the integration pipeline (`rill-solver`).
pub use rill_solver as solver;

/// NPY snapshot serialization (`rill-io`).
pub use rill_io as io;

/// Common imports for typical Rill usage.
///
/// ```rust
/// use rill::prelude::*;
/// ```
pub mod prelude {
    pub use rill_core::{
        Axis, BoundaryError, ConfigError, Domain, Field, FlowField, WallValues,
    };
    pub use rill_io::save_flow_field;
    pub use rill_solver::{
        decide_dt, flow_metrics, FlowMetrics, FlowSolver, PoissonSolver, Stage, StepError,
    };
    pub use rill_spectral::{DctPlan, PlanError, RdftPlan, TridiagonalPlan};
}
