//! Fractional-step integration of the 2-D incompressible Navier-Stokes
//! equations on a staggered grid.
//!
//! One call to [`FlowSolver::integrate`] advances the flow by a single time
//! step through five sequential stages:
//!
//! 1. [`decide_dt`] — stability-limited explicit step size,
//! 2. predict — explicit advection / diffusion / pressure-gradient update
//!    producing a (divergent) intermediate velocity,
//! 3. [`PoissonSolver::solve`] — spectral solve for the pressure-correction
//!    potential,
//! 4. correct — projection of the velocity onto the divergence-free space,
//! 5. update_pressure — accumulate the potential into the pressure.
//!
//! A failure in any stage aborts the step; scratch state is then undefined
//! and the caller must stop the run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod correct;
mod decide_dt;
mod error;
mod metrics;
mod poisson;
mod predict;
mod solver;
mod update_pressure;

pub use correct::correct;
pub use decide_dt::{advective_limit, decide_dt, diffusive_limit};
pub use error::{Stage, StepError};
pub use metrics::{flow_metrics, FlowMetrics};
pub use poisson::PoissonSolver;
pub use predict::predict;
pub use solver::FlowSolver;
pub use update_pressure::update_pressure;
