//! Solver state and the per-step integration pipeline.

use rill_core::{Domain, Field, FlowField};
use rill_spectral::PlanError;

use crate::correct::correct;
use crate::decide_dt::decide_dt;
use crate::error::{Stage, StepError};
use crate::poisson::PoissonSolver;
use crate::predict::predict;
use crate::update_pressure::update_pressure;

/// Scratch state and preplanned resources for the integration pipeline.
///
/// Owns the pressure-correction potential `psi`, the velocity-increment
/// fields, and the [`PoissonSolver`]. All of it is overwritten every step
/// and never shared between in-flight steps — the pipeline is strictly
/// sequential.
pub struct FlowSolver {
    re: f64,
    psi: Field,
    dux: Field,
    duy: Field,
    poisson: PoissonSolver,
}

impl FlowSolver {
    /// Allocate solver state for `domain` at Reynolds number `re`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if the Poisson solver rejects the grid; a
    /// validated [`Domain`] never triggers this.
    pub fn new(domain: &Domain, re: f64) -> Result<Self, PlanError> {
        Ok(Self {
            re,
            psi: Field::new(domain),
            dux: Field::new(domain),
            duy: Field::new(domain),
            poisson: PoissonSolver::new(domain)?,
        })
    }

    /// Reynolds number of the run.
    pub fn re(&self) -> f64 {
        self.re
    }

    /// The pressure-correction potential from the most recent step, for
    /// external samplers.
    pub fn psi(&self) -> &Field {
        &self.psi
    }

    /// Advance `flow` by one time step, returning the step size used.
    ///
    /// Stages run in order: decide_dt, predict, solve_poisson, correct,
    /// update_pressure. The first failure aborts the step with no rollback;
    /// the scratch fields are then in an undefined state and the caller must
    /// stop the run.
    pub fn integrate(&mut self, domain: &Domain, flow: &mut FlowField) -> Result<f64, StepError> {
        let dt = decide_dt(domain, flow, self.re);
        predict(domain, flow, &mut self.dux, &mut self.duy, self.re, dt)
            .map_err(StepError::at(Stage::Predict))?;
        self.poisson
            .solve(domain, flow, dt, &mut self.psi)
            .map_err(StepError::at(Stage::SolvePoisson))?;
        correct(domain, flow, &self.psi, dt).map_err(StepError::at(Stage::Correct))?;
        update_pressure(domain, flow, &self.psi)
            .map_err(StepError::at(Stage::UpdatePressure))?;
        tracing::debug!(dt, "advanced flow field by one step");
        Ok(dt)
    }
}
