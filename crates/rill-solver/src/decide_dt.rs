//! Stability-limited explicit time-step selection.

use rayon::prelude::*;

use rill_core::{Domain, FlowField};

// Courant-like safety factors for the two stability limits.
const SAFETY_ADV: f64 = 0.25;
const SAFETY_DIF: f64 = 0.95;

// floor for |velocity| so a quiescent flow gives a finite limit
const VELOCITY_FLOOR: f64 = 1.0e-8;

const NDIMS: f64 = 2.0;

/// Advective limit: the smallest face-transit time `spacing / |velocity|`
/// over all updatable faces, scaled by the advective safety factor.
///
/// The search starts from 1.0, which doubles as an absolute cap on the step
/// size for nearly-still flows.
pub fn advective_limit(domain: &Domain, flow: &FlowField) -> f64 {
    let nx = domain.nx();
    let ny = domain.ny();
    let dx = domain.dx();
    let dy = domain.dy();
    let stride = flow.ux.stride();

    let face_min = |field: &[f64], imin: usize, jmin: usize, spacing: f64| {
        field
            .par_chunks(stride)
            .skip(jmin)
            .take(ny + 1 - jmin)
            .map(|row| {
                row[imin..=nx]
                    .iter()
                    .fold(f64::INFINITY, |acc, &v| acc.min(spacing / v.abs().max(VELOCITY_FLOOR)))
            })
            .reduce(|| f64::INFINITY, f64::min)
    };

    let mut dt: f64 = 1.0;
    dt = dt.min(face_min(flow.ux.as_slice(), domain.ux_imin(), 1, dx));
    dt = dt.min(face_min(flow.uy.as_slice(), 1, domain.uy_jmin(), dy));
    SAFETY_ADV * dt
}

/// Diffusive limit: `Re / (2 ndims) · min(dx, dy)²` scaled by the diffusive
/// safety factor. Independent of the flow state.
pub fn diffusive_limit(domain: &Domain, re: f64) -> f64 {
    SAFETY_DIF * re * 0.5 / NDIMS * domain.dx().min(domain.dy()).powi(2)
}

/// Pick the time-step size: the smaller of the advective and diffusive
/// limits.
pub fn decide_dt(domain: &Domain, flow: &FlowField, re: f64) -> f64 {
    advective_limit(domain, flow).min(diffusive_limit(domain, re))
}
