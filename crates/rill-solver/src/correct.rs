//! Projection: subtract the pressure-correction gradient from the velocity.

use rayon::prelude::*;

use rill_core::{boundary, BoundaryError, Domain, Field, FlowField};

/// Make the predicted velocity divergence-free by subtracting the discrete
/// gradient of the correction potential `psi`.
///
/// The correction never alters wall-face values, so only periodic halos are
/// refreshed afterwards; wall conditions are left as the predictor imposed
/// them.
pub fn correct(
    domain: &Domain,
    flow: &mut FlowField,
    psi: &Field,
    dt: f64,
) -> Result<(), BoundaryError> {
    correct_ux(domain, &mut flow.ux, psi, dt);
    boundary::exchange_halos(domain, &mut flow.ux)?;
    correct_uy(domain, &mut flow.uy, psi, dt);
    boundary::exchange_halos(domain, &mut flow.uy)?;
    Ok(())
}

fn correct_ux(domain: &Domain, ux: &mut Field, psi: &Field, dt: f64) {
    let nx = domain.nx();
    let ny = domain.ny();
    let dx = domain.dx();
    let imin = domain.ux_imin();
    let stride = ux.stride();
    let psi_s = psi.as_slice();
    ux.as_mut_slice()
        .par_chunks_mut(stride)
        .enumerate()
        .skip(1)
        .take(ny)
        .for_each(|(j, row)| {
            for i in imin..=nx {
                let c = j * stride + i;
                row[i] -= dt / dx * (psi_s[c] - psi_s[c - 1]);
            }
        });
}

fn correct_uy(domain: &Domain, uy: &mut Field, psi: &Field, dt: f64) {
    let nx = domain.nx();
    let ny = domain.ny();
    let dy = domain.dy();
    let jmin = domain.uy_jmin();
    let stride = uy.stride();
    let psi_s = psi.as_slice();
    uy.as_mut_slice()
        .par_chunks_mut(stride)
        .enumerate()
        .skip(jmin)
        .take(ny + 1 - jmin)
        .for_each(|(j, row)| {
            for i in 1..=nx {
                let c = j * stride + i;
                row[i] -= dt / dy * (psi_s[c] - psi_s[c - stride]);
            }
        });
}
