//! Fold the pressure-correction potential into the pressure field.

use rayon::prelude::*;

use rill_core::{boundary, BoundaryError, Domain, Field, FlowField};

/// `p += psi` over the interior, then refresh the pressure halo/ghost cells.
///
/// The cosine transform already implies a zero-gradient pressure at walls,
/// so the wall ghosts re-imposed here restate what the solve produced rather
/// than changing it.
pub fn update_pressure(
    domain: &Domain,
    flow: &mut FlowField,
    psi: &Field,
) -> Result<(), BoundaryError> {
    let nx = domain.nx();
    let ny = domain.ny();
    let stride = flow.p.stride();
    let psi_s = psi.as_slice();
    flow.p
        .as_mut_slice()
        .par_chunks_mut(stride)
        .enumerate()
        .skip(1)
        .take(ny)
        .for_each(|(j, row)| {
            for i in 1..=nx {
                row[i] += psi_s[j * stride + i];
            }
        });
    boundary::refresh_p(domain, &mut flow.p)
}
