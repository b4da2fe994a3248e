//! Explicit predictor: advection, diffusion and pressure-gradient kernels.
//!
//! Each kernel accumulates its `dt`-scaled contribution into the increment
//! fields `dux` / `duy`; the increments are then added to the velocities,
//! the face-averaged porosity weight suppresses flow inside solid regions,
//! and the halo/ghost cells are refreshed. All kernels run row-parallel:
//! each row writes only itself and reads only frozen input fields.

use rayon::prelude::*;

use rill_core::{boundary, BoundaryError, Domain, Field, FlowField};

/// Predict the intermediate (divergent) velocity field for one step.
pub fn predict(
    domain: &Domain,
    flow: &mut FlowField,
    dux: &mut Field,
    duy: &mut Field,
    re: f64,
    dt: f64,
) -> Result<(), BoundaryError> {
    compute_dux(domain, flow, re, dt, dux);
    compute_duy(domain, flow, re, dt, duy);
    update_ux(domain, flow, dux)?;
    update_uy(domain, flow, duy)?;
    Ok(())
}

fn compute_dux(domain: &Domain, flow: &FlowField, re: f64, dt: f64, dux: &mut Field) {
    zero_interior(domain, domain.ux_imin(), 1, dux);
    let viscosity = 1.0 / re;
    ux_advx(domain, &flow.ux, dt, dux);
    ux_advy(domain, &flow.uy, &flow.ux, dt, dux);
    ux_difx(domain, viscosity, &flow.ux, dt, dux);
    ux_dify(domain, viscosity, &flow.ux, dt, dux);
    ux_pres(domain, &flow.p, dt, dux);
}

fn compute_duy(domain: &Domain, flow: &FlowField, re: f64, dt: f64, duy: &mut Field) {
    zero_interior(domain, 1, domain.uy_jmin(), duy);
    let viscosity = 1.0 / re;
    uy_advx(domain, &flow.ux, &flow.uy, dt, duy);
    uy_advy(domain, &flow.uy, dt, duy);
    uy_difx(domain, viscosity, &flow.uy, dt, duy);
    uy_dify(domain, viscosity, &flow.uy, dt, duy);
    uy_pres(domain, &flow.p, dt, duy);
}

// Runs a row-parallel stencil over the updatable faces: `body(i, c, row)`
// with `c` the flat center index into the co-located input slices.
fn for_each_face(
    domain: &Domain,
    imin: usize,
    jmin: usize,
    out: &mut Field,
    body: impl Fn(usize, usize, &mut [f64]) + Sync,
) {
    let nx = domain.nx();
    let ny = domain.ny();
    let stride = out.stride();
    out.as_mut_slice()
        .par_chunks_mut(stride)
        .enumerate()
        .skip(jmin)
        .take(ny + 1 - jmin)
        .for_each(|(j, row)| {
            for i in imin..=nx {
                body(i, j * stride + i, row);
            }
        });
}

fn zero_interior(domain: &Domain, imin: usize, jmin: usize, out: &mut Field) {
    for_each_face(domain, imin, jmin, out, |i, _, row| row[i] = 0.0);
}

// d(ux ux)/dx, face-averaged transport velocity times central difference
fn ux_advx(domain: &Domain, ux: &Field, dt: f64, dux: &mut Field) {
    let dx = domain.dx();
    let ux_s = ux.as_slice();
    for_each_face(domain, domain.ux_imin(), 1, dux, |i, c, row| {
        let ux_xm = 0.5 * (ux_s[c - 1] + ux_s[c]);
        let ux_xp = 0.5 * (ux_s[c] + ux_s[c + 1]);
        let dux_xm = ux_s[c] - ux_s[c - 1];
        let dux_xp = ux_s[c + 1] - ux_s[c];
        row[i] -= dt * (0.5 / dx * ux_xm * dux_xm + 0.5 / dx * ux_xp * dux_xp);
    });
}

// d(uy ux)/dy
fn ux_advy(domain: &Domain, uy: &Field, ux: &Field, dt: f64, dux: &mut Field) {
    let dy = domain.dy();
    let stride = ux.stride();
    let ux_s = ux.as_slice();
    let uy_s = uy.as_slice();
    for_each_face(domain, domain.ux_imin(), 1, dux, |i, c, row| {
        let uy_ym = 0.5 * (uy_s[c - 1] + uy_s[c]);
        let uy_yp = 0.5 * (uy_s[c + stride - 1] + uy_s[c + stride]);
        let dux_ym = ux_s[c] - ux_s[c - stride];
        let dux_yp = ux_s[c + stride] - ux_s[c];
        row[i] -= dt * (0.5 / dy * uy_ym * dux_ym + 0.5 / dy * uy_yp * dux_yp);
    });
}

fn ux_difx(domain: &Domain, viscosity: f64, ux: &Field, dt: f64, dux: &mut Field) {
    let dx = domain.dx();
    let ux_s = ux.as_slice();
    for_each_face(domain, domain.ux_imin(), 1, dux, |i, c, row| {
        row[i] += dt * viscosity / dx / dx * (ux_s[c - 1] - 2.0 * ux_s[c] + ux_s[c + 1]);
    });
}

fn ux_dify(domain: &Domain, viscosity: f64, ux: &Field, dt: f64, dux: &mut Field) {
    let dy = domain.dy();
    let stride = ux.stride();
    let ux_s = ux.as_slice();
    for_each_face(domain, domain.ux_imin(), 1, dux, |i, c, row| {
        row[i] += dt * viscosity / dy / dy * (ux_s[c - stride] - 2.0 * ux_s[c] + ux_s[c + stride]);
    });
}

fn ux_pres(domain: &Domain, p: &Field, dt: f64, dux: &mut Field) {
    let dx = domain.dx();
    let p_s = p.as_slice();
    for_each_face(domain, domain.ux_imin(), 1, dux, |i, c, row| {
        row[i] -= dt / dx * (p_s[c] - p_s[c - 1]);
    });
}

// d(ux uy)/dx
fn uy_advx(domain: &Domain, ux: &Field, uy: &Field, dt: f64, duy: &mut Field) {
    let dx = domain.dx();
    let stride = uy.stride();
    let ux_s = ux.as_slice();
    let uy_s = uy.as_slice();
    for_each_face(domain, 1, domain.uy_jmin(), duy, |i, c, row| {
        let ux_xm = 0.5 * (ux_s[c - stride] + ux_s[c]);
        let ux_xp = 0.5 * (ux_s[c - stride + 1] + ux_s[c + 1]);
        let duy_xm = uy_s[c] - uy_s[c - 1];
        let duy_xp = uy_s[c + 1] - uy_s[c];
        row[i] -= dt * (0.5 / dx * ux_xm * duy_xm + 0.5 / dx * ux_xp * duy_xp);
    });
}

// d(uy uy)/dy
fn uy_advy(domain: &Domain, uy: &Field, dt: f64, duy: &mut Field) {
    let dy = domain.dy();
    let stride = uy.stride();
    let uy_s = uy.as_slice();
    for_each_face(domain, 1, domain.uy_jmin(), duy, |i, c, row| {
        let uy_ym = 0.5 * (uy_s[c - stride] + uy_s[c]);
        let uy_yp = 0.5 * (uy_s[c] + uy_s[c + stride]);
        let duy_ym = uy_s[c] - uy_s[c - stride];
        let duy_yp = uy_s[c + stride] - uy_s[c];
        row[i] -= dt * (0.5 / dy * uy_ym * duy_ym + 0.5 / dy * uy_yp * duy_yp);
    });
}

fn uy_difx(domain: &Domain, viscosity: f64, uy: &Field, dt: f64, duy: &mut Field) {
    let dx = domain.dx();
    let uy_s = uy.as_slice();
    for_each_face(domain, 1, domain.uy_jmin(), duy, |i, c, row| {
        row[i] += dt * viscosity / dx / dx * (uy_s[c - 1] - 2.0 * uy_s[c] + uy_s[c + 1]);
    });
}

fn uy_dify(domain: &Domain, viscosity: f64, uy: &Field, dt: f64, duy: &mut Field) {
    let dy = domain.dy();
    let stride = uy.stride();
    let uy_s = uy.as_slice();
    for_each_face(domain, 1, domain.uy_jmin(), duy, |i, c, row| {
        row[i] += dt * viscosity / dy / dy * (uy_s[c - stride] - 2.0 * uy_s[c] + uy_s[c + stride]);
    });
}

fn uy_pres(domain: &Domain, p: &Field, dt: f64, duy: &mut Field) {
    let dy = domain.dy();
    let stride = p.stride();
    let p_s = p.as_slice();
    for_each_face(domain, 1, domain.uy_jmin(), duy, |i, c, row| {
        row[i] -= dt / dy * (p_s[c] - p_s[c - stride]);
    });
}

fn update_ux(domain: &Domain, flow: &mut FlowField, dux: &Field) -> Result<(), BoundaryError> {
    let dux_s = dux.as_slice();
    let weight_s = flow.weight.as_slice();
    // the weight multiplication runs after the increment so a solid face is
    // zeroed no matter what the kernels accumulated
    for_each_face(domain, domain.ux_imin(), 1, &mut flow.ux, |i, c, row| {
        let w = 0.5 * weight_s[c - 1] + 0.5 * weight_s[c];
        row[i] = (row[i] + dux_s[c]) * w;
    });
    boundary::refresh_ux(domain, &flow.walls, &mut flow.ux)
}

fn update_uy(domain: &Domain, flow: &mut FlowField, duy: &Field) -> Result<(), BoundaryError> {
    let stride = flow.uy.stride();
    let duy_s = duy.as_slice();
    let weight_s = flow.weight.as_slice();
    for_each_face(domain, 1, domain.uy_jmin(), &mut flow.uy, |i, c, row| {
        let w = 0.5 * weight_s[c - stride] + 0.5 * weight_s[c];
        row[i] = (row[i] + duy_s[c]) * w;
    });
    boundary::refresh_uy(domain, &flow.walls, &mut flow.uy)
}
