//! Shared fixtures for Rill tests: staggered-coordinate field fillers, a
//! divergence probe, and seeded RNG helpers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rill_core::{Domain, Field, FlowField};

/// Deterministic RNG for reproducible test signals.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Fill every cell (halos included) with `f(x, y)` at x-face coordinates:
/// `x = (i - 1) dx`, `y = (j - 0.5) dy`.
///
/// Filling the halos from the same closure gives ghost values consistent
/// with a smooth profile, which keeps stencil tests free of boundary
/// special-casing.
pub fn fill_ux_faces(domain: &Domain, field: &mut Field, f: impl Fn(f64, f64) -> f64) {
    let (dx, dy) = (domain.dx(), domain.dy());
    for j in 0..=field.ny() + 1 {
        let y = (j as f64 - 0.5) * dy;
        for i in 0..=field.nx() + 1 {
            let x = (i as f64 - 1.0) * dx;
            field[(j, i)] = f(x, y);
        }
    }
}

/// Fill every cell (halos included) with `f(x, y)` at y-face coordinates:
/// `x = (i - 0.5) dx`, `y = (j - 1) dy`.
pub fn fill_uy_faces(domain: &Domain, field: &mut Field, f: impl Fn(f64, f64) -> f64) {
    let (dx, dy) = (domain.dx(), domain.dy());
    for j in 0..=field.ny() + 1 {
        let y = (j as f64 - 1.0) * dy;
        for i in 0..=field.nx() + 1 {
            let x = (i as f64 - 0.5) * dx;
            field[(j, i)] = f(x, y);
        }
    }
}

/// Largest per-cell divergence magnitude of the staggered velocity field.
pub fn divergence_max(domain: &Domain, flow: &FlowField) -> f64 {
    let (dx, dy) = (domain.dx(), domain.dy());
    let mut worst = 0.0f64;
    for j in 1..=domain.ny() {
        for i in 1..=domain.nx() {
            let div = (flow.ux[(j, i + 1)] - flow.ux[(j, i)]) / dx
                + (flow.uy[(j + 1, i)] - flow.uy[(j, i)]) / dy;
            worst = worst.max(div.abs());
        }
    }
    worst
}

/// Perturb the interior of a field with uniform noise in `[-scale, scale]`.
pub fn perturb_interior(domain: &Domain, field: &mut Field, scale: f64, seed: u64) {
    let mut rng = seeded_rng(seed);
    for j in 1..=domain.ny() {
        for i in 1..=domain.nx() {
            field[(j, i)] += rng.random_range(-scale..scale);
        }
    }
}
