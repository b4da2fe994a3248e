//! Spectral solver for the pressure-correction Poisson problem.
//!
//! The problem is separable: the x direction is diagonalized by a fast
//! transform (real Fourier when periodic, cosine when walled — the cosine
//! basis bakes in the Neumann condition), and each resulting x-wavenumber
//! mode reduces to a tridiagonal system along y. One solve is therefore
//! transform → transpose → batched tridiagonal solve → transpose back →
//! inverse transform.

use rayon::prelude::*;

use rill_core::{boundary, BoundaryError, Domain, Field, FlowField};
use rill_spectral::{transpose, DctPlan, PlanError, RdftPlan, TridiagonalPlan};

// x-direction transform, chosen once from the domain periodicity
enum XTransform {
    Cosine(DctPlan),
    Fourier(RdftPlan),
}

impl XTransform {
    fn forward(&mut self, xs: &mut [f64]) {
        match self {
            Self::Cosine(plan) => plan.forward(xs),
            Self::Fourier(plan) => plan.forward(xs),
        }
    }

    fn backward(&mut self, xs: &mut [f64]) {
        match self {
            Self::Cosine(plan) => plan.backward(xs),
            Self::Fourier(plan) => plan.backward(xs),
        }
    }
}

/// Preplanned resources for the pressure-correction solve.
///
/// Everything — transform tables, tridiagonal coefficients, wavenumber
/// eigenvalues, both working buffers — is sized from the [`Domain`] at
/// construction; a solve allocates nothing.
pub struct PoissonSolver {
    // working buffers, nx * ny with no halo; buf0 is x-major, buf1 y-major
    buf0: Vec<f64>,
    buf1: Vec<f64>,
    transform: XTransform,
    // forward + backward transform scale: nx for Fourier, 2 nx for cosine
    dft_norm: f64,
    wavenumbers: Vec<f64>,
    tridiagonal: TridiagonalPlan,
    l: Vec<f64>,
    c: Vec<f64>,
    u: Vec<f64>,
}

impl PoissonSolver {
    /// Build the solver resources for `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if a transform or tridiagonal plan rejects the
    /// grid; a [`Domain`] that passed validation never triggers this.
    pub fn new(domain: &Domain) -> Result<Self, PlanError> {
        let nx = domain.nx();
        let ny = domain.ny();
        let dx = domain.dx();
        let dy = domain.dy();

        let (transform, dft_norm) = if domain.periodic_x() {
            (XTransform::Fourier(RdftPlan::new(nx, ny)?), nx as f64)
        } else {
            (XTransform::Cosine(DctPlan::new(nx, ny)?), 2.0 * nx as f64)
        };

        let wavenumbers = (0..nx)
            .map(|i| {
                let s = (std::f64::consts::PI * i as f64 / dft_norm).sin();
                -(2.0 / dx * s).powi(2)
            })
            .collect();

        let tridiagonal = TridiagonalPlan::new(ny, nx, domain.periodic_y())?;
        let inv_dy2 = 1.0 / dy / dy;
        let l = vec![inv_dy2; ny];
        let u = vec![inv_dy2; ny];
        let mut c = vec![-2.0 * inv_dy2; ny];
        if !domain.periodic_y() {
            // walls imply d(psi)/dy = 0: fold the one-sided stencil into the
            // first and last diagonal entries
            c[0] += inv_dy2;
            c[ny - 1] += inv_dy2;
        }

        Ok(Self {
            buf0: vec![0.0; nx * ny],
            buf1: vec![0.0; nx * ny],
            transform,
            dft_norm,
            wavenumbers,
            tridiagonal,
            l,
            c,
            u,
        })
    }

    /// Solve for the correction potential of the predicted velocity field,
    /// writing the result into `psi`'s interior and refreshing its periodic
    /// halos.
    ///
    /// When both axes are periodic the zero-wavenumber mode is a pure
    /// Neumann system; the tridiagonal solver's zero convention pins its
    /// additive constant, normalizing the mean of `psi`.
    pub fn solve(
        &mut self,
        domain: &Domain,
        flow: &FlowField,
        dt: f64,
        psi: &mut Field,
    ) -> Result<(), BoundaryError> {
        let nx = domain.nx();
        let ny = domain.ny();
        let dx = domain.dx();
        let dy = domain.dy();
        let stride = psi.stride();

        // right-hand side: divergence of the predicted velocity, scaled so
        // the transform round trip comes out normalized
        {
            let factor = 1.0 / dt / self.dft_norm;
            let ux_s = flow.ux.as_slice();
            let uy_s = flow.uy.as_slice();
            self.buf0.par_chunks_mut(nx).enumerate().for_each(|(j0, row)| {
                let j = j0 + 1;
                for (i0, out) in row.iter_mut().enumerate() {
                    let c = j * stride + (i0 + 1);
                    let dux = ux_s[c + 1] - ux_s[c];
                    let duy = uy_s[c + stride] - uy_s[c];
                    *out = factor * (dux / dx + duy / dy);
                }
            });
        }

        // project x to wave space
        self.transform.forward(&mut self.buf0);
        // x-major to y-major
        transpose(nx, ny, &self.buf0, &mut self.buf1);
        // one tridiagonal system per x wavenumber, eigenvalue on the diagonal
        self.tridiagonal
            .solve(&self.l, &self.c, &self.u, &self.wavenumbers, &mut self.buf1);
        // y-major back to x-major
        transpose(ny, nx, &self.buf1, &mut self.buf0);
        // back to physical space
        self.transform.backward(&mut self.buf0);

        // copy into the halo-bearing field; walls need no explicit ghost
        // update because the cosine basis already implies zero gradient
        {
            let buf0 = &self.buf0;
            psi.as_mut_slice()
                .par_chunks_mut(stride)
                .enumerate()
                .skip(1)
                .take(ny)
                .for_each(|(j, row)| {
                    let src = &buf0[(j - 1) * nx..j * nx];
                    row[1..=nx].copy_from_slice(src);
                });
        }
        boundary::exchange_halos(domain, psi)
    }
}
