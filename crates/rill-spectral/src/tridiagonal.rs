//! Batched tridiagonal solver (Thomas algorithm, periodic-aware).

use rayon::prelude::*;

use crate::error::PlanError;

/// Plan for solving `repeat_for` independent tridiagonal systems of size
/// `nitems`, sharing the coefficient arrays but each with its own
/// right-hand side and its own uniform diagonal offset.
///
/// The non-periodic path is a plain forward-elimination / back-substitution
/// sweep. The periodic path splits off the two corner couplings as a rank-one
/// perturbation: the reduced `(N-1)`-row system is solved for the right-hand
/// side and for the perturbation column, a single scalar equation recovers
/// the last unknown, and the perturbation is folded back in.
///
/// When the last pivot (or the periodic coupling denominator) falls below
/// machine epsilon the last unknown is defined as zero instead of failing.
/// For the pure-Neumann pressure systems this solver exists for, that pins
/// the additive constant of the solution; the check cannot tell that
/// expected null space apart from a genuinely ill-conditioned system.
pub struct TridiagonalPlan {
    nitems: usize,
    repeat_for: usize,
    periodic: bool,
    // per-batch elimination scratch: upper-diagonal multipliers and the
    // perturbation column
    v: Vec<f64>,
    w: Vec<f64>,
}

impl TridiagonalPlan {
    /// Smallest supported system; the periodic split needs three rows.
    pub const MIN_NITEMS: usize = 3;

    /// Build a plan for `repeat_for` systems of `nitems` unknowns.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] when `nitems < 3` or `repeat_for == 0`.
    pub fn new(nitems: usize, repeat_for: usize, periodic: bool) -> Result<Self, PlanError> {
        if nitems < Self::MIN_NITEMS {
            return Err(PlanError::TooShort {
                nitems,
                minimum: Self::MIN_NITEMS,
            });
        }
        if repeat_for < 1 {
            return Err(PlanError::EmptyBatch);
        }
        Ok(Self {
            nitems,
            repeat_for,
            periodic,
            v: vec![0.0; nitems * repeat_for],
            w: vec![0.0; nitems * repeat_for],
        })
    }

    /// System size.
    pub fn nitems(&self) -> usize {
        self.nitems
    }

    /// Number of batched systems.
    pub fn repeat_for(&self) -> usize {
        self.repeat_for
    }

    /// Whether the corner couplings are included.
    pub fn periodic(&self) -> bool {
        self.periodic
    }

    /// Solve every batch in place.
    ///
    /// `l`, `c`, `u` are the shared lower / center / upper diagonals
    /// (`nitems` each); `c_offsets[b]` is added to every center-diagonal
    /// entry of batch `b`; `q` holds the `nitems * repeat_for` right-hand
    /// sides on input and the solutions on output.
    ///
    /// # Panics
    ///
    /// Panics if any slice length disagrees with the plan.
    pub fn solve(&mut self, l: &[f64], c: &[f64], u: &[f64], c_offsets: &[f64], q: &mut [f64]) {
        let n = self.nitems;
        assert_eq!(l.len(), n, "lower diagonal size mismatch");
        assert_eq!(c.len(), n, "center diagonal size mismatch");
        assert_eq!(u.len(), n, "upper diagonal size mismatch");
        assert_eq!(c_offsets.len(), self.repeat_for, "offset count mismatch");
        assert_eq!(q.len(), n * self.repeat_for, "right-hand-side size mismatch");
        let periodic = self.periodic;
        q.par_chunks_mut(n)
            .zip(self.v.par_chunks_mut(n))
            .zip(self.w.par_chunks_mut(n))
            .zip(c_offsets.par_iter())
            .for_each(|(((q, v), w), &c_offset)| {
                if periodic {
                    solve_periodic(n, l, c, u, c_offset, v, w, q);
                } else {
                    solve_plain(n, l, c, u, c_offset, v, q);
                }
            });
    }
}

fn solve_plain(n: usize, l: &[f64], c: &[f64], u: &[f64], c_offset: f64, v: &mut [f64], q: &mut [f64]) {
    // divide the first row by its center-diagonal term
    v[0] = u[0] / (c[0] + c_offset);
    q[0] = q[0] / (c[0] + c_offset);
    // forward sweep; the interior pivots of these diffusion-like systems are
    // assumed non-zero, only the last row is checked for degeneracy
    for i in 1..n - 1 {
        let val = 1.0 / (c[i] + c_offset - l[i] * v[i - 1]);
        v[i] = val * u[i];
        q[i] = val * (q[i] - l[i] * q[i - 1]);
    }
    let val = c[n - 1] + c_offset - l[n - 1] * v[n - 2];
    q[n - 1] = if val.abs() < f64::EPSILON {
        // singular last row: pin the unknown to zero
        0.0
    } else {
        (q[n - 1] - l[n - 1] * q[n - 2]) / val
    };
    // backward substitution
    for i in (0..n - 1).rev() {
        q[i] -= v[i] * q[i + 1];
    }
}

#[allow(clippy::too_many_arguments)]
fn solve_periodic(
    n: usize,
    l: &[f64],
    c: &[f64],
    u: &[f64],
    c_offset: f64,
    v: &mut [f64],
    w: &mut [f64],
    q: &mut [f64],
) {
    // perturbation right-hand side carrying the two corner coefficients
    for i in 0..n - 1 {
        w[i] = if i == 0 {
            -l[i]
        } else if i == n - 2 {
            -u[i]
        } else {
            0.0
        };
    }
    // eliminate the reduced (n-1)-row system for both columns
    v[0] = u[0] / (c[0] + c_offset);
    q[0] = q[0] / (c[0] + c_offset);
    w[0] = w[0] / (c[0] + c_offset);
    for i in 1..n - 1 {
        let val = 1.0 / (c[i] + c_offset - l[i] * v[i - 1]);
        v[i] = val * u[i];
        q[i] = val * (q[i] - l[i] * q[i - 1]);
        w[i] = val * (w[i] - l[i] * w[i - 1]);
    }
    for i in (0..n - 2).rev() {
        q[i] -= v[i] * q[i + 1];
        w[i] -= v[i] * w[i + 1];
    }
    // scalar coupling equation for the last unknown
    let num = q[n - 1] - u[n - 1] * q[0] - l[n - 1] * q[n - 2];
    let den = c[n - 1] + c_offset + u[n - 1] * w[0] + l[n - 1] * w[n - 2];
    q[n - 1] = if den.abs() < f64::EPSILON { 0.0 } else { num / den };
    // fold the perturbation column back into the other unknowns
    for i in 0..n - 1 {
        q[i] += q[n - 1] * w[i];
    }
}
