//! Flat-buffer transpose between x-major and y-major layouts.

use rayon::prelude::*;

/// Transpose an `ny × nx` row-major buffer into an `nx × ny` one:
/// `dst[i * ny + j] = src[j * nx + i]`.
///
/// The Poisson solver calls this twice per solve to hand the x-transformed
/// data to the y-direction tridiagonal kernel and back. Rows of `dst` are
/// filled in parallel; each gathers one column of `src`.
///
/// # Panics
///
/// Panics if either buffer is not `nx * ny` long.
pub fn transpose(nx: usize, ny: usize, src: &[f64], dst: &mut [f64]) {
    assert_eq!(src.len(), nx * ny, "source buffer size mismatch");
    assert_eq!(dst.len(), nx * ny, "destination buffer size mismatch");
    dst.par_chunks_mut(ny).enumerate().for_each(|(i, row)| {
        for (j, out) in row.iter_mut().enumerate() {
            *out = src[j * nx + i];
        }
    });
}
