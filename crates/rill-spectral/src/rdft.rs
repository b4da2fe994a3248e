//! Real-signal discrete Fourier transform in the packed Hermitian layout.

use std::f64::consts::PI;

use num_complex::Complex64;
use rayon::prelude::*;

use crate::error::PlanError;

/// Plan for batched real-signal Fourier transforms.
///
/// The signal length `N` must be even: the kernel folds the real signal into
/// an `N/2`-point complex transform and recombines the spectrum, so a full
/// forward + backward pass costs two half-length FFTs and reproduces the
/// input multiplied by `N`.
///
/// The spectrum is stored packed in the signal buffer itself:
/// `xs[0..=N/2]` are the real parts of wavenumbers `0..=N/2` ascending, and
/// `xs[N/2+1..N]` the imaginary parts of wavenumbers `N/2-1..=1` descending.
/// The DC and Nyquist modes are purely real and carry no imaginary slot.
pub struct RdftPlan {
    nitems: usize,
    repeat_for: usize,
    // cos / sin(2 pi i / N), i = 0 ..= N/2
    table_cos: Vec<f64>,
    table_sin: Vec<f64>,
    // half-length complex buffers: packed input and spectrum
    pack: Vec<Complex64>,
    spec: Vec<Complex64>,
}

impl RdftPlan {
    /// Build a plan for `repeat_for` independent signals of length `nitems`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::OddLength`] for odd `nitems`, and
    /// [`PlanError`] variants for `nitems < 2` or `repeat_for == 0`.
    pub fn new(nitems: usize, repeat_for: usize) -> Result<Self, PlanError> {
        if nitems < 2 {
            return Err(PlanError::TooShort { nitems, minimum: 2 });
        }
        if nitems % 2 != 0 {
            return Err(PlanError::OddLength { nitems });
        }
        if repeat_for < 1 {
            return Err(PlanError::EmptyBatch);
        }
        let nhalf = nitems / 2;
        let table_cos = (0..=nhalf)
            .map(|i| (2.0 * PI * i as f64 / nitems as f64).cos())
            .collect();
        let table_sin = (0..=nhalf)
            .map(|i| (2.0 * PI * i as f64 / nitems as f64).sin())
            .collect();
        Ok(Self {
            nitems,
            repeat_for,
            table_cos,
            table_sin,
            pack: vec![Complex64::new(0.0, 0.0); nhalf * repeat_for],
            spec: vec![Complex64::new(0.0, 0.0); (nhalf + 1) * repeat_for],
        })
    }

    /// Signal length.
    pub fn nitems(&self) -> usize {
        self.nitems
    }

    /// Number of batched signals.
    pub fn repeat_for(&self) -> usize {
        self.repeat_for
    }

    /// Forward transform of every batch, in place, into the packed layout.
    ///
    /// # Panics
    ///
    /// Panics if `xs.len() != nitems * repeat_for`.
    pub fn forward(&mut self, xs: &mut [f64]) {
        assert_eq!(xs.len(), self.nitems * self.repeat_for, "signal buffer size mismatch");
        let n = self.nitems;
        let nhalf = n / 2;
        let table_cos = &self.table_cos;
        let table_sin = &self.table_sin;
        xs.par_chunks_mut(n)
            .zip(self.pack.par_chunks_mut(nhalf))
            .zip(self.spec.par_chunks_mut(nhalf + 1))
            .for_each(|((x, pack), spec)| {
                // fold neighbouring samples into a half-length complex signal
                for i in 0..nhalf {
                    pack[i] = Complex64::new(x[2 * i], x[2 * i + 1]);
                }
                dft(nhalf, -1.0, 1, table_cos, table_sin, pack, &mut spec[..nhalf]);
                // duplicate the DC bin so the recombination below can read
                // spec[nhalf - i] for i = 0 without wrapping
                spec[nhalf] = spec[0];
                // split into the spectra of the even / odd sample streams and
                // recombine into the packed real layout
                for i in 0..=nhalf {
                    let e = 0.5 * spec[i] + 0.5 * spec[nhalf - i].conj();
                    let o = -0.5 * spec[i] + 0.5 * spec[nhalf - i].conj();
                    let twiddle = Complex64::new(table_cos[i], -table_sin[i]);
                    let result = e + o * Complex64::i() * twiddle;
                    x[i] = result.re;
                    if i != 0 && i != nhalf {
                        x[n - i] = result.im;
                    }
                }
            });
    }

    /// Backward transform of every batch, in place, back to sample space.
    ///
    /// # Panics
    ///
    /// Panics if `xs.len() != nitems * repeat_for`.
    pub fn backward(&mut self, xs: &mut [f64]) {
        assert_eq!(xs.len(), self.nitems * self.repeat_for, "signal buffer size mismatch");
        let n = self.nitems;
        let nhalf = n / 2;
        let table_cos = &self.table_cos;
        let table_sin = &self.table_sin;
        xs.par_chunks_mut(n)
            .zip(self.pack.par_chunks_mut(nhalf))
            .zip(self.spec.par_chunks_mut(nhalf + 1))
            .for_each(|((x, pack), spec)| {
                // rebuild the half-length spectrum from the packed layout
                for i in 0..nhalf {
                    let real0 = x[i];
                    let imag0 = if i == 0 { 0.0 } else { x[n - i] };
                    let real1 = x[nhalf - i];
                    let imag1 = if i == 0 { 0.0 } else { x[nhalf + i] };
                    let val0 = Complex64::new(real0, imag0);
                    let val1 = Complex64::new(real1, imag1);
                    let e = 0.5 * val0 + 0.5 * val1.conj();
                    let o = 0.5 * val0 - 0.5 * val1.conj();
                    let twiddle = Complex64::new(table_cos[i], table_sin[i]);
                    spec[i] = e + o * Complex64::i() * twiddle;
                }
                dft(nhalf, 1.0, 1, table_cos, table_sin, &spec[..nhalf], pack);
                // the half-length transform halves the amplitude; compensate
                for i in 0..nhalf {
                    x[2 * i] = 2.0 * pack[i].re;
                    x[2 * i + 1] = 2.0 * pack[i].im;
                }
            });
    }
}

// Recursive radix-2 Cooley-Tukey transform reading `xs` at `stride`, writing
// `ys` contiguously. Odd sub-lengths fall back to direct summation.
fn dft(
    nitems: usize,
    sign: f64,
    stride: usize,
    table_cos: &[f64],
    table_sin: &[f64],
    xs: &[Complex64],
    ys: &mut [Complex64],
) {
    if nitems == 1 {
        ys[0] = xs[0];
    } else if nitems % 2 == 0 {
        let nhalf = nitems / 2;
        {
            let (lo, hi) = ys.split_at_mut(nhalf);
            dft(nhalf, sign, stride * 2, table_cos, table_sin, xs, lo);
            dft(nhalf, sign, stride * 2, table_cos, table_sin, &xs[stride..], &mut hi[..nhalf]);
        }
        for i in 0..nhalf {
            let j = i + nhalf;
            let c = table_cos[2 * stride * i];
            let s = table_sin[2 * stride * i];
            let twiddle = Complex64::new(c, sign * s);
            let e = ys[i];
            let o = ys[j] * twiddle;
            ys[i] = e + o;
            ys[j] = e - o;
        }
    } else {
        for k in 0..nitems {
            let mut acc = Complex64::new(0.0, 0.0);
            for n in 0..nitems {
                let phase = sign * 2.0 * PI * (n * k % nitems) as f64 / nitems as f64;
                let (sin, cos) = phase.sin_cos();
                acc += xs[stride * n] * Complex64::new(cos, sin);
            }
            ys[k] = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn random_signal(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    // brute-force reference spectrum in the packed layout
    fn naive_packed_spectrum(xs: &[f64]) -> Vec<f64> {
        let n = xs.len();
        let mut out = vec![0.0; n];
        for k in 0..=n / 2 {
            let mut acc = Complex64::new(0.0, 0.0);
            for (i, &x) in xs.iter().enumerate() {
                let phase = -2.0 * PI * (i * k) as f64 / n as f64;
                let (sin, cos) = phase.sin_cos();
                acc += x * Complex64::new(cos, sin);
            }
            out[k] = acc.re;
            if k != 0 && k != n / 2 {
                out[n - k] = acc.im;
            }
        }
        out
    }

    #[test]
    fn matches_definition_for_small_sizes() {
        for n in (2..=40).step_by(2) {
            let xs = random_signal(n, n as u64);
            let mut got = xs.clone();
            RdftPlan::new(n, 1).unwrap().forward(&mut got);
            let want = naive_packed_spectrum(&xs);
            for (g, w) in got.iter().zip(&want) {
                assert!((g - w).abs() < 1e-10 * n as f64, "n={n}: {g} vs {w}");
            }
        }
    }

    #[test]
    fn round_trip_scales_by_n() {
        // powers of two and even lengths with odd halves (exercising the
        // direct-summation fallback)
        for &n in &[2usize, 4, 6, 8, 10, 14, 16, 26, 32, 62, 64, 128, 194, 256, 1024, 4096, 5000] {
            let repeat_for = 2;
            let mut xs: Vec<f64> = (0..repeat_for)
                .flat_map(|b| random_signal(n, 2000 + b as u64))
                .collect();
            let orig = xs.clone();
            let mut plan = RdftPlan::new(n, repeat_for).unwrap();
            plan.forward(&mut xs);
            plan.backward(&mut xs);
            let tol = n as f64 * (1e-13 * n as f64 + 1e-13);
            for (got, want) in xs.iter().zip(&orig) {
                assert!(
                    (got - n as f64 * want).abs() < tol,
                    "n={n}: {got} vs {}",
                    n as f64 * want
                );
            }
        }
    }

    #[test]
    fn dc_and_nyquist_are_real() {
        let n = 16;
        let mut xs = random_signal(n, 5);
        let sum: f64 = xs.iter().sum();
        RdftPlan::new(n, 1).unwrap().forward(&mut xs);
        assert!((xs[0] - sum).abs() < 1e-12);
        // a constant signal has energy only in the DC bin
        let mut flat = vec![1.5; n];
        RdftPlan::new(n, 1).unwrap().forward(&mut flat);
        assert!((flat[0] - 1.5 * n as f64).abs() < 1e-12);
        for &v in &flat[1..] {
            assert!(v.abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_odd_lengths() {
        assert!(matches!(RdftPlan::new(9, 1), Err(PlanError::OddLength { nitems: 9 })));
        assert!(matches!(RdftPlan::new(1, 1), Err(PlanError::TooShort { .. })));
        assert!(matches!(RdftPlan::new(8, 0), Err(PlanError::EmptyBatch)));
    }

    proptest! {
        #[test]
        fn round_trip_any_even_length(half in 1usize..130, seed in 0u64..1024) {
            let n = 2 * half;
            let xs = random_signal(n, seed);
            let mut got = xs.clone();
            let mut plan = RdftPlan::new(n, 1).unwrap();
            plan.forward(&mut got);
            plan.backward(&mut got);
            let tol = n as f64 * (1e-13 * n as f64 + 1e-13);
            for (g, w) in got.iter().zip(&xs) {
                prop_assert!((g - n as f64 * w).abs() < tol);
            }
        }
    }
}
