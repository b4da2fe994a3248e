//! Discrete cosine transforms of type 2 and 3 (Lee 1984).

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::error::PlanError;

const SQRT2H: f64 = 0.707_106_781_186_547_5;
const SQRT3H: f64 = 0.866_025_403_784_438_6;

/// Plan for batched symmetric cosine transforms.
///
/// `forward` is a DCT-II, `backward` a DCT-III; applying one after the other
/// reproduces the input multiplied by `2 N` — the caller normalizes. Any
/// length is supported: the kernel peels even factors recursively, handles
/// `N ∈ {1, 2, 3}` in closed form, and falls back to direct summation for
/// other odd remainders.
pub struct DctPlan {
    nitems: usize,
    repeat_for: usize,
    // 1 / (2 cos(pi i / 2N)), i = 0 .. N-1, shared by every level
    table: Vec<f64>,
    scratch: Vec<f64>,
}

impl DctPlan {
    /// Build a plan for `repeat_for` independent signals of length `nitems`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] when `nitems` is zero or `repeat_for` is zero.
    pub fn new(nitems: usize, repeat_for: usize) -> Result<Self, PlanError> {
        if nitems < 1 {
            return Err(PlanError::TooShort { nitems, minimum: 1 });
        }
        if repeat_for < 1 {
            return Err(PlanError::EmptyBatch);
        }
        let table = (0..nitems)
            .map(|i| 0.5 / ((PI * i as f64) / (2.0 * nitems as f64)).cos())
            .collect();
        Ok(Self {
            nitems,
            repeat_for,
            table,
            scratch: vec![0.0; nitems * repeat_for],
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

    /// DCT-II of every batch, in place.
    ///
    /// # Panics
    ///
    /// Panics if `xs.len() != nitems * repeat_for`.
    pub fn forward(&mut self, xs: &mut [f64]) {
        assert_eq!(xs.len(), self.nitems * self.repeat_for, "signal buffer size mismatch");
        let n = self.nitems;
        let table = &self.table;
        xs.par_chunks_mut(n)
            .zip(self.scratch.par_chunks_mut(n))
            .for_each(|(x, scratch)| {
                dct2(n, 1, table, x, scratch);
                for v in x.iter_mut() {
                    *v *= 2.0;
                }
            });
    }

    /// DCT-III of every batch, in place.
    ///
    /// # Panics
    ///
    /// Panics if `xs.len() != nitems * repeat_for`.
    pub fn backward(&mut self, xs: &mut [f64]) {
        assert_eq!(xs.len(), self.nitems * self.repeat_for, "signal buffer size mismatch");
        let n = self.nitems;
        let table = &self.table;
        xs.par_chunks_mut(n)
            .zip(self.scratch.par_chunks_mut(n))
            .for_each(|(x, scratch)| {
                x[0] *= 0.5;
                dct3(n, 1, table, x, scratch);
                for v in x.iter_mut() {
                    *v *= 2.0;
                }
            });
    }
}

// `inv` is the stride into the trig table; it doubles at every even split so
// each level reads the angles of its own sub-length without extra tables.
fn dct2(nitems: usize, inv: usize, table: &[f64], xs: &mut [f64], ys: &mut [f64]) {
    if nitems == 1 {
        // identity
    } else if nitems == 2 {
        let v0 = xs[0];
        let v1 = xs[1];
        xs[0] = v0 + v1;
        xs[1] = SQRT2H * (v0 - v1);
    } else if nitems == 3 {
        let v0 = xs[0];
        let v1 = xs[1];
        let v2 = xs[2];
        xs[0] = v0 + v1 + v2;
        xs[1] = SQRT3H * (v0 - v2);
        xs[2] = 0.5 * v0 - v1 + 0.5 * v2;
    } else if nitems % 2 == 0 {
        let nhalfs = nitems / 2;
        for i in 0..nhalfs {
            let c = table[(2 * i + 1) * inv];
            let v0 = xs[i];
            let v1 = xs[nitems - 1 - i];
            ys[i] = v0 + v1;
            ys[i + nhalfs] = c * (v0 - v1);
        }
        dct2(nhalfs, inv * 2, table, &mut ys[..nhalfs], &mut xs[..nhalfs]);
        dct2(nhalfs, inv * 2, table, &mut ys[nhalfs..nitems], &mut xs[..nhalfs]);
        for i in 0..nhalfs - 1 {
            xs[i * 2] = ys[i];
            xs[i * 2 + 1] = ys[nhalfs + i] + ys[nhalfs + i + 1];
        }
        xs[nitems - 2] = ys[nhalfs - 1];
        xs[nitems - 1] = ys[nitems - 1];
    } else {
        // direct summation for odd lengths beyond the closed forms
        for j in 0..nitems {
            let mut acc = 0.0;
            for (i, &x) in xs.iter().enumerate().take(nitems) {
                let phase = PI * (2.0 * i as f64 + 1.0) * j as f64 / (2.0 * nitems as f64);
                acc += x * phase.cos();
            }
            ys[j] = acc;
        }
        xs[..nitems].copy_from_slice(&ys[..nitems]);
    }
}

fn dct3(nitems: usize, inv: usize, table: &[f64], xs: &mut [f64], ys: &mut [f64]) {
    if nitems == 1 {
        // identity
    } else if nitems == 2 {
        let v0 = xs[0];
        let v1 = xs[1];
        xs[0] = v0 + SQRT2H * v1;
        xs[1] = v0 - SQRT2H * v1;
    } else if nitems == 3 {
        let v0 = xs[0];
        let v1 = xs[1];
        let v2 = xs[2];
        xs[0] = v0 + SQRT3H * v1 + 0.5 * v2;
        xs[1] = v0 - v2;
        xs[2] = v0 - SQRT3H * v1 + 0.5 * v2;
    } else if nitems % 2 == 0 {
        let nhalfs = nitems / 2;
        ys[0] = xs[0];
        ys[nhalfs] = xs[1];
        for i in 1..nhalfs {
            ys[i] = xs[i * 2];
            ys[nhalfs + i] = xs[i * 2 - 1] + xs[i * 2 + 1];
        }
        dct3(nhalfs, inv * 2, table, &mut ys[..nhalfs], &mut xs[..nhalfs]);
        dct3(nhalfs, inv * 2, table, &mut ys[nhalfs..nitems], &mut xs[..nhalfs]);
        for i in 0..nhalfs {
            let c = table[(2 * i + 1) * inv];
            let v0 = ys[i];
            let v1 = c * ys[nhalfs + i];
            xs[i] = v0 + v1;
            xs[nitems - 1 - i] = v0 - v1;
        }
    } else {
        for j in 0..nitems {
            let mut acc = xs[0];
            for (i, &x) in xs.iter().enumerate().take(nitems).skip(1) {
                let phase = PI * (2.0 * j as f64 + 1.0) * i as f64 / (2.0 * nitems as f64);
                acc += x * phase.cos();
            }
            ys[j] = acc;
        }
        xs[..nitems].copy_from_slice(&ys[..nitems]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    // brute-force DCT-II straight from the definition
    fn naive_dct2(xs: &[f64]) -> Vec<f64> {
        let n = xs.len();
        (0..n)
            .map(|j| {
                2.0 * xs
                    .iter()
                    .enumerate()
                    .map(|(i, &x)| {
                        x * (PI * (2.0 * i as f64 + 1.0) * j as f64 / (2.0 * n as f64)).cos()
                    })
                    .sum::<f64>()
            })
            .collect()
    }

    fn random_signal(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    #[test]
    fn matches_definition_for_small_sizes() {
        for n in 1..=24 {
            let xs = random_signal(n, n as u64);
            let mut plan = DctPlan::new(n, 1).unwrap();
            let mut got = xs.clone();
            plan.forward(&mut got);
            let want = naive_dct2(&xs);
            for (g, w) in got.iter().zip(&want) {
                assert!((g - w).abs() < 1e-11, "n={n}: {g} vs {w}");
            }
        }
    }

    #[test]
    fn round_trip_scales_by_two_n() {
        // powers of two, primes, powers of three, and mixed factorizations
        for &n in &[
            1usize, 2, 3, 4, 5, 6, 7, 8, 12, 13, 16, 31, 48, 97, 128, 192, 486, 1024, 2187, 4096,
            5000,
        ] {
            let repeat_for = 3;
            let mut xs: Vec<f64> = (0..repeat_for)
                .flat_map(|b| random_signal(n, 1000 + b as u64))
                .collect();
            let orig = xs.clone();
            let mut plan = DctPlan::new(n, repeat_for).unwrap();
            plan.forward(&mut xs);
            plan.backward(&mut xs);
            let tol = 1e-13 * n as f64 + 1e-13;
            for (got, want) in xs.iter().zip(&orig) {
                assert!(
                    (got - 2.0 * n as f64 * want).abs() < 2.0 * n as f64 * tol,
                    "n={n}: {got} vs {}",
                    2.0 * n as f64 * want
                );
            }
        }
    }

    #[test]
    fn batches_are_independent() {
        let n = 16;
        let a = random_signal(n, 7);
        let b = random_signal(n, 8);
        // transform the pair and each signal alone; results must agree
        let mut pair: Vec<f64> = a.iter().chain(&b).copied().collect();
        DctPlan::new(n, 2).unwrap().forward(&mut pair);
        let mut lone = a.clone();
        DctPlan::new(n, 1).unwrap().forward(&mut lone);
        assert_eq!(&pair[..n], &lone[..]);
    }

    #[test]
    fn rejects_empty_plan() {
        assert!(matches!(
            DctPlan::new(0, 4),
            Err(PlanError::TooShort { nitems: 0, minimum: 1 })
        ));
        assert!(matches!(DctPlan::new(8, 0), Err(PlanError::EmptyBatch)));
    }

    proptest! {
        #[test]
        fn round_trip_any_length(n in 1usize..260, seed in 0u64..1024) {
            let xs = random_signal(n, seed);
            let mut got = xs.clone();
            let mut plan = DctPlan::new(n, 1).unwrap();
            plan.forward(&mut got);
            plan.backward(&mut got);
            let scale = 2.0 * n as f64;
            let tol = scale * (1e-13 * n as f64 + 1e-13);
            for (g, w) in got.iter().zip(&xs) {
                prop_assert!((g - scale * w).abs() < tol);
            }
        }
    }
}
