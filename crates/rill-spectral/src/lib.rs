//! Transform engines and linear-system kernels for the Rill pressure solver.
//!
//! Three plan objects, each owning its precomputed tables and scratch so the
//! per-step hot path never allocates:
//!
//! - [`DctPlan`] — symmetric cosine transform (DCT-II forward, DCT-III
//!   backward) for non-periodic axes,
//! - [`RdftPlan`] — packed real-signal Fourier transform for periodic axes,
//! - [`TridiagonalPlan`] — batched Thomas-algorithm solver with a
//!   Sherman–Morrison periodic variant.
//!
//! Plus the flat-buffer [`transpose`] the Poisson solver uses to turn
//! x-major data y-major between the transform and the tridiagonal solve.
//!
//! Batches are independent: every `repeat_for` loop runs data-parallel, each
//! batch touching only its own signal slice and its own scratch slice.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod dct;
mod error;
mod rdft;
mod transpose;
mod tridiagonal;

pub use dct::DctPlan;
pub use error::PlanError;
pub use rdft::RdftPlan;
pub use transpose::transpose;
pub use tridiagonal::TridiagonalPlan;
