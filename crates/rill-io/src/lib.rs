//! On-disk snapshots of Rill flow fields.
//!
//! Fields are written as NumPy `.npy` files (format version 1.0,
//! little-endian f64, C order, halos included) so runs can be inspected and
//! post-processed with the usual Python tooling. [`save_flow_field`] writes
//! one directory per snapshot holding the four field arrays plus the step
//! index and simulated time.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod npy;
mod snapshot;

pub use error::NpyError;
pub use npy::{read_array, write_array};
pub use snapshot::{load_field, save_flow_field};
