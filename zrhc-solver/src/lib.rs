//! # ZRHC solver
//! Command-line front end of [`zrhc_core`]: it turns a PLINK pedigree into a DIMACS instance,
//! decodes the result of a MiniSat-compatible solver into haplotypes, or does both in one go
//! with the embedded solver or an external one.
//!
//! The library part re-exports [`zrhc_core`].
//!
//! ## Feature Flags
//! - `debug-checks`: Enable expensive assertions in the encoder, the store and the embedded
//!   solver.
pub use zrhc_core::*;
