//! Bookkeeping of the SAT instance derived from a pedigree.
mod assignment;
mod dimacs;
mod store;
mod variables;

pub use assignment::*;
pub use store::*;
pub use variables::*;
