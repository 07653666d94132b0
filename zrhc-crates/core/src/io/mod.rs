//! Reading pedigrees in the PLINK format and writing haplotype configurations.
mod plink_reader;
mod writers;

pub use plink_reader::*;
pub use writers::*;
