//! The genotyped pedigree: individuals, their genotypes and haplotypes, and parent links.
mod individual;
mod multifamily;
#[allow(
    clippy::module_inception,
    reason = "the pedigree type is the main item of the pedigree module"
)]
mod pedigree;
mod validation;

pub use individual::*;
pub use multifamily::*;
pub use pedigree::*;
