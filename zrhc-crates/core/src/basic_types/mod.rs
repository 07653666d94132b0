mod gender;
mod genotype;

pub use gender::*;
pub use genotype::*;
