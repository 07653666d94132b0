//! Translation of a pedigree into parity equations and of parity equations into clauses.
mod cnf_compiler;
mod constraint_builder;
mod expression;

pub use cnf_compiler::*;
pub use constraint_builder::*;
pub use expression::*;
