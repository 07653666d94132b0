//! Back-ends deciding the satisfiability of a [`PedCnf`].
//!
//! The pipeline only depends on [`SatSolver`]; an in-process search ([`DpllSolver`]) and a
//! wrapper around an external MiniSat-compatible program ([`ExternalSolver`]) are provided.
mod dpll;
mod external;

pub use dpll::*;
pub use external::*;

use crate::cnf::PedCnf;
use crate::cnf::SolverOutcome;
use crate::error::SolverError;

/// Decides the satisfiability of the clauses of a [`PedCnf`], including its XOR-clauses.
///
/// The returned assignment is not trusted by the caller, which checks it against the store.
pub trait SatSolver {
    fn solve(&mut self, cnf: &PedCnf) -> Result<SolverOutcome, SolverError>;
}
