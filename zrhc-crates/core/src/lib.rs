//! # ZRHC
//! Computes zero-recombinant haplotype configurations of genotyped pedigrees by reduction to
//! Boolean satisfiability.
//!
//! In a zero-recombinant configuration every child inherits one whole haplotype strand, unchanged,
//! from each of its parents. The genotypes of every parent-child link at every locus are turned
//! into a parity equation over phase (`h`), zygosity (`w`) and strand (`s`) variables; the
//! equations are compiled into clauses (or kept as XOR-clauses), and a satisfying assignment is
//! decoded back into haplotypes, imputing the missing genotypes on the way.
//!
//! The whole pipeline can run in-process:
//! ```rust
//! # use zrhc_core::solve_pedigree;
//! # use zrhc_core::solvers::DpllSolver;
//! # use zrhc_core::ZrhcOptions;
//! # use zrhc_core::ZrhcOutcome;
//! let pedigree = "0 1 0 0 1 phenotype 1 2 1 1\n\
//!                 0 2 0 0 2 phenotype 1 1 0 0\n\
//!                 0 3 1 2 1 phenotype 2 1 1 2\n";
//!
//! let outcome = solve_pedigree(
//!     pedigree.as_bytes(),
//!     &mut DpllSolver::new(),
//!     &ZrhcOptions::default(),
//! )
//! .unwrap();
//!
//! let ZrhcOutcome::Haplotyped(pedigree) = outcome else {
//!     panic!("a zero-recombinant configuration exists");
//! };
//! assert!(pedigree.is_zero_recombinant());
//! ```
//!
//! or be split around an external SAT solver, with [`create_sat_instance`] writing the DIMACS
//! instance and [`compute_hc_from_sat_results`] decoding the solver result.
pub(crate) mod zrhc_asserts;

pub mod basic_types;
pub mod cnf;
pub mod containers;
pub mod decoding;
pub mod encoding;
pub mod error;
pub mod io;
pub mod pedigree;
pub mod solvers;

mod api;

pub use api::*;
