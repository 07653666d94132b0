//! Errors which can be produced while building, encoding, solving and decoding a pedigree.
use thiserror::Error;

use crate::basic_types::Gender;
use crate::pedigree::IndividualId;
use crate::pedigree::ParentRole;

pub type ZrhcResult<T> = Result<T, ZrhcError>;

/// Errors raised while building or restructuring a [`crate::pedigree::Pedigree`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PedigreeError {
    #[error("The genotype length has not been set before creating an individual.")]
    UnsetGenotypeLength,
    #[error("The genotype length must be positive.")]
    ZeroGenotypeLength,
    #[error("Expected genotypes of length {expected}, but got {actual}.")]
    GenotypeLengthMismatch { expected: usize, actual: usize },
    #[error("The id '{0}' is already assigned to another individual.")]
    DuplicateId(String),
    #[error("No individual has id '{0}'.")]
    IdNotFound(String),
    #[error("Individual {individual} cannot be {requested} since it is {current}.")]
    GenderConflict {
        individual: IndividualId,
        current: Gender,
        requested: Gender,
    },
    #[error("Individual {child} already has a different {role} ({existing}).")]
    ParentConflict {
        child: IndividualId,
        role: ParentRole,
        existing: IndividualId,
    },
    #[error("Individual {0} would be its own ancestor.")]
    AncestryCycle(IndividualId),
    #[error("No family has been read.")]
    NoFamily,
    #[error("The pedigree has more than one family ({0} families).")]
    MoreThanOneFamily(usize),
}

/// Errors raised while turning a pedigree into clauses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error(
        "The homozygous genotypes of parent {parent} and child {child} at locus {locus} are \
         inconsistent."
    )]
    InconsistentHomozygousGenotypes {
        parent: IndividualId,
        child: IndividualId,
        locus: usize,
    },
    #[error("The expression '{0}' cannot be compiled into clauses.")]
    UnsupportedExpression(String),
}

/// The reason why a line of a pedigree file has been discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid gender code")]
    InvalidGender(String),
    #[error("'{0}' is not a valid allele code")]
    InvalidAllele(String),
    #[error("locus {0} is heterozygous with a missing allele")]
    HalfMissingGenotype(usize),
    #[error("the genotype has an odd number of alleles")]
    OddAlleleCount,
    #[error("father and mother must be both known or both missing")]
    HalfMissingParents,
    #[error("the line has no genotype")]
    EmptyGenotype,
    #[error("{0}")]
    Pedigree(#[from] PedigreeError),
}

/// Errors raised while parsing the output of a SAT solver.
#[derive(Error, Debug)]
pub enum ResultParseError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("the solver result is empty")]
    Empty,
    #[error("'{0}' is neither SAT nor UNSAT")]
    UnknownStatus(String),
    #[error("the solver reported SAT but no assignment was given")]
    MissingAssignment,
    #[error("'{0}' is an invalid literal")]
    InvalidLiteral(String),
    #[error("the assignment is not terminated with a '0'")]
    UnterminatedAssignment,
    #[error("the assignment refers to variable {variable}, but only {num_variables} exist")]
    UnknownVariable { variable: u32, num_variables: usize },
}

/// Errors raised by a [`crate::solvers::SatSolver`].
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to launch the SAT solver '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },
    #[error("The SAT solver result was invalid, more details: {0}")]
    InvalidResult(#[from] ResultParseError),
}

/// A decoded haplotype configuration failed one of the independent checks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the haplotype configuration is not complete")]
    Incomplete,
    #[error("the haplotype configuration is not consistent with the genotypes")]
    Inconsistent,
    #[error("the haplotype configuration is not zero-recombinant")]
    Recombinant,
}

/// The top-level error of the pipeline.
#[derive(Error, Debug)]
pub enum ZrhcError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid pedigree, more details: {0}")]
    Pedigree(#[from] PedigreeError),
    #[error("Failed to encode the pedigree, more details: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Failed to read the SAT solver results, more details: {0}")]
    ResultParse(#[from] ResultParseError),
    #[error("The SAT solver failed, more details: {0}")]
    Solver(#[from] SolverError),
    #[error("The computed haplotype configuration is not valid: {0}")]
    InvalidHaplotypeConfiguration(#[from] ValidationError),
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl ZrhcError {
    pub(crate) fn invariant_violation(message: impl std::fmt::Display) -> Self {
        Self::InvariantViolation(format!("{message}"))
    }
}
