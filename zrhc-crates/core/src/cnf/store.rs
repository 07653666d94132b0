use std::collections::BTreeSet;

use log::debug;

use super::Assignment;
use super::PedVar;
use crate::containers::HashMap;
use crate::error::ResultParseError;
use crate::pedigree::IndividualId;
use crate::zrhc_assert_simple;

/// A disjunction of literals, or a parity constraint when stored as an XOR-clause.
///
/// Literals are nonzero; a negative literal is the negation of the variable `-literal`.
pub type Clause = BTreeSet<i32>;

/// How parity equations are represented in the SAT instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum EncodingMode {
    /// Every parity equation is expanded into plain clauses.
    #[default]
    Plain,
    /// Parity equations are kept as native XOR-clauses.
    Extended,
}

/// The SAT instance of a pedigree: the variables, their values once an assignment is known,
/// and the clauses.
///
/// Variables are allocated lazily on first request and numbered from 1 in allocation order.
/// Both the clauses and their literals are sets, so inserting a duplicate has no effect.
#[derive(Clone, Debug, Default)]
pub struct PedCnf {
    mode: EncodingMode,
    variables: Vec<PedVar>,
    indices: HashMap<PedVar, u32>,
    values: Vec<bool>,
    clauses: BTreeSet<Clause>,
    xor_clauses: BTreeSet<Clause>,
}

impl PedCnf {
    pub fn new(mode: EncodingMode) -> PedCnf {
        PedCnf {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    pub fn get_h(&mut self, individual: IndividualId, locus: usize) -> u32 {
        self.allocate(PedVar::H { individual, locus }).0
    }

    pub fn get_w(&mut self, individual: IndividualId, locus: usize) -> u32 {
        self.allocate(PedVar::W { individual, locus }).0
    }

    pub fn get_s(&mut self, parent: IndividualId, child: IndividualId) -> u32 {
        self.allocate(PedVar::S { parent, child }).0
    }

    /// The variable standing for the conjunction of `first` and `second`, in either order.
    pub fn get_dummy(&mut self, first: u32, second: u32) -> u32 {
        self.allocate_dummy(first, second).0
    }

    /// As [`PedCnf::get_dummy`], also reporting whether the variable has just been allocated.
    ///
    /// The variable keeps the operand order of its first request.
    pub(crate) fn allocate_dummy(&mut self, first: u32, second: u32) -> (u32, bool) {
        self.allocate(PedVar::Dummy { first, second })
    }

    fn allocate(&mut self, variable: PedVar) -> (u32, bool) {
        let key = variable.lookup_key();
        if let Some(&index) = self.indices.get(&key) {
            return (index, false);
        }

        self.variables.push(variable);
        self.values.push(false);
        let index = self.variables.len() as u32;
        let _ = self.indices.insert(key, index);
        (index, true)
    }

    /// The index of an already allocated variable. Never allocates.
    pub fn lookup(&self, variable: &PedVar) -> Option<u32> {
        self.indices.get(&variable.lookup_key()).copied()
    }

    /// The meaning of the variable with the given 1-based index.
    pub fn variable(&self, index: u32) -> Option<&PedVar> {
        index
            .checked_sub(1)
            .and_then(|position| self.variables.get(position as usize))
    }

    /// The allocated variables with their 1-based indices.
    pub fn variables(&self) -> impl Iterator<Item = (u32, &PedVar)> {
        (1..).zip(self.variables.iter())
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Inserts a clause, returning whether it was not already present.
    pub fn add_clause(&mut self, clause: Clause) -> bool {
        zrhc_assert_simple!(self.is_well_formed(&clause));
        self.clauses.insert(clause)
    }

    /// Inserts a clause whose literals must have odd parity.
    pub fn add_xor_clause(&mut self, clause: Clause) -> bool {
        zrhc_assert_simple!(self.is_well_formed(&clause));
        self.xor_clauses.insert(clause)
    }

    pub fn clauses(&self) -> &BTreeSet<Clause> {
        &self.clauses
    }

    pub fn xor_clauses(&self) -> &BTreeSet<Clause> {
        &self.xor_clauses
    }

    /// The number of plain clauses plus the number of XOR-clauses.
    pub fn clause_count(&self) -> usize {
        self.clauses.len() + self.xor_clauses.len()
    }

    /// The value of the variable with the given index; unknown variables are false.
    pub fn value(&self, index: u32) -> bool {
        index
            .checked_sub(1)
            .and_then(|position| self.values.get(position as usize))
            .copied()
            .unwrap_or(false)
    }

    /// The value of a symbolic variable; variables which were never allocated are false.
    pub fn value_of(&self, variable: &PedVar) -> bool {
        self.lookup(variable)
            .map(|index| self.value(index))
            .unwrap_or(false)
    }

    pub fn h_value(&self, individual: IndividualId, locus: usize) -> bool {
        self.value_of(&PedVar::H { individual, locus })
    }

    pub fn w_value(&self, individual: IndividualId, locus: usize) -> bool {
        self.value_of(&PedVar::W { individual, locus })
    }

    /// Replaces the current values with the given assignment. Variables the assignment does not
    /// mention become false.
    pub fn apply_assignment(&mut self, assignment: &Assignment) -> Result<(), ResultParseError> {
        let mut values = vec![false; self.variables.len()];
        for &literal in assignment.literals() {
            let variable = literal.unsigned_abs();
            let position = (variable as usize).wrapping_sub(1);
            let value = values
                .get_mut(position)
                .ok_or(ResultParseError::UnknownVariable {
                    variable,
                    num_variables: self.variables.len(),
                })?;
            *value = literal > 0;
        }
        self.values = values;

        Ok(())
    }

    /// The current values as an assignment over every allocated variable.
    pub fn current_assignment(&self) -> Assignment {
        Assignment::from_values(&self.values)
    }

    /// Returns true if the current values satisfy every clause and every XOR-clause.
    pub fn is_satisfying_assignment(&self) -> bool {
        let unsatisfied_clause = self
            .clauses
            .iter()
            .find(|clause| !clause.iter().any(|&literal| self.literal_value(literal)));
        if let Some(clause) = unsatisfied_clause {
            debug!("Clause {clause:?} is not satisfied.");
            return false;
        }

        let unsatisfied_xor_clause = self.xor_clauses.iter().find(|clause| {
            !clause
                .iter()
                .fold(false, |parity, &literal| parity ^ self.literal_value(literal))
        });
        if let Some(clause) = unsatisfied_xor_clause {
            debug!("XOR-clause {clause:?} is not satisfied.");
            return false;
        }

        true
    }

    pub(crate) fn literal_value(&self, literal: i32) -> bool {
        let value = self.value(literal.unsigned_abs());
        if literal < 0 {
            !value
        } else {
            value
        }
    }

    fn is_well_formed(&self, clause: &Clause) -> bool {
        !clause.is_empty()
            && clause.iter().all(|&literal| {
                literal != 0 && (literal.unsigned_abs() as usize) <= self.variables.len()
            })
    }
}
