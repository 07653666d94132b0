use log::debug;

use super::SatSolver;
use crate::cnf::Assignment;
use crate::cnf::PedCnf;
use crate::cnf::SolverOutcome;
use crate::error::SolverError;
use crate::zrhc_assert_simple;

/// An in-process DPLL search over the clauses and XOR-clauses of a [`PedCnf`].
///
/// Unit propagation runs to a fixpoint after every decision; conflicts undo the trail up to the
/// most recent decision whose other value has not been tried yet. Variables are decided in
/// increasing order, false first, so the search is deterministic.
#[derive(Debug, Default)]
pub struct DpllSolver {
    statistics: DpllStatistics,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DpllStatistics {
    pub decisions: u64,
    pub conflicts: u64,
    pub propagations: u64,
}

impl DpllSolver {
    pub fn new() -> DpllSolver {
        DpllSolver::default()
    }

    /// The counters accumulated over every call to [`SatSolver::solve`].
    pub fn statistics(&self) -> DpllStatistics {
        self.statistics
    }
}

impl SatSolver for DpllSolver {
    fn solve(&mut self, cnf: &PedCnf) -> Result<SolverOutcome, SolverError> {
        let mut search = Search::new(cnf);
        let outcome = search.run(&mut self.statistics);
        debug!(
            "DPLL search finished: {} decisions, {} conflicts, {} propagations",
            self.statistics.decisions, self.statistics.conflicts, self.statistics.propagations
        );
        Ok(outcome)
    }
}

#[derive(Clone, Copy, Debug)]
enum TrailEntry {
    Decision { variable: usize, flipped: bool },
    Implied { variable: usize },
}

impl TrailEntry {
    fn variable(self) -> usize {
        match self {
            TrailEntry::Decision { variable, .. } | TrailEntry::Implied { variable } => variable,
        }
    }
}

#[derive(Debug)]
struct Search {
    clauses: Vec<Vec<i32>>,
    xor_clauses: Vec<Vec<i32>>,
    /// Indexed by variable; position 0 is unused.
    values: Vec<Option<bool>>,
    trail: Vec<TrailEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClauseState {
    Satisfied,
    Conflicting,
    Unit(i32),
    Open,
}

impl Search {
    fn new(cnf: &PedCnf) -> Search {
        Search {
            clauses: cnf
                .clauses()
                .iter()
                .map(|clause| clause.iter().copied().collect())
                .collect(),
            xor_clauses: cnf
                .xor_clauses()
                .iter()
                .map(|clause| clause.iter().copied().collect())
                .collect(),
            values: vec![None; cnf.num_variables() + 1],
            trail: Vec::new(),
        }
    }

    fn run(&mut self, statistics: &mut DpllStatistics) -> SolverOutcome {
        loop {
            if !self.propagate(statistics) {
                statistics.conflicts += 1;
                if !self.backtrack() {
                    return SolverOutcome::Unsatisfiable;
                }
                continue;
            }

            match self.next_unassigned() {
                Some(variable) => {
                    statistics.decisions += 1;
                    self.values[variable] = Some(false);
                    self.trail.push(TrailEntry::Decision {
                        variable,
                        flipped: false,
                    });
                }
                None => {
                    let values = self.values[1..]
                        .iter()
                        .map(|value| value.unwrap_or(false))
                        .collect::<Vec<_>>();
                    return SolverOutcome::Satisfiable(Assignment::from_values(&values));
                }
            }
        }
    }

    /// Assigns every forced literal. Returns false on a conflict.
    fn propagate(&mut self, statistics: &mut DpllStatistics) -> bool {
        loop {
            let mut changed = false;

            for index in 0..self.clauses.len() {
                match self.clause_state(&self.clauses[index]) {
                    ClauseState::Conflicting => return false,
                    ClauseState::Unit(literal) => {
                        self.imply(literal);
                        statistics.propagations += 1;
                        changed = true;
                    }
                    ClauseState::Satisfied | ClauseState::Open => {}
                }
            }

            for index in 0..self.xor_clauses.len() {
                match self.xor_clause_state(&self.xor_clauses[index]) {
                    ClauseState::Conflicting => return false,
                    ClauseState::Unit(literal) => {
                        self.imply(literal);
                        statistics.propagations += 1;
                        changed = true;
                    }
                    ClauseState::Satisfied | ClauseState::Open => {}
                }
            }

            if !changed {
                return true;
            }
        }
    }

    fn clause_state(&self, clause: &[i32]) -> ClauseState {
        let mut unassigned = None;
        let mut num_unassigned = 0;

        for &literal in clause {
            match self.literal_value(literal) {
                Some(true) => return ClauseState::Satisfied,
                Some(false) => {}
                None => {
                    num_unassigned += 1;
                    unassigned = Some(literal);
                }
            }
        }

        match (num_unassigned, unassigned) {
            (0, _) => ClauseState::Conflicting,
            (1, Some(literal)) => ClauseState::Unit(literal),
            _ => ClauseState::Open,
        }
    }

    /// An XOR-clause holds when an odd number of its literals are true.
    fn xor_clause_state(&self, clause: &[i32]) -> ClauseState {
        let mut unassigned = None;
        let mut num_unassigned = 0;
        let mut parity = false;

        for &literal in clause {
            match self.literal_value(literal) {
                Some(value) => parity ^= value,
                None => {
                    num_unassigned += 1;
                    unassigned = Some(literal);
                }
            }
        }

        match (num_unassigned, unassigned) {
            (0, _) if parity => ClauseState::Satisfied,
            (0, _) => ClauseState::Conflicting,
            (1, Some(literal)) if parity => ClauseState::Unit(-literal),
            (1, Some(literal)) => ClauseState::Unit(literal),
            _ => ClauseState::Open,
        }
    }

    fn literal_value(&self, literal: i32) -> Option<bool> {
        self.values[literal.unsigned_abs() as usize].map(|value| value == (literal > 0))
    }

    fn imply(&mut self, literal: i32) {
        let variable = literal.unsigned_abs() as usize;
        zrhc_assert_simple!(self.values[variable].is_none());
        self.values[variable] = Some(literal > 0);
        self.trail.push(TrailEntry::Implied { variable });
    }

    /// Undoes the trail up to the last decision which has not been flipped and flips it.
    /// Returns false when no such decision exists.
    fn backtrack(&mut self) -> bool {
        while let Some(entry) = self.trail.pop() {
            let variable = entry.variable();
            let value = self.values[variable].take();

            if let TrailEntry::Decision {
                flipped: false,
                variable,
            } = entry
            {
                self.values[variable] = value.map(|value| !value);
                self.trail.push(TrailEntry::Decision {
                    variable,
                    flipped: true,
                });
                return true;
            }
        }

        false
    }

    fn next_unassigned(&self) -> Option<usize> {
        self.values
            .iter()
            .skip(1)
            .position(Option::is_none)
            .map(|position| position + 1)
    }
}
