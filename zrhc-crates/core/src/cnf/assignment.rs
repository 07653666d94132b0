use std::fmt::Display;
use std::fmt::Formatter;
use std::io::BufRead;
use std::io::Write;

use crate::error::ResultParseError;
use crate::zrhc_assert_simple;

/// A (possibly partial) truth assignment, given as the literals which are true.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    literals: Vec<i32>,
}

impl Assignment {
    pub fn from_literals(literals: Vec<i32>) -> Assignment {
        zrhc_assert_simple!(literals.iter().all(|&literal| literal != 0));
        Assignment { literals }
    }

    /// The complete assignment in which variable `i + 1` takes `values[i]`.
    pub fn from_values(values: &[bool]) -> Assignment {
        let literals = (1..)
            .zip(values)
            .map(|(variable, &value): (i32, &bool)| if value { variable } else { -variable })
            .collect();
        Assignment { literals }
    }

    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    /// The value of `variable`; variables the assignment does not mention are false.
    pub fn value(&self, variable: u32) -> bool {
        self.literals
            .iter()
            .rev()
            .find(|literal| literal.unsigned_abs() == variable)
            .is_some_and(|&literal| literal > 0)
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for literal in &self.literals {
            write!(f, "{literal} ")?;
        }
        write!(f, "0")
    }
}

/// The answer of a SAT solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolverOutcome {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SolverOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolverOutcome::Satisfiable(_))
    }

    /// Writes the outcome in the MiniSat result format: a `SAT` or `UNSAT` line, followed by the
    /// zero-terminated assignment when satisfiable.
    pub fn write_result(&self, out: &mut impl Write) -> std::io::Result<()> {
        match self {
            SolverOutcome::Satisfiable(assignment) => {
                writeln!(out, "SAT")?;
                writeln!(out, "{assignment}")
            }
            SolverOutcome::Unsatisfiable => writeln!(out, "UNSAT"),
        }
    }
}

/// Parses a result in the MiniSat format.
///
/// The first non-empty line is `SAT` or `UNSAT`. After `SAT` come whitespace-separated signed
/// literals terminated by `0`; anything after the terminator is ignored.
pub fn parse_solver_result(source: impl BufRead) -> Result<SolverOutcome, ResultParseError> {
    let mut lines = source.lines();

    let status = loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                let line = line.trim();
                if !line.is_empty() {
                    break line.to_owned();
                }
            }
            None => return Err(ResultParseError::Empty),
        }
    };

    match status.as_str() {
        "UNSAT" => return Ok(SolverOutcome::Unsatisfiable),
        "SAT" => {}
        _ => return Err(ResultParseError::UnknownStatus(status)),
    }

    let mut literals = Vec::new();
    let mut seen_token = false;
    for line in lines {
        for token in line?.split_whitespace() {
            seen_token = true;
            let literal = token
                .parse::<i32>()
                .map_err(|_| ResultParseError::InvalidLiteral(token.to_owned()))?;
            if literal == 0 {
                return Ok(SolverOutcome::Satisfiable(Assignment::from_literals(
                    literals,
                )));
            }
            literals.push(literal);
        }
    }

    if seen_token {
        Err(ResultParseError::UnterminatedAssignment)
    } else {
        Err(ResultParseError::MissingAssignment)
    }
}
