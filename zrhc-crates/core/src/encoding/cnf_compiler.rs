//! Compilation of parity equations into clauses.
//!
//! A parity equation `l_1 ^ ... ^ l_k = 1` is expanded into the `2^(k-1)` clauses which forbid
//! every assignment of even weight; `l_1 ^ ... ^ l_k = 0` into those which forbid every
//! assignment of odd weight. In [`EncodingMode::Extended`] the equation is stored as a single
//! XOR-clause instead. Conjunctions of two variables are replaced by a Tseitin variable.
use itertools::Itertools;

use super::Expression;
use crate::cnf::Clause;
use crate::cnf::EncodingMode;
use crate::cnf::PedCnf;
use crate::error::EncodingError;
use crate::zrhc_assert_moderate;

/// Adds the clauses enforcing `expression` to the store.
pub fn add_anf_constraint(expression: &Expression, cnf: &mut PedCnf) -> Result<(), EncodingError> {
    match expression {
        Expression::Variable(variable) => {
            let _ = cnf.add_clause(Clause::from([*variable as i32]));
            Ok(())
        }
        Expression::Xor(children) => add_parity_constraint(expression, children, true, cnf),
        Expression::Not(inner) => match inner.as_ref() {
            Expression::Variable(variable) => {
                let _ = cnf.add_clause(Clause::from([-(*variable as i32)]));
                Ok(())
            }
            Expression::Xor(children) => add_parity_constraint(expression, children, false, cnf),
            Expression::Not(_) | Expression::And(_, _) => Err(unsupported(expression)),
        },
        Expression::And(_, _) => Err(unsupported(expression)),
    }
}

/// The clauses satisfied exactly by the assignments of odd weight over `literals`.
pub fn odd_parity_clauses(literals: &[i32]) -> Vec<Clause> {
    clauses_negating_subsets(literals, 0)
}

/// The clauses satisfied exactly by the assignments of even weight over `literals`.
pub fn even_parity_clauses(literals: &[i32]) -> Vec<Clause> {
    clauses_negating_subsets(literals, 1)
}

/// One clause per subset of positions whose size has the parity of `first_size`, equal to
/// `literals` with the chosen positions negated. Each such clause forbids exactly the assignment
/// that makes the chosen literals true and the others false.
fn clauses_negating_subsets(literals: &[i32], first_size: usize) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(1 << literals.len().saturating_sub(1));

    for size in (first_size..=literals.len()).step_by(2) {
        if size == 0 {
            clauses.push(literals.iter().copied().collect());
            continue;
        }

        for positions in (0..literals.len()).combinations(size) {
            let mut clause = literals.to_vec();
            for position in positions {
                clause[position] = -clause[position];
            }
            clauses.push(clause.into_iter().collect());
        }
    }

    clauses
}

/// Adds `terms[0] ^ ... ^ terms[k - 1] = odd`, where every term is a variable or a conjunction
/// of two variables.
fn add_parity_constraint(
    equation: &Expression,
    terms: &[Expression],
    odd: bool,
    cnf: &mut PedCnf,
) -> Result<(), EncodingError> {
    let mut literals = basic_literals(terms, cnf).ok_or_else(|| unsupported(equation))?;
    if literals.is_empty() {
        return Err(unsupported(equation));
    }

    match cnf.mode() {
        EncodingMode::Plain => {
            let clauses = if odd {
                odd_parity_clauses(&literals)
            } else {
                even_parity_clauses(&literals)
            };
            for clause in clauses {
                zrhc_assert_moderate!(clause.len() == literals.len());
                let _ = cnf.add_clause(clause);
            }
        }
        EncodingMode::Extended => {
            if !odd {
                literals[0] = -literals[0];
            }
            let clause: Clause = literals.iter().copied().collect();
            zrhc_assert_moderate!(clause.len() == literals.len());
            let _ = cnf.add_xor_clause(clause);
        }
    }

    Ok(())
}

fn basic_literals(terms: &[Expression], cnf: &mut PedCnf) -> Option<Vec<i32>> {
    terms
        .iter()
        .map(|term| match term {
            Expression::Variable(variable) => Some(*variable as i32),
            Expression::And(first, second) => Some(conjunction_literal(*first, *second, cnf)),
            Expression::Not(_) | Expression::Xor(_) => None,
        })
        .collect()
}

/// The Tseitin variable `d <-> first & second`. The defining clauses are added when `d` is
/// allocated.
fn conjunction_literal(first: u32, second: u32, cnf: &mut PedCnf) -> i32 {
    let (dummy, is_new) = cnf.allocate_dummy(first, second);
    let dummy = dummy as i32;

    if is_new {
        let low = first.min(second) as i32;
        let high = first.max(second) as i32;
        let _ = cnf.add_clause(Clause::from([low, -dummy]));
        let _ = cnf.add_clause(Clause::from([high, -dummy]));
        let _ = cnf.add_clause(Clause::from([-low, -high, dummy]));
    }

    dummy
}

fn unsupported(expression: &Expression) -> EncodingError {
    EncodingError::UnsupportedExpression(expression.to_string())
}
