use log::debug;
use log::info;
use log::trace;

use super::add_anf_constraint;
use super::Expression;
use crate::cnf::PedCnf;
use crate::error::EncodingError;
use crate::pedigree::ParentEdge;
use crate::pedigree::ParentRole;
use crate::pedigree::Pedigree;

/// Encodes every parent-child relationship of `pedigree` into `cnf`.
///
/// Children are considered in creation order, the father before the mother, and loci in
/// increasing order; this order fixes the numbering of the variables.
pub fn encode_pedigree(pedigree: &Pedigree, cnf: &mut PedCnf) -> Result<(), EncodingError> {
    for edge in pedigree.parent_edges() {
        trace!(
            "Considering individual {} --> {} {}",
            edge.child,
            edge.role,
            edge.parent
        );
        for locus in 0..pedigree.genotype_length() {
            if let Some(equation) = build_equation(pedigree, cnf, edge, locus)? {
                trace!("  locus = {locus}, ANF: {equation}");
                add_anf_constraint(&equation, cnf)?;
            } else {
                trace!("  locus = {locus}, ANF: empty");
            }
        }
    }

    if log::log_enabled!(log::Level::Trace) {
        for (index, variable) in cnf.variables() {
            trace!("{index:>4})  {variable}");
        }
    }
    debug!(
        "SAT variables ({:>4}), SAT clauses ({:>4})",
        cnf.num_variables(),
        cnf.clause_count()
    );
    info!(
        "The SAT instance is composed by {:>8} variables and {:>8} clauses",
        cnf.num_variables(),
        cnf.clause_count()
    );

    Ok(())
}

/// Builds the equation relating the genotypes of `edge` at `locus`.
///
/// The equation states that the allele the parent transmits equals the allele the child
/// inherits. A homozygous genotype contributes a constant, any other genotype contributes its
/// phase variable `h`. A heterozygous parent adds the strand variable `s`, a non-genotyped one the
/// conjunction of `s` and its zygosity variable `w`. On the child side, the maternal allele is
/// the complement of the paternal one when the child is heterozygous, and depends on `w` when it
/// is not genotyped.
///
/// Returns [`None`] when the genotypes are homozygous on both sides and agree.
pub fn build_equation(
    pedigree: &Pedigree,
    cnf: &mut PedCnf,
    edge: ParentEdge,
    locus: usize,
) -> Result<Option<Expression>, EncodingError> {
    let parent_genotype = pedigree.individual(edge.parent).genotype(locus);
    let child_genotype = pedigree.individual(edge.child).genotype(locus);

    let mut terms = Vec::new();
    let mut constant = 0_u8;

    match parent_genotype.homozygous_parity() {
        Some(parity) => constant += parity,
        None => {
            terms.push(Expression::Variable(cnf.get_h(edge.parent, locus)));
            let strand = cnf.get_s(edge.parent, edge.child);
            if parent_genotype.is_heterozygous() {
                terms.push(Expression::Variable(strand));
            } else {
                terms.push(Expression::And(strand, cnf.get_w(edge.parent, locus)));
            }
        }
    }

    match child_genotype.homozygous_parity() {
        Some(parity) => constant += parity,
        None => {
            terms.push(Expression::Variable(cnf.get_h(edge.child, locus)));
            if edge.role == ParentRole::Mother {
                if child_genotype.is_heterozygous() {
                    constant += 1;
                } else {
                    terms.push(Expression::Variable(cnf.get_w(edge.child, locus)));
                }
            }
        }
    }

    let odd = constant % 2 == 1;
    let equation = match terms.len() {
        0 if odd => {
            return Err(EncodingError::InconsistentHomozygousGenotypes {
                parent: edge.parent,
                child: edge.child,
                locus,
            })
        }
        0 => None,
        1 => {
            let term = terms.remove(0);
            Some(if odd { term } else { term.negate() })
        }
        _ => {
            let parity = Expression::Xor(terms);
            Some(if odd { parity } else { parity.negate() })
        }
    };

    Ok(equation)
}
