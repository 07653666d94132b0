use std::io::BufRead;
use std::io::Write;

use log::info;
use log::warn;

use super::ZrhcOptions;
use crate::cnf::parse_solver_result;
use crate::cnf::PedCnf;
use crate::cnf::SolverOutcome;
use crate::decoding::compute_zrhc;
use crate::encoding::encode_pedigree;
use crate::error::EncodingError;
use crate::error::ZrhcError;
use crate::error::ZrhcResult;
use crate::io::read_pedigree;
use crate::pedigree::Pedigree;
use crate::solvers::SatSolver;

/// The result of searching a zero-recombinant haplotype configuration.
#[derive(Clone, Debug)]
pub enum ZrhcOutcome {
    /// The pedigree, with haplotypes assigned and missing genotypes imputed.
    Haplotyped(Pedigree),
    /// The genotypes admit no zero-recombinant haplotype configuration.
    Unsatisfiable,
}

impl ZrhcOutcome {
    pub fn is_haplotyped(&self) -> bool {
        matches!(self, ZrhcOutcome::Haplotyped(_))
    }
}

/// Reads the single family of a pedigree file.
pub fn read_single_family(pedigree_input: impl BufRead) -> ZrhcResult<Pedigree> {
    info!("Reading the pedigree...");
    let parsed = read_pedigree(pedigree_input)?;
    if !parsed.skipped_lines.is_empty() {
        warn!(
            "{} lines of the pedigree have been skipped",
            parsed.skipped_lines.len()
        );
    }

    let pedigree = parsed.pedigree.into_single_family()?;
    info!(
        "The pedigree has {} individuals and genotypes of length {}",
        pedigree.len(),
        pedigree.genotype_length()
    );
    Ok(pedigree)
}

/// Reads the pedigree and builds the corresponding SAT instance.
pub fn prepare_pedigree_and_sat(
    pedigree_input: impl BufRead,
    options: &ZrhcOptions,
) -> ZrhcResult<(Pedigree, PedCnf)> {
    let pedigree = read_single_family(pedigree_input)?;

    info!("Preparing the SAT instance...");
    let mut cnf = PedCnf::new(options.encoding);
    encode_pedigree(&pedigree, &mut cnf)?;

    Ok((pedigree, cnf))
}

/// Reads a pedigree and writes the SAT instance encoding its zero-recombinant haplotype
/// configurations in the DIMACS format.
pub fn create_sat_instance(
    pedigree_input: impl BufRead,
    dimacs_output: &mut impl Write,
    options: &ZrhcOptions,
) -> ZrhcResult<()> {
    let (_, cnf) = prepare_pedigree_and_sat(pedigree_input, options)?;

    info!("Saving the SAT instance...");
    cnf.write_dimacs(dimacs_output, &options.notes)?;
    dimacs_output.flush()?;

    Ok(())
}

/// Rebuilds the SAT instance of a pedigree and decodes the result of a solver run on it.
pub fn read_sat_results(
    pedigree_input: impl BufRead,
    result_input: impl BufRead,
    options: &ZrhcOptions,
) -> ZrhcResult<ZrhcOutcome> {
    let (pedigree, mut cnf) = prepare_pedigree_and_sat(pedigree_input, options)?;

    info!("Reading the SAT results...");
    let outcome = parse_solver_result(result_input)?;
    decode_outcome(pedigree, &mut cnf, outcome, options)
}

/// As [`read_sat_results`], writing the haplotypes when a configuration exists.
///
/// Returns whether a configuration has been written.
pub fn compute_hc_from_sat_results(
    pedigree_input: impl BufRead,
    result_input: impl BufRead,
    haplotype_output: &mut impl Write,
    options: &ZrhcOptions,
) -> ZrhcResult<bool> {
    match read_sat_results(pedigree_input, result_input, options)? {
        ZrhcOutcome::Haplotyped(pedigree) => {
            write_haplotypes(&pedigree, haplotype_output, options)?;
            Ok(true)
        }
        ZrhcOutcome::Unsatisfiable => Ok(false),
    }
}

/// Searches a zero-recombinant haplotype configuration of a pedigree with the given solver.
///
/// Homozygous genotypes which contradict each other across a parent-child link are reported as
/// [`ZrhcOutcome::Unsatisfiable`] without running the solver.
pub fn solve_pedigree(
    pedigree_input: impl BufRead,
    solver: &mut impl SatSolver,
    options: &ZrhcOptions,
) -> ZrhcResult<ZrhcOutcome> {
    let pedigree = read_single_family(pedigree_input)?;

    info!("Preparing the SAT instance...");
    let mut cnf = PedCnf::new(options.encoding);
    match encode_pedigree(&pedigree, &mut cnf) {
        Ok(()) => {}
        Err(e @ EncodingError::InconsistentHomozygousGenotypes { .. }) => {
            info!("{e}");
            info!("No zero-recombinant haplotype configuration exists.");
            return Ok(ZrhcOutcome::Unsatisfiable);
        }
        Err(e) => return Err(e.into()),
    }

    info!("Solving the SAT instance...");
    let outcome = solver.solve(&cnf)?;
    decode_outcome(pedigree, &mut cnf, outcome, options)
}

/// Writes the haplotypes of a decoded pedigree.
pub fn write_haplotypes(
    pedigree: &Pedigree,
    haplotype_output: &mut impl Write,
    options: &ZrhcOptions,
) -> ZrhcResult<()> {
    info!("Saving the haplotype configuration...");
    options
        .haplotype_writer()
        .write_pedigree(pedigree, haplotype_output)?;
    haplotype_output.flush()?;
    Ok(())
}

fn decode_outcome(
    mut pedigree: Pedigree,
    cnf: &mut PedCnf,
    outcome: SolverOutcome,
    options: &ZrhcOptions,
) -> ZrhcResult<ZrhcOutcome> {
    let assignment = match outcome {
        SolverOutcome::Satisfiable(assignment) => assignment,
        SolverOutcome::Unsatisfiable => {
            info!("No zero-recombinant haplotype configuration exists.");
            return Ok(ZrhcOutcome::Unsatisfiable);
        }
    };

    cnf.apply_assignment(&assignment)?;
    if !cnf.is_satisfying_assignment() {
        return Err(ZrhcError::invariant_violation(
            "the assignment returned by the SAT solver does not satisfy the instance",
        ));
    }

    info!("Computing the haplotype configuration...");
    compute_zrhc(&mut pedigree, cnf);

    if options.validate {
        pedigree.validate()?;
        info!("The haplotype configuration is complete, consistent and zero-recombinant.");
    }

    Ok(ZrhcOutcome::Haplotyped(pedigree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Assignment;
    use crate::cnf::EncodingMode;
    use crate::error::PedigreeError;
    use crate::error::SolverError;
    use crate::solvers::DpllSolver;

    const TRIO: &str = "0 1 0 0 1 p 1 2 1 1\n\
                        0 2 0 0 2 p 1 1 1 2\n\
                        0 3 1 2 1 p 1 1 1 2\n";

    /// Answers with a fixed outcome, whatever the instance.
    #[derive(Debug)]
    struct FixedSolver(SolverOutcome);

    impl SatSolver for FixedSolver {
        fn solve(&mut self, _: &PedCnf) -> Result<SolverOutcome, SolverError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn instances_start_with_the_notes() {
        let options = ZrhcOptions {
            notes: vec!["first".to_owned(), "second".to_owned()],
            ..Default::default()
        };
        let mut out = Vec::new();

        create_sat_instance(TRIO.as_bytes(), &mut out, &options).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("c first\nc second\nc\n"));
    }

    #[test]
    fn solving_writes_a_valid_configuration() {
        for encoding in [EncodingMode::Plain, EncodingMode::Extended] {
            let options = ZrhcOptions {
                encoding,
                ..Default::default()
            };

            let outcome =
                solve_pedigree(TRIO.as_bytes(), &mut DpllSolver::new(), &options).unwrap();

            let ZrhcOutcome::Haplotyped(pedigree) = outcome else {
                panic!("the trio has a zero-recombinant configuration");
            };
            assert_eq!(pedigree.validate(), Ok(()));
        }
    }

    #[test]
    fn contradicting_homozygous_genotypes_are_unsatisfiable() {
        let pedigree = "0 1 0 0 1 p 1 1\n\
                        0 2 0 0 2 p 1 1\n\
                        0 3 1 2 1 p 2 2\n";

        let outcome = solve_pedigree(
            pedigree.as_bytes(),
            &mut DpllSolver::new(),
            &ZrhcOptions::default(),
        )
        .unwrap();

        assert!(!outcome.is_haplotyped());
        let mut out = Vec::new();
        let result = create_sat_instance(pedigree.as_bytes(), &mut out, &ZrhcOptions::default());
        assert!(matches!(result, Err(ZrhcError::Encoding(_))));
    }

    #[test]
    fn unsatisfiable_results_write_nothing() {
        let mut out = Vec::new();

        let written = compute_hc_from_sat_results(
            TRIO.as_bytes(),
            "UNSAT\n".as_bytes(),
            &mut out,
            &ZrhcOptions::default(),
        )
        .unwrap();

        assert!(!written);
        assert!(out.is_empty());
    }

    #[test]
    fn assignments_violating_the_instance_are_rejected() {
        let mut all_false = FixedSolver(SolverOutcome::Satisfiable(Assignment::default()));
        // The maternal equation at the second locus has odd parity.
        let result = solve_pedigree(TRIO.as_bytes(), &mut all_false, &ZrhcOptions::default());

        assert!(matches!(result, Err(ZrhcError::InvariantViolation(_))));
    }

    #[test]
    fn self_parenting_rows_do_not_prevent_writing() {
        let pedigree = "0 1 1 2 1 p 1 1\n\
                        0 2 0 0 2 p 1 1\n";

        let outcome = solve_pedigree(
            pedigree.as_bytes(),
            &mut DpllSolver::new(),
            &ZrhcOptions::default(),
        )
        .unwrap();

        let ZrhcOutcome::Haplotyped(pedigree) = outcome else {
            panic!("a pedigree without links has a zero-recombinant configuration");
        };
        let individual = pedigree.individual(pedigree.get_by_id("1").unwrap());
        assert_eq!(individual.father(), None);
        let mut out = Vec::new();
        write_haplotypes(&pedigree, &mut out, &ZrhcOptions::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn pedigrees_must_have_exactly_one_family() {
        let result = read_single_family("a 1 0 0 1 p 1 1\nb 1 0 0 1 p 1 1\n".as_bytes());
        assert!(matches!(
            result,
            Err(ZrhcError::Pedigree(PedigreeError::MoreThanOneFamily(2)))
        ));

        let result = read_single_family("".as_bytes());
        assert!(matches!(
            result,
            Err(ZrhcError::Pedigree(PedigreeError::NoFamily))
        ));
    }
}
