mod result;

use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use log::error;
use log::info;
use log::LevelFilter;
use result::CliError;
use result::CliResult;
use zrhc_solver::cnf::EncodingMode;
use zrhc_solver::create_sat_instance;
use zrhc_solver::io::GenotypeWriter;
use zrhc_solver::read_sat_results;
use zrhc_solver::solve_pedigree;
use zrhc_solver::solvers::DpllSolver;
use zrhc_solver::solvers::ExternalSolver;
use zrhc_solver::write_haplotypes;
use zrhc_solver::ZrhcOptions;
use zrhc_solver::ZrhcOutcome;

/// The exit code reported when no zero-recombinant haplotype configuration exists.
const UNSATISFIABLE_EXIT_CODE: i32 = 20;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// What to compute:
    ///  - 'create' writes the SAT instance of the pedigree,
    ///  - 'read' decodes the result of a SAT solver run on that instance into haplotypes,
    ///  - 'solve' does both, with the embedded solver or with '--solver-command'.
    #[clap(verbatim_doc_comment)]
    #[arg(value_enum)]
    mode: Mode,

    /// The genotyped pedigree, in the PLINK format.
    #[arg(short, long, default_value = "pedigree.ped")]
    pedigree: PathBuf,

    /// The SAT instance, in the DIMACS format.
    #[arg(short, long, default_value = "instance.cnf")]
    sat: PathBuf,

    /// The result of the SAT solver, in the MiniSat format.
    #[arg(short, long, default_value = "sat-result.txt")]
    result: PathBuf,

    /// Where the haplotype configuration is written.
    #[arg(short = 'H', long, default_value = "haplotypes.txt")]
    haplotypes: PathBuf,

    /// Where the genotypes, including the imputed ones, are written.
    ///
    /// Nothing is written if this option is not provided.
    #[arg(short, long)]
    genotypes: Option<PathBuf>,

    /// How parity constraints are represented in the SAT instance.
    ///
    /// The 'extended' syntax keeps them as XOR-clauses, which only some solvers accept.
    #[arg(long, value_enum, default_value_t)]
    encoding: EncodingMode,

    /// A comment line written at the top of the SAT instance. Can be repeated.
    #[arg(long = "note")]
    notes: Vec<String>,

    /// A MiniSat-compatible program used in the 'solve' mode instead of the embedded solver.
    ///
    /// It is called with the paths of the SAT instance and of the result file.
    #[arg(long)]
    solver_command: Option<String>,

    /// Log more details; give twice to log every equation.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Write the SAT instance of the pedigree.
    Create,
    /// Decode the result of a SAT solver into haplotypes.
    Read,
    /// Create, solve and decode the SAT instance.
    Solve,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verdict {
    Done,
    Unsatisfiable,
}

fn configure_logging(verbose: u8, quiet: bool) {
    let level_filter = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .format(move |buf, record| writeln!(buf, "[{:<5}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    match run() {
        Ok(Verdict::Done) => {}
        Ok(Verdict::Unsatisfiable) => std::process::exit(UNSATISFIABLE_EXIT_CODE),
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> CliResult<Verdict> {
    let args = Args::parse();
    configure_logging(args.verbose, args.quiet);

    let options = ZrhcOptions {
        encoding: args.encoding,
        notes: if args.notes.is_empty() {
            ZrhcOptions::default().notes
        } else {
            args.notes.clone()
        },
        ..Default::default()
    };

    info!("ZRHC-* {}", env!("CARGO_PKG_VERSION"));
    match args.mode {
        Mode::Create => {
            let pedigree = open_file(&args.pedigree)?;
            let mut out = create_file(&args.sat)?;
            create_sat_instance(pedigree, &mut out, &options)?;
            Ok(Verdict::Done)
        }
        Mode::Read => {
            let outcome = read_sat_results(
                open_file(&args.pedigree)?,
                open_file(&args.result)?,
                &options,
            )?;
            save_outcome(outcome, &args, &options)
        }
        Mode::Solve => {
            let pedigree = open_file(&args.pedigree)?;
            let outcome = match args.solver_command.as_ref() {
                Some(program) => {
                    let mut solver = ExternalSolver::new(program, &args.sat, &args.result)
                        .with_notes(options.notes.clone());
                    solve_pedigree(pedigree, &mut solver, &options)?
                }
                None => {
                    let mut solver = DpllSolver::new();
                    let outcome = solve_pedigree(pedigree, &mut solver, &options)?;
                    let statistics = solver.statistics();
                    info!(
                        "Embedded solver: {} decisions, {} conflicts",
                        statistics.decisions, statistics.conflicts
                    );
                    outcome
                }
            };
            save_outcome(outcome, &args, &options)
        }
    }
}

fn save_outcome(outcome: ZrhcOutcome, args: &Args, options: &ZrhcOptions) -> CliResult<Verdict> {
    let pedigree = match outcome {
        ZrhcOutcome::Haplotyped(pedigree) => pedigree,
        ZrhcOutcome::Unsatisfiable => return Ok(Verdict::Unsatisfiable),
    };

    let mut out = create_file(&args.haplotypes)?;
    write_haplotypes(&pedigree, &mut out, options)?;

    if let Some(path) = args.genotypes.as_ref() {
        info!("Saving the genotypes...");
        let mut out = create_file(path)?;
        GenotypeWriter::default().write_pedigree(&pedigree, &mut out)?;
        out.flush()?;
    }

    Ok(Verdict::Done)
}

fn open_file(path: &Path) -> CliResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| CliError::file_access(path, e))
}

fn create_file(path: &Path) -> CliResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| CliError::file_access(path, e))
}
