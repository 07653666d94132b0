use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::ErrorKind;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use log::debug;
use log::info;
use log::warn;

use super::SatSolver;
use crate::cnf::parse_solver_result;
use crate::cnf::PedCnf;
use crate::cnf::SolverOutcome;
use crate::error::SolverError;

/// Runs a MiniSat-compatible program on a DIMACS file.
///
/// The program is called as `<program> <arguments...> <instance> <result>` and is expected to
/// write its answer to the result file. Its exit code is not inspected: solvers commonly exit
/// with 10 or 20. If no result file exists after the program terminates, the instance is
/// considered unsatisfiable.
#[derive(Clone, Debug)]
pub struct ExternalSolver {
    program: String,
    arguments: Vec<String>,
    instance_path: PathBuf,
    result_path: PathBuf,
    notes: Vec<String>,
}

impl ExternalSolver {
    pub fn new(
        program: impl Into<String>,
        instance_path: impl Into<PathBuf>,
        result_path: impl Into<PathBuf>,
    ) -> ExternalSolver {
        ExternalSolver {
            program: program.into(),
            arguments: Vec::new(),
            instance_path: instance_path.into(),
            result_path: result_path.into(),
            notes: Vec::new(),
        }
    }

    /// Arguments passed to the program before the instance and result paths.
    pub fn with_arguments(mut self, arguments: impl IntoIterator<Item = String>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    /// Comment lines written at the top of the instance.
    pub fn with_notes(mut self, notes: impl IntoIterator<Item = String>) -> Self {
        self.notes.extend(notes);
        self
    }

    fn write_instance(&self, cnf: &PedCnf) -> Result<(), SolverError> {
        let mut out = BufWriter::new(File::create(&self.instance_path)?);
        cnf.write_dimacs(&mut out, &self.notes)?;
        out.flush()?;
        Ok(())
    }

    fn remove_stale_result(&self) -> Result<(), SolverError> {
        match std::fs::remove_file(&self.result_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SatSolver for ExternalSolver {
    fn solve(&mut self, cnf: &PedCnf) -> Result<SolverOutcome, SolverError> {
        self.remove_stale_result()?;
        self.write_instance(cnf)?;

        info!(
            "Invoking the SAT solver '{}' on '{}'",
            self.program,
            self.instance_path.display()
        );
        let status = Command::new(&self.program)
            .args(&self.arguments)
            .arg(&self.instance_path)
            .arg(&self.result_path)
            .status()
            .map_err(|source| SolverError::Launch {
                program: self.program.clone(),
                source,
            })?;
        debug!("The SAT solver terminated with {status}");

        if !self.result_path.is_file() {
            warn!(
                "The SAT solver did not produce the result file '{}', assuming UNSAT",
                self.result_path.display()
            );
            return Ok(SolverOutcome::Unsatisfiable);
        }

        let result = BufReader::new(File::open(&self.result_path)?);
        Ok(parse_solver_result(result)?)
    }
}
