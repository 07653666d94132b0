//! Helpers to run the command-line solver in integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A scratch directory holding the files of one test run.
#[derive(Debug)]
pub(crate) struct Workspace {
    pub(crate) root: PathBuf,
}

impl Workspace {
    pub(crate) fn new(name: &str) -> Workspace {
        let root = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
        if root.exists() {
            std::fs::remove_dir_all(&root).expect("Failed to clean the scratch directory.");
        }
        std::fs::create_dir_all(&root).expect("Failed to create the scratch directory.");
        Workspace { root }
    }

    pub(crate) fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub(crate) fn write(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.path(file_name);
        std::fs::write(&path, contents).expect("Failed to write the input file.");
        path
    }

    pub(crate) fn read(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.path(file_name)).expect("Failed to read the output file.")
    }

    /// Runs the solver inside the scratch directory and returns its exit code.
    pub(crate) fn run_solver<'a>(&self, args: impl IntoIterator<Item = &'a str>) -> i32 {
        let solver = PathBuf::from(env!("CARGO_BIN_EXE_zrhc-solver"));
        let mut command = Command::new(solver);
        for arg in args {
            let _ = command.arg(arg);
        }

        let mut child = command
            .current_dir(&self.root)
            .stdout(File::create(self.path("stdout.log")).expect("Failed to create log file."))
            .stderr(File::create(self.path("stderr.log")).expect("Failed to create error file."))
            .stdin(Stdio::null())
            .spawn()
            .expect("Failed to run solver.");

        match child.wait_timeout(TEST_TIMEOUT) {
            Ok(None) => {
                let _ = child.kill();
                panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
            }
            Ok(Some(status)) => status
                .code()
                .unwrap_or_else(|| panic!("solver was terminated by a signal: {status}")),
            Err(e) => panic!("error starting solver: {e}"),
        }
    }
}

pub(crate) fn exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}
