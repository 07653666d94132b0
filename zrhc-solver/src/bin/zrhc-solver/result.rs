use std::path::Path;

use thiserror::Error;
use zrhc_solver::error::ZrhcError;

pub(crate) type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Cannot access the file '{path}', more details: {source}")]
    FileAccess {
        path: String,
        source: std::io::Error,
    },
    #[error("{0}")]
    Zrhc(#[from] ZrhcError),
}

impl CliError {
    pub(crate) fn file_access(path: &Path, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: format!("{}", path.display()),
            source,
        }
    }
}
