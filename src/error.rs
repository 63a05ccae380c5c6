use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors produced while benchmarking an external compression tool.
///
/// Tool failures always carry the exact command line and the tool's own
/// stderr, so a broken install of one specific utility can be diagnosed
/// without guessing which step failed.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("error running command `{command}`\n\n'{stderr}'")]
    CommandFailed { command: String, stderr: String },

    #[error("command `{command}` did not finish within {timeout:?} and was killed")]
    CommandTimedOut { command: String, timeout: Duration },

    #[error("command `{command}` succeeded but produced no output file at {path}")]
    MissingOutput { command: String, path: PathBuf },

    #[error("cannot read source file {path}: {source}")]
    SourceFile { path: PathBuf, source: io::Error },

    #[error("iteration count must be positive")]
    NoIterations,

    #[error("at least one compression level is required")]
    NoLevels,

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
