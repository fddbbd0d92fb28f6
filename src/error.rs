use std::path::PathBuf;
use thiserror::Error;

/// Reasons a merge stops early without producing output.
///
/// These are reported to the user and the process still exits successfully.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Abort {
    #[error("At least two files are required")]
    TooFewFiles,

    #[error("Input file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("traceEvents not found in {}", .0.display())]
    MissingTraceEvents(PathBuf),
}

/// Failures that terminate the run with a non-zero exit status.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("no output file given; pass --output <path> (or --dry-run)")]
    MissingOutput,

    #[error("cannot append list field `{key}` from {}: the merged trace holds a non-list value there", path.display())]
    FieldKindConflict { key: String, path: PathBuf },
}
