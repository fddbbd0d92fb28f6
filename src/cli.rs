use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Merges multiple trace files")]
pub struct Args {
    /// The list of json trace files to merge
    #[arg(short = 'f', long = "files", num_args = 1.., required = true)]
    pub files: Vec<PathBuf>,

    /// Output merged json trace file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write indented JSON instead of a single line
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Dry-run mode (validate and merge in memory, no file written)
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Verbose logging
    #[arg(long = "verbose")]
    pub verbose: bool,
}
