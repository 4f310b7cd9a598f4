use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Merge key/value benchmark result files into one tab-separated table."
)]
pub struct Args {
    /// Key/value files to merge; one output column per file, in this order
    pub files: Vec<PathBuf>,

    /// Verbose logging
    #[arg(long = "verbose")]
    pub verbose: bool,
}
