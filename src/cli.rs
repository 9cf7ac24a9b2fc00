//! Command-line interface implementation for modhook.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for modhook.
#[derive(Parser, Debug)]
#[command(author, version, about = "modhook: integrates modules into a host source tree through hook markers", long_about = None)]
pub struct Args {
    /// Root of the host source tree
    #[arg(value_name = "SOURCE_DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Configuration file (default: modhook.json, modhook.yml or modhook.yaml in SOURCE_DIR)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the template bodies and their bricks, relative to SOURCE_DIR
    #[arg(short, long, value_name = "DIR")]
    pub template_root: Option<PathBuf>,

    /// Directory receiving the spliced and copied sources, relative to SOURCE_DIR
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
