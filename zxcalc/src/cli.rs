//! The zxcalc command line interface.

use clap::{crate_version, Parser};

use crate::error::ZXError;
use crate::extract::ExtractError;

pub mod opt;

/// CLI arguments.
#[derive(Parser, Debug)]
#[clap(version = crate_version!(), long_about = None)]
#[clap(about = "zxcalc command line interface")]
pub enum Cli {
    /// Run the circuit optimizer.
    Opt(opt::OptArgs),
}

/// Error type for the CLI.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum CliError {
    /// Error writing the output file.
    #[display("IO error: {_0}")]
    IO(std::io::Error),
    /// The circuit could not be turned into a diagram or read back.
    #[display("Invalid circuit: {_0}")]
    Diagram(ZXError),
    /// The simplified diagram could not be extracted.
    #[display("Extraction failed: {_0}")]
    Extract(ExtractError),
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self {
            Cli::Opt(args) => args.run(),
        }
    }
}
