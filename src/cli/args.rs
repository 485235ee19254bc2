//! Command-line arguments and subcommands for the fpp CLI, declared with
//! `clap`'s derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "fpp",
    version,
    about = "Compiler front-end for the FPP algebraic type definition language."
)]
pub struct FppArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse, assemble, and validate one or more FPP files.
    Check {
        /// The FPP files to check.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show the parsed definitions of an FPP file.
    Ast {
        /// The FPP file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// Emit machine-readable JSON instead of the debug listing.
        #[arg(long)]
        json: bool,
    },
}
