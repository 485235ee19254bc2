//! The fpp command-line interface.
//!
//! This module is the external driver around the core pipeline: it reads
//! files, invokes [`CompilerPipeline`], and reports results. It contains no
//! parsing or validation logic of its own.

pub mod args;
pub mod output;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::args::{Command, FppArgs};
use crate::diagnostics::print_error;
use crate::engine::CompilerPipeline;

/// The main entry point for the CLI.
pub fn run() {
    let args = FppArgs::parse();

    let exit_code = match args.command {
        Command::Check { files } => handle_check(&files),
        Command::Ast { file, json } => handle_ast(&file, json),
    };

    process::exit(exit_code);
}

/// Handles the `check` subcommand: every file is processed even when an
/// earlier one fails, and all validation errors per file are shown.
fn handle_check(files: &[std::path::PathBuf]) -> i32 {
    let pipeline = CompilerPipeline::default();
    let mut failures = 0usize;

    for file in files {
        let display = file.display().to_string();
        let source = match CompilerPipeline::read_file(file) {
            Ok(source) => source,
            Err(error) => {
                print_error(error);
                failures += 1;
                continue;
            }
        };

        match pipeline.check(&display, &source) {
            Ok(unit) => output::print_check_success(&display, unit.len()),
            Err(errors) => {
                failures += 1;
                let count = errors.len();
                for error in errors {
                    print_error(error);
                }
                output::print_check_failure(&display, count);
            }
        }
    }

    if failures == 0 {
        0
    } else {
        1
    }
}

/// Handles the `ast` subcommand: parse and assemble without validation, then
/// print the definitions.
fn handle_ast(file: &Path, json: bool) -> i32 {
    let display = file.display().to_string();
    let source = match CompilerPipeline::read_file(file) {
        Ok(source) => source,
        Err(error) => {
            print_error(error);
            return 1;
        }
    };

    let pipeline = CompilerPipeline { validate: false };
    match pipeline.compile(&display, &source) {
        Ok(unit) => {
            output::print_definitions(&unit, json);
            0
        }
        Err(error) => {
            print_error(error);
            1
        }
    }
}
