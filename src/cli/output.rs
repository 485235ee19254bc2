//! Handles all user-facing output for the CLI.
//!
//! Centralizing printing here keeps the commands themselves free of
//! formatting decisions: colored per-file summaries, debug listings, and
//! JSON all come from this module. Errors go through `miette` reports and
//! are not formatted here.

use std::collections::BTreeMap;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::engine::CompiledUnit;

/// Prints a green per-file success line for `check`.
pub fn print_check_success(name: &str, definitions: usize) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    println!("ok: {} ({} definitions)", name, definitions);
    let _ = stdout.reset();
}

/// Prints a red per-file failure line for `check`.
pub fn print_check_failure(name: &str, errors: usize) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    println!("failed: {} ({} errors)", name, errors);
    let _ = stdout.reset();
}

/// Prints the definitions of a unit, sorted by fully qualified name, either
/// as a debug listing or as JSON.
pub fn print_definitions(unit: &CompiledUnit, json: bool) {
    if json {
        let ordered: BTreeMap<_, _> = unit.definitions.iter().collect();
        match serde_json::to_string_pretty(&ordered) {
            Ok(text) => println!("{}", text),
            Err(error) => eprintln!("cannot serialize definitions: {}", error),
        }
        return;
    }

    for name in unit.sorted_names() {
        let mut stdout = StandardStream::stdout(ColorChoice::Auto);
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        println!("--- {} ---", name);
        let _ = stdout.reset();
        println!("{:#?}", unit.definitions[name.as_str()]);
    }
}
