//! `cmdtree` — drive a command grammar from the terminal.
//!
//! Loads a JSON grammar file (paths, typed argument slots, templated
//! replies), then executes a command line against it, lists autocomplete
//! suggestions for a partial line, or prints the assembled trees.

mod grammar;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmdtree_core::ConsoleSource;
use std::process;

use crate::render::{Format, render_errors, render_suggestions};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "cmdtree",
    version,
    about = "cmdtree — execute, suggest, and inspect command-tree grammars"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Execute one command line against a grammar.
    Run {
        /// Path to the grammar JSON file.
        grammar: String,
        /// The command line to execute, quoted as one argument.
        command: String,
        /// Permission level of the issuing source.
        #[arg(long, default_value_t = 4)]
        permission: u8,
    },

    /// List autocomplete suggestions for a partial command line.
    Suggest {
        /// Path to the grammar JSON file.
        grammar: String,
        /// The partial command line, quoted as one argument (a trailing
        /// space asks for the next element).
        command: String,
        /// Permission level of the issuing source.
        #[arg(long, default_value_t = 4)]
        permission: u8,
    },

    /// Print the command trees a grammar declares.
    Tree {
        /// Path to the grammar JSON file.
        grammar: String,
    },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Run {
            grammar,
            command,
            permission,
        } => cmd_run(&grammar, &command, permission, format)?,
        Cmd::Suggest {
            grammar,
            command,
            permission,
        } => cmd_suggest(&grammar, &command, permission, format)?,
        Cmd::Tree { grammar } => cmd_tree(&grammar)?,
    }
    Ok(())
}

fn cmd_run(grammar: &str, command: &str, permission: u8, format: Format) -> Result<()> {
    let registry = grammar::load_registry(grammar)?;
    let source = ConsoleSource::new(permission);

    let result = registry.execute(&source, command);
    if result.matched == 0 {
        eprintln!(
            "unknown command: {}",
            cmdtree_core::first_element(command)
        );
        process::exit(1);
    }
    if !result.errors.is_empty() {
        render_errors(command, &result.errors, format);
        if result.errors.iter().any(|e| !e.is_handled()) {
            process::exit(1);
        }
    }
    Ok(())
}

fn cmd_suggest(grammar: &str, command: &str, permission: u8, format: Format) -> Result<()> {
    let registry = grammar::load_registry(grammar)?;
    let source = ConsoleSource::new(permission);
    let suggestions = registry.suggest(&source, command);
    render_suggestions(&suggestions, format);
    Ok(())
}

fn cmd_tree(grammar: &str) -> Result<()> {
    let registry = grammar::load_registry(grammar)?;
    for root in registry.root_nodes() {
        root.print_tree(&mut |line| println!("{line}"));
    }
    Ok(())
}
