//! Command-line interface.
//!
//! Usage:
//!   makevars [-v...] [-D NAME=VALUE]... <FILE> [NAME]...
//!   makevars [-v...] [-D NAME=VALUE]... --bool <FILE> <NAME>...
//!   makevars [-v...] [-D NAME=VALUE]... --eval <EXPR> <FILE>

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::error::MakeError;
use crate::eval::evaluate;
use crate::extract::extract_variables;
use crate::vars::MakeVars;

/// Parsed command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "makevars")]
#[command(about = "Print the variables defined by a Makefile")]
#[command(version)]
pub struct Cli {
    /// Makefile to read.
    pub file: PathBuf,

    /// Variables to print (default: all, as NAME=value).
    pub names: Vec<String>,

    /// Predefine a variable; may be repeated, later definitions win.
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,

    /// Print the requested variables as booleans.
    #[arg(long = "bool", requires = "names")]
    pub as_bool: bool,

    /// Evaluate EXPR against the extracted variables and print the result.
    #[arg(long, value_name = "EXPR", conflicts_with_all = ["names", "as_bool"])]
    pub eval: Option<String>,

    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Errors reported by the binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Make(#[from] MakeError),

    #[error("variable '{0}' is not defined")]
    NotDefined(String),

    #[error("write error: {0}")]
    Output(#[from] std::io::Error),
}

fn parse_define(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

impl Cli {
    /// Log level selected by `-v`.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Initial variables built from the `-D` options.
    pub fn initial_vars(&self) -> MakeVars {
        self.defines.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

/// Run the command described by `cli`, writing results to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let initial = cli.initial_vars();
    let vars = extract_variables(&cli.file, Some(&initial))?;
    tracing::info!(file = %cli.file.display(), count = vars.len(), "extracted variables");

    if let Some(expr) = &cli.eval {
        writeln!(out, "{}", evaluate(expr, &vars)?)?;
        return Ok(());
    }

    if cli.names.is_empty() {
        for (name, value) in vars.iter() {
            writeln!(out, "{name}={value}")?;
        }
        return Ok(());
    }

    for name in &cli.names {
        if cli.as_bool {
            let value = vars.get_bool(name).ok_or_else(|| CliError::NotDefined(name.clone()))??;
            writeln!(out, "{value}")?;
        } else {
            let value = vars.get(name).ok_or_else(|| CliError::NotDefined(name.clone()))?;
            writeln!(out, "{value}")?;
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
