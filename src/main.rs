//! Thale compiler driver.
//!
//! Reads a source file, scans it and prints the resulting token stream.
//! Lexical errors are rendered to standard error.

use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use thale::{
    display_error,
    lexer::lexer::{tokenize, tokenize_recovering},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "thale")]
#[command(version, about = "The Thale compiler", long_about = None)]
#[command(disable_version_flag = true, arg_required_else_help = true)]
struct Cli {
    /// Source file to compile
    input: PathBuf,

    /// Report every lexical error instead of stopping at the first
    #[arg(long)]
    all_errors: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Show compiler version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("thale: error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let source = read_to_string(&cli.input)
        .with_context(|| format!("could not read file '{}'", cli.input.display()))?;

    if cli.all_errors {
        let (tokens, errors) = tokenize_recovering(&source);
        if errors.is_empty() {
            tokens.iter().for_each(|token| println!("{}", token));
            return Ok(ExitCode::SUCCESS);
        }
        for error in &errors {
            display_error(error, &source);
        }
        return Ok(ExitCode::FAILURE);
    }

    match tokenize(&source) {
        Ok(tokens) => {
            tokens.iter().for_each(|token| println!("{}", token));
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            display_error(&error, &source);
            Ok(ExitCode::FAILURE)
        }
    }
}
