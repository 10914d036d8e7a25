//! Compiler driver: command-line entry point that reads a source file,
//! runs it through the lex/parse/codegen pipeline, and writes the emitted
//! NASM text to `<base>.s` next to the input.

pub mod cli;
pub mod error;

use cli::{Cli, Commands};
use error::{DriverError, Result};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);
    match cli.command {
        Commands::Compile(cmd) => compile_file(&cmd.input),
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    let subscriber = fmt::layer().with_target(false);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init();
}

fn compile_file(input: &Path) -> Result<()> {
    tracing::info!(path = %input.display(), "reading source");
    let source = std::fs::read_to_string(input).map_err(|source| DriverError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let mut parser = tlc_par::Parser::new(&source);
    let program = parser.parse_program()?;
    tracing::debug!(forms = program.len(), "parsed top-level forms");

    let asm = tlc_gen::compile_program(&program)?;

    let output_path = input.with_extension("s");
    std::fs::write(&output_path, asm).map_err(|source| DriverError::Write {
        path: output_path.clone(),
        source,
    })?;
    tracing::info!(path = %output_path.display(), "wrote assembly");
    Ok(())
}
