use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tlc",
    author,
    version,
    about = "Ahead-of-time compiler: small Lisp surface language to x86-64 NASM",
    propagate_version = true
)]
pub struct Cli {
    /// Emit debug-level logs in addition to info-level ones.
    #[arg(short, long, global = true, env = "TLC_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a `.lisp` source file, writing `<base>.s` next to it.
    Compile(CompileCommand),
}

#[derive(Args, Debug)]
pub struct CompileCommand {
    /// Path to the source file, e.g. `program.lisp`.
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compile_with_input_path() {
        let cli = Cli::parse_from(["tlc", "compile", "program.lisp"]);
        match cli.command {
            Commands::Compile(cmd) => assert_eq!(cmd.input, PathBuf::from("program.lisp")),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_verbose_flag_before_subcommand() {
        let cli = Cli::parse_from(["tlc", "--verbose", "compile", "program.lisp"]);
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_missing_subcommand() {
        assert!(Cli::try_parse_from(["tlc"]).is_err());
    }
}
