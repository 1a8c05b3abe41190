// minicc: compiler front end for a small C-like language.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use minicc::SemanticAnalyzer;

/// Compiler front end for a small C-like language.
///
/// Parses the input, runs semantic analysis, and optionally dumps the tree.
/// Code generation has not landed yet, so `-o` and `-O` are accepted but do
/// nothing.
#[derive(Debug, Parser)]
#[command(name = "minicc", version, about)]
struct Cli {
    /// Source file to compile.
    input: Option<PathBuf>,

    /// Where the object file would be written.
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable optimizations.
    #[arg(short = 'O')]
    optimize: bool,

    /// Print the tree for the parsed input.
    #[arg(long)]
    dump_ast: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(input) = cli.input else {
        eprintln!("error: no input file provided (try --help)");
        return ExitCode::FAILURE;
    };

    let filename = input.display().to_string();
    let source = match fs::read_to_string(&input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read '{}': {}", filename, err);
            return ExitCode::FAILURE;
        }
    };

    debug!(file = %filename, bytes = source.len(), "parsing");

    let (unit, errors) = minicc::parse(&source, &filename);
    let Some(unit) = unit else {
        for err in &errors {
            eprintln!("{err}");
        }
        return ExitCode::FAILURE;
    };

    debug!(decls = unit.decls.len(), "parsed");

    let mut analyzer = SemanticAnalyzer::new();
    if !analyzer.analyze(&unit) {
        for diagnostic in analyzer.diagnostics() {
            eprintln!("{diagnostic}");
        }
        return ExitCode::FAILURE;
    }

    if cli.dump_ast {
        print!("{}", minicc::pretty_print(&unit));
    }

    if cli.output.is_some() || cli.optimize {
        eprintln!("warning: code generation is not implemented; -o and -O have no effect");
    }

    ExitCode::SUCCESS
}
