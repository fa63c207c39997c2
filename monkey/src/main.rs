//! Monkey interpreter CLI

use clap::{Parser, Subcommand};
use monkey::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "monkey", version, about = "Monkey language interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the interactive REPL (default)
    Repl,
    /// Evaluate a Monkey source file
    Run {
        /// Source file to run
        file: PathBuf,
    },
    /// Parse and dump AST (debug)
    Parse {
        /// Source file to parse
        file: PathBuf,
        /// Print the canonical rendering instead of JSON
        #[arg(long)]
        canonical: bool,
    },
    /// Tokenize and dump tokens (debug)
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },
}

fn main() {
    monkey::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => run_repl(),
        Command::Run { file } => run_file(&file),
        Command::Parse { file, canonical } => parse_file(&file, canonical),
        Command::Tokens { file } => tokenize_file(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_repl() -> Result<(), Box<dyn std::error::Error>> {
    let mut repl = monkey::repl::Repl::new()?;
    repl.run()?;
    Ok(())
}

/// Parse a file, rendering any diagnostics with source context
fn load_program(path: &Path) -> Result<monkey::Program, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let filename = path.display().to_string();

    match monkey::parser::parse(&source) {
        Ok(program) => Ok(program),
        Err(errors) => {
            monkey::error::report_errors(&filename, &source, &errors)?;
            Err(format!("{filename}: {} parse error(s)", errors.len()).into())
        }
    }
}

fn run_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let program = load_program(path)?;

    let interp = monkey::Interpreter::new();
    match interp.eval_program(&program) {
        Value::Error(message) => Err(message.into()),
        Value::Null => Ok(()),
        value => {
            println!("{value}");
            Ok(())
        }
    }
}

fn parse_file(path: &Path, canonical: bool) -> Result<(), Box<dyn std::error::Error>> {
    let program = load_program(path)?;

    if canonical {
        println!("{program}");
    } else {
        println!("{}", serde_json::to_string_pretty(&program)?);
    }
    Ok(())
}

fn tokenize_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    for tok in monkey::lexer::tokenize(&source) {
        println!("{tok}");
    }

    Ok(())
}
