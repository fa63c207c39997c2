//! REPL (Read-Eval-Print Loop) for Monkey

use crate::interp::Interpreter;
use crate::parser::parse;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const PROMPT: &str = ">> ";
const HISTORY_FILE: &str = ".monkey_history";

/// REPL command (a line starting with `:`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Clear,
    Env,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line {
            ":help" | ":h" | ":?" => Command::Help,
            ":quit" | ":q" | ":exit" => Command::Quit,
            ":clear" => Command::Clear,
            ":env" => Command::Env,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Evaluation state shared by every line of a session
#[derive(Default)]
pub struct Session {
    interpreter: Interpreter,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one line and return the text to print
    ///
    /// Parse diagnostics are returned one per line, tab-indented, and the
    /// line is not evaluated.
    pub fn eval_line(&self, line: &str) -> String {
        match parse(line) {
            Ok(program) => self.interpreter.eval_program(&program).to_string(),
            Err(errors) => errors
                .iter()
                .map(|e| format!("\t{e}"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Global bindings as `name = value`, sorted by name
    pub fn env_listing(&self) -> Vec<String> {
        let env = self.interpreter.global_env().borrow();
        let mut names: Vec<_> = env.bindings().iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        names
            .into_iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect()
    }
}

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    session: Session,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL
    pub fn new() -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            session: Session::new(),
            history_path,
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("Monkey REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    if line.starts_with(':') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    println!("{}", self.session.eval_line(line));
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(())
    }

    /// Handle a `:` command; returns true when the REPL should exit
    fn handle_command(&mut self, line: &str) -> bool {
        match Command::parse(line) {
            Command::Quit => {
                println!("Goodbye!");
                true
            }
            Command::Help => {
                print_help();
                false
            }
            Command::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                false
            }
            Command::Env => {
                for binding in self.session.env_listing() {
                    println!("{binding}");
                }
                false
            }
            Command::Unknown(cmd) => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }
}

fn print_help() {
    println!("Monkey REPL Commands:");
    println!("  :help, :h, :?   Show this help");
    println!("  :quit, :q       Exit the REPL");
    println!("  :clear          Clear the screen");
    println!("  :env            List global bindings");
    println!();
    println!("You can enter:");
    println!("  - Expressions: 1 + 2 * 3, if (x > 1) {{ x }} else {{ 0 }}");
    println!("  - Bindings: let add = fn(a, b) {{ a + b }};");
    println!("  - Calls: add(1, 2)");
    println!();
    println!("Built-in functions:");
    println!("  len(s)          Length of a string");
    println!("  puts(x, ...)    Print each argument on its own line");
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse(":quit"), Command::Quit);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":exit"), Command::Quit);
        assert_eq!(Command::parse(":help"), Command::Help);
        assert_eq!(Command::parse(":h"), Command::Help);
        assert_eq!(Command::parse(":?"), Command::Help);
        assert_eq!(Command::parse(":clear"), Command::Clear);
        assert_eq!(Command::parse(":env"), Command::Env);
        assert_eq!(Command::parse(":nope"), Command::Unknown(":nope".to_string()));
    }

    #[test]
    fn test_eval_line_prints_value() {
        let session = Session::new();
        assert_eq!(session.eval_line("1 + 2"), "3");
        assert_eq!(session.eval_line("\"hi\""), "hi");
        assert_eq!(session.eval_line("if (false) { 1 }"), "null");
        assert_eq!(session.eval_line("fn(x) { x }"), "fn(x) { x }");
        assert_eq!(session.eval_line("len"), "builtin function");
    }

    #[test]
    fn test_eval_line_prints_runtime_error() {
        let session = Session::new();
        assert_eq!(
            session.eval_line("5 + true"),
            "ERROR: type mismatch: INTEGER + BOOLEAN"
        );
    }

    #[test]
    fn test_eval_line_prints_diagnostics() {
        let session = Session::new();
        let output = session.eval_line("let x 5;");
        assert!(output.starts_with('\t'));
        assert!(output.contains("expected next token to be =, got INT instead"));
        assert!(session.env_listing().is_empty());
    }

    #[test]
    fn test_bindings_persist_across_lines() {
        let session = Session::new();
        session.eval_line("let add = fn(a, b) { a + b };");
        session.eval_line("let x = 40;");
        assert_eq!(session.eval_line("add(x, 2)"), "42");
    }

    #[test]
    fn test_env_listing_sorted() {
        let session = Session::new();
        session.eval_line("let zeta = 1;");
        session.eval_line("let alpha = \"a\";");
        assert_eq!(session.env_listing(), vec!["alpha = a", "zeta = 1"]);
    }

    #[test]
    fn test_constants() {
        assert_eq!(PROMPT, ">> ");
        assert_eq!(HISTORY_FILE, ".monkey_history");
    }
}
