//! Interactive REPL
//!
//! Each line is either a REPL command (`HELP`, `FIX n`, ...) or a run of
//! numbers and operator keywords handed to the engine.

use anyhow::{bail, Context, Result};
use colored::*;
use rpn_calc::{Calculator, CATALOG};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use tracing::debug;

use crate::config::{CliConfig, DisplayConfig, MAX_DIGITS};
use crate::display::{register_lines, stack_lines};

const REPL_COMMANDS: [&str; 9] = ["HELP", "QUIT", "EXIT", "FIX", "SHOW", "REGS", "MODE", "?", "Q"];

/// Engine plus display settings for one interactive session
pub struct Session {
    calc: Calculator,
    display: DisplayConfig,
}

impl Session {
    pub fn new(config: &CliConfig) -> Result<Self> {
        Ok(Self {
            calc: Calculator::with_config(&config.engine)?,
            display: config.display.clone(),
        })
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calc
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn set_digits(&mut self, digits: usize) -> Result<()> {
        if digits > MAX_DIGITS {
            bail!("FIX takes 0..={} digits, got {}", MAX_DIGITS, digits);
        }
        self.display.digits = digits;
        Ok(())
    }

    pub fn evaluate(&mut self, line: &str) -> Result<()> {
        self.calc.evaluate(line)?;
        Ok(())
    }

    pub fn print_stack(&self) {
        let lines = stack_lines(self.calc.stack(), &self.display);
        if lines.is_empty() {
            println!("{}", "(empty)".dimmed());
        }
        for line in lines {
            println!("{}", line);
        }
    }

    fn prompt(&self) -> String {
        format!("rpn[{}]> ", self.calc.mode())
    }
}

// ============================================================================
// Tab Completion Helper
// ============================================================================

/// Completes operator keywords and REPL commands
struct RpnHelper;

impl Helper for RpnHelper {}

impl Hinter for RpnHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for RpnHelper {}

impl Validator for RpnHelper {}

impl Completer for RpnHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(complete_word(line, pos))
    }
}

/// Complete the word ending at `pos`
fn complete_word(line: &str, pos: usize) -> (usize, Vec<Pair>) {
    let line = &line[..pos];
    let start = line.rfind(char::is_whitespace).map_or(0, |i| i + 1);
    let prefix = line[start..].to_uppercase();
    if prefix.is_empty() {
        return (pos, vec![]);
    }

    let keywords = CATALOG
        .iter()
        .map(|&(keyword, _)| keyword.split(' ').next().unwrap_or(keyword));
    let mut matches: Vec<Pair> = keywords
        .chain(REPL_COMMANDS.iter().copied())
        .filter(|keyword| keyword.starts_with(&prefix))
        .map(|keyword| Pair {
            display: keyword.to_string(),
            replacement: keyword.to_string(),
        })
        .collect();
    matches.dedup_by(|a, b| a.replacement == b.replacement);

    (start, matches)
}

// ============================================================================
// Loop
// ============================================================================

pub fn run_repl(mut session: Session) -> Result<()> {
    let config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl = Editor::with_config(config).context("Failed to initialize readline")?;
    rl.set_helper(Some(RpnHelper));

    println!("{}", "RPN calculator".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );

    loop {
        match rl.readline(&session.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match execute_repl_command(&mut session, line) {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => {
                        eprintln!("{} {}", "Error:".red(), e);
                        session.print_stack();
                    },
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    println!("Bye!");
    Ok(())
}

/// Execute a single REPL line
/// Returns Ok(true) to continue, Ok(false) to quit
pub fn execute_repl_command(session: &mut Session, input: &str) -> Result<bool> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let cmd = parts.first().map(|s| s.to_uppercase());

    match cmd.as_deref() {
        Some("HELP") | Some("?") => print_help(),
        Some("QUIT") | Some("EXIT") | Some("Q") => return Ok(false),
        Some("FIX") => match parts.get(1) {
            Some(arg) => {
                let digits = arg
                    .parse::<usize>()
                    .with_context(|| format!("FIX needs a digit count, got '{}'", arg))?;
                session.set_digits(digits)?;
                session.print_stack();
            },
            None => println!("FIX {}", session.display.digits),
        },
        Some("SHOW") => session.print_stack(),
        Some("REGS") => {
            for line in register_lines(&session.calc, &session.display) {
                println!("{}", line);
            }
        },
        Some("MODE") => println!("{}", session.calc.mode()),
        Some(_) => {
            debug!(line = input, "evaluate");
            session.evaluate(input)?;
            session.print_stack();
        },
        None => {},
    }

    Ok(true)
}

fn print_help() {
    println!("{}", "=== REPL Commands ===".bright_cyan());
    println!();
    println!("  {}          Show this help message", "HELP".bright_yellow());
    println!("  {}         Show n decimals", "FIX n".bright_yellow());
    println!("  {}          Show the stack", "SHOW".bright_yellow());
    println!(
        "  {}          Show statistics registers 2..7",
        "REGS".bright_yellow()
    );
    println!("  {}          Show the angular mode", "MODE".bright_yellow());
    println!("  {}          Exit", "QUIT".bright_yellow());
    println!();
    print_catalog();
    println!();
    println!("{}", "=== Examples ===".bright_cyan());
    println!();
    println!("  7 2 -                   5");
    println!("  DEG 45 TAN              1");
    println!("  4.63 0 S+ 4.78 20 S+    accumulate two pairs");
}

/// Print every operator keyword with its stack effect
pub fn print_catalog() {
    println!("{}", "=== Operators ===".bright_cyan());
    println!();
    for (keyword, summary) in CATALOG {
        println!("  {:<10} {}", keyword.bright_yellow(), summary);
    }
}
