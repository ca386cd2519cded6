//! rpn - RPN scientific calculator
//!
//! Interactive REPL and one-shot evaluation on top of the `rpn-calc` engine.

mod config;
mod display;
mod logging;
mod repl;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use crate::config::CliConfig;
use crate::logging::LogOptions;
use crate::repl::Session;

#[derive(Parser)]
#[command(name = "rpn")]
#[command(about = "RPN scientific calculator")]
#[command(long_about = "RPN scientific calculator

Numbers are pushed, keywords operate on the stack; the second-from-top
value is the left operand (`7 2 -` is 5).

Examples:
  rpn                                   # Interactive REPL
  rpn eval 10 PI POW                    # One-shot evaluation
  rpn --digits 15 eval DEG 45 TAN
  rpn ops                               # List operators
  RPN_ENGINE__STACK_CAPACITY=4 rpn config")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (.toml, .yaml, .yml or .json)
    #[arg(short, long, global = true, env = "RPN_CONFIG")]
    config: Option<PathBuf>,

    /// Decimals to display, overrides display.digits
    #[arg(short, long, global = true)]
    digits: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL (default)
    Repl,

    /// Evaluate tokens and print the resulting stack
    Eval {
        /// Numbers and operator keywords, e.g. `3 4 +`
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// List operator keywords
    Ops,

    /// Print the effective configuration
    Config {
        #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
        format: ConfigFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ConfigFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    let command = cli.command.unwrap_or(Commands::Repl);
    logging::init(LogOptions {
        verbose: cli.verbose,
        color: !cli.no_color,
        timestamps: !matches!(command, Commands::Repl),
    });

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(digits) = cli.digits {
        config.display.digits = digits;
        config.validate()?;
    }
    debug!(config = ?config, "configuration loaded");

    match command {
        Commands::Repl => repl::run_repl(Session::new(&config)?),
        Commands::Eval { tokens } => eval(&config, &tokens.join(" ")),
        Commands::Ops => {
            repl::print_catalog();
            Ok(())
        },
        Commands::Config { format } => {
            let rendered = match format {
                ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
                ConfigFormat::Yaml => serde_yaml::to_string(&config)?,
            };
            println!("{}", rendered);
            Ok(())
        },
    }
}

fn eval(config: &CliConfig, line: &str) -> Result<()> {
    let mut session = Session::new(config)?;
    let outcome = session.evaluate(line);
    session.print_stack();
    outcome
}
