use std::io::IsTerminal;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use symdiff::poly::is_symbol;
use symdiff::repl::{self, render, ReplOptions};
use symdiff::{differentiate_text, simplify_text, DEFAULT_BOUND_VARIABLE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Variable to differentiate with respect to
  #[arg(long, global = true, default_value = DEFAULT_BOUND_VARIABLE)]
  var: String,

  /// When to colour matching parentheses
  #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
  color: ColorChoice,

  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
  Auto,
  Always,
  Never,
}

impl ColorChoice {
  fn enabled(self) -> bool {
    match self {
      ColorChoice::Auto => std::io::stdout().is_terminal(),
      ColorChoice::Always => true,
      ColorChoice::Never => false,
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Differentiate, simplify and print one polynomial per input line
  Repl,
  /// Take the derivative in the bound variable, without simplifying
  #[command(name = "d/dx", alias = "ddx")]
  Ddx {
    /// Polynomial S-expression, e.g. "(+ (^ x 2) 3)"
    expression: String,
  },
  /// Normalize a polynomial into a flat sum of monomials
  Simplify {
    /// Polynomial S-expression, e.g. "(+ (^ x 2) (^ x 2))"
    expression: String,
  },
}

fn init_logging(verbose: u8) {
  let level = match verbose {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };
  env_logger::Builder::new()
    .filter_level(level)
    .parse_default_env()
    .format_timestamp(None)
    .init();
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if !is_symbol(&cli.var)? {
    bail!("bound variable {:?} is not an alphabetic symbol", cli.var);
  }
  let color = cli.color.enabled();

  match cli.command {
    Commands::Repl => {
      let options = ReplOptions {
        var: cli.var,
        color,
      };
      let stdin = std::io::stdin();
      repl::run(stdin.lock(), std::io::stdout(), &options)
        .context("error reading user input")?;
    }
    Commands::Ddx { expression } => {
      let result = differentiate_text(&cli.var, &expression)
        .with_context(|| format!("error taking derivative of {expression}"))?;
      println!("{}", render(&result, color));
    }
    Commands::Simplify { expression } => {
      let result = simplify_text(&expression)
        .with_context(|| format!("error simplifying {expression}"))?;
      println!("{}", render(&result, color));
    }
  }
  Ok(())
}
