//! Read a polynomial per line, print its simplified derivative.

use std::io::{BufRead, Write};

use log::{debug, info};

use crate::display::{rainbow_parens, RAINBOW};
use crate::sexp::is_separator;
use crate::{interpret, DEFAULT_BOUND_VARIABLE};

pub const BANNER: &str = "d/dx, simplify, print";
pub const PROMPT: &str = "d/dx ";

#[derive(Debug, Clone)]
pub struct ReplOptions {
  pub var: String,
  pub color: bool,
}

impl Default for ReplOptions {
  fn default() -> Self {
    ReplOptions {
      var: DEFAULT_BOUND_VARIABLE.to_string(),
      color: false,
    }
  }
}

/// Format one result for display, colouring parentheses if asked to.
/// Colouring failures fall back to the plain text.
pub fn render(text: &str, color: bool) -> String {
  if !color {
    return text.to_string();
  }
  rainbow_parens(text, &RAINBOW).unwrap_or_else(|e| {
    debug!("not colouring output: {e}");
    text.to_string()
  })
}

/// Evaluate one input line, producing either the result or an error line.
pub fn eval_line(line: &str, options: &ReplOptions) -> String {
  match interpret(&options.var, line) {
    Ok(result) => render(&result, options.color),
    Err(e) => format!("Error: {e}"),
  }
}

/// Run the loop until `input` is exhausted. Bad lines are reported and
/// skipped; only I/O failures end the loop early.
pub fn run<R: BufRead, W: Write>(
  input: R,
  mut output: W,
  options: &ReplOptions,
) -> std::io::Result<()> {
  info!("differentiating with respect to {}", options.var);
  writeln!(output, "\n{BANNER}")?;
  write!(output, "\n{PROMPT}")?;
  output.flush()?;

  for line in input.lines() {
    let line = line?;
    if !line.trim_matches(is_separator).is_empty() {
      writeln!(output, "{}", eval_line(&line, options))?;
    }
    write!(output, "\n{PROMPT}")?;
    output.flush()?;
  }
  writeln!(output)?;
  Ok(())
}
