//! Untyped S-expressions: `atom | "(" sexp* ")"`.
//!
//! Text is cut into parens and atoms in one pass, then folded into lists
//! with an explicit stack of the lists still open, so forms packed together
//! without whitespace (`(+(^ x 1)(^ x 2))`) parse and nesting depth never
//! turns into call-stack depth. Which tokens count as atoms is decided by
//! the pest grammar.

use std::fmt;
use std::str::FromStr;

use log::trace;

use crate::{matches_token, Rule, SymdiffError, NESTING_TOO_DEEP};

pub const SUM_SUGAR: &str = "+";
pub const MONOMIAL_SUGAR: &str = "^";
pub const PRODUCT_SUGAR: &str = "*";

/// Deepest list nesting accepted by [`parse`]. Every later tree walk
/// (polynomial building, differentiation, simplification, printing)
/// recurses once per level, so this also bounds their stack use.
pub const MAX_NESTING_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExp {
  Atom(String),
  /// An empty list is the `()` form.
  List(Vec<SExp>),
}

impl SExp {
  pub fn atom(token: impl Into<String>) -> Self {
    SExp::Atom(token.into())
  }

  pub fn as_atom(&self) -> Option<&str> {
    match self {
      SExp::Atom(a) => Some(a),
      SExp::List(_) => None,
    }
  }

  pub fn is_empty_list(&self) -> bool {
    matches!(self, SExp::List(items) if items.is_empty())
  }
}

impl fmt::Display for SExp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SExp::Atom(a) => write!(f, "{a}"),
      SExp::List(items) => {
        write!(f, "( ")?;
        for item in items {
          write!(f, "{item} ")?;
        }
        write!(f, ")")
      }
    }
  }
}

impl FromStr for SExp {
  type Err = SymdiffError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse(s)
  }
}

/// Token separators: space, tab, newline and carriage return only.
pub fn is_separator(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\n' | '\r')
}

pub fn is_atom(raw: &str) -> Result<bool, SymdiffError> {
  matches_token(Rule::Atom, raw)
}

/// Split text into `(`, `)` and the runs between them.
pub fn tokenize(raw: &str) -> Vec<&str> {
  let mut tokens = Vec::new();
  let mut start = None;
  for (i, c) in raw.char_indices() {
    if c == '(' || c == ')' || is_separator(c) {
      if let Some(s) = start.take() {
        tokens.push(&raw[s..i]);
      }
      if !is_separator(c) {
        tokens.push(&raw[i..i + 1]);
      }
    } else if start.is_none() {
      start = Some(i);
    }
  }
  if let Some(s) = start {
    tokens.push(&raw[s..]);
  }
  tokens
}

fn parse_error(message: String) -> SymdiffError {
  SymdiffError::ParseError(message)
}

/// Parse an S-expression out of raw text.
///
/// `"( A ( B 0 ) () )"` parses to a three element list: the atom `A`, the
/// list `( B 0 )` and the empty list. The text must hold exactly one atom
/// or one list, nested at most [`MAX_NESTING_DEPTH`] deep.
pub fn parse(raw: &str) -> Result<SExp, SymdiffError> {
  let tokens = tokenize(raw);
  trace!("{} token(s)", tokens.len());

  let mut open: Vec<Vec<SExp>> = Vec::new();
  let mut done: Option<SExp> = None;

  for token in tokens {
    if done.is_some() {
      return Err(parse_error(format!(
        "unexpected \"{token}\" after a complete S-expression"
      )));
    }
    let finished = match token {
      "(" => {
        if open.len() >= MAX_NESTING_DEPTH {
          return Err(parse_error(format!(
            "{NESTING_TOO_DEEP}: more than {MAX_NESTING_DEPTH} levels"
          )));
        }
        open.push(Vec::new());
        continue;
      }
      ")" => match open.pop() {
        Some(items) => SExp::List(items),
        None => {
          return Err(parse_error("mismatched parens, unexpected \")\"".into()))
        }
      },
      atom => {
        if !is_atom(atom)? {
          return Err(parse_error(format!("invalid atom \"{atom}\"")));
        }
        SExp::atom(atom)
      }
    };
    match open.last_mut() {
      Some(parent) => parent.push(finished),
      None => done = Some(finished),
    }
  }

  if !open.is_empty() {
    return Err(parse_error(format!(
      "mismatched parens, {} list(s) never closed",
      open.len()
    )));
  }
  done.ok_or_else(|| parse_error("empty input".into()))
}
