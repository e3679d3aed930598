use log::debug;
use pest::error::ErrorVariant;
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod differentiate;
pub mod display;
pub mod poly;
pub mod repl;
pub mod sexp;
pub mod simplify;

pub use differentiate::differentiate;
pub use poly::PolyExp;
pub use sexp::SExp;
pub use simplify::simplify;

#[derive(Parser)]
#[grammar = "sexp.pest"]
pub struct SexpParser;

/// The symbol differentiated against when none is configured.
pub const DEFAULT_BOUND_VARIABLE: &str = "x";

/// Prefix of every parse error raised because input nests too deeply.
pub const NESTING_TOO_DEEP: &str = "nesting too deep";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymdiffError {
  #[error("Parse error: {0}")]
  ParseError(String),
  #[error("Semantic error: {message} in {expr}")]
  SemanticError { expr: String, message: String },
  #[error(
    "cannot differentiate a polynomial function bound in a different variable \
     (bound: {bound}, found: {found})"
  )]
  VariableMismatch { bound: String, found: String },
  #[error("Invariant violation: {0}")]
  InvariantViolation(String),
  #[error("Integer overflow: {0}")]
  Overflow(String),
}

impl SexpParser {
  pub fn parse_token(
    rule: Rule,
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(rule, input).map_err(Box::new)
  }
}

/// Run one of the token rules (`Atom`, `Symbol`, `Integer`) over `input`.
pub fn parse_token(
  rule: Rule,
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  SexpParser::parse_token(rule, input)
}

/// Whether `input` is, in its entirety, a token accepted by `rule`.
///
/// A plain mismatch is `Ok(false)`. Pest giving up for lack of resources
/// (its call or stack limits) is reported as a nesting error instead.
pub fn matches_token(rule: Rule, input: &str) -> Result<bool, SymdiffError> {
  match parse_token(rule, input) {
    Ok(_) => Ok(true),
    Err(err) => token_failure(&err),
  }
}

fn token_failure(
  err: &pest::error::Error<Rule>,
) -> Result<bool, SymdiffError> {
  match &err.variant {
    ErrorVariant::ParsingError { .. } => Ok(false),
    other => Err(SymdiffError::ParseError(format!(
      "{NESTING_TOO_DEEP}: {}",
      other.message()
    ))),
  }
}

/// Parse text all the way to a typed polynomial.
pub fn parse_poly(input: &str) -> Result<PolyExp, SymdiffError> {
  let sexp: SExp = input.parse()?;
  PolyExp::from_sexp(&sexp)
}

/// Parse, differentiate and print without simplifying.
pub fn differentiate_text(
  var: &str,
  input: &str,
) -> Result<String, SymdiffError> {
  let poly = parse_poly(input)?;
  let derivative = differentiate(var, &poly)?;
  debug!("d/d{var} {poly} = {derivative}");
  Ok(derivative.to_string())
}

/// Parse, simplify and print.
pub fn simplify_text(input: &str) -> Result<String, SymdiffError> {
  let poly = parse_poly(input)?;
  Ok(simplify(&poly)?.to_string())
}

/// The full pipeline used by the line loop: parse, differentiate with
/// respect to `var`, simplify and print.
pub fn interpret(var: &str, input: &str) -> Result<String, SymdiffError> {
  let poly = parse_poly(input)?;
  let derivative = differentiate(var, &poly)?;
  debug!("d/d{var} {poly} = {derivative}");
  Ok(simplify(&derivative)?.to_string())
}
