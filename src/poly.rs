//! Typed single-variable polynomial expressions and the grammar that maps
//! S-expressions onto them:
//!
//! ```text
//! poly   = sum | monomial | product | constant
//! sum    = "(" ("+"|"sum") poly poly {poly} ")"
//! mono   = "(" ("^"|"mon") symbol integer ")"
//! prod   = "(" ("*"|"prod") integer poly ")"
//! const  = integer
//! ```

use std::fmt;

use crate::sexp::{MONOMIAL_SUGAR, PRODUCT_SUGAR, SUM_SUGAR};
use crate::{matches_token, Rule, SExp, SymdiffError};

pub const SUM_KEYWORD: &str = "sum";
pub const MONOMIAL_KEYWORD: &str = "mon";
pub const PRODUCT_KEYWORD: &str = "prod";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolyExp {
  Constant(i64),
  /// `symbol ^ exponent`
  Monomial { symbol: String, exponent: i64 },
  /// `coefficient * inner`. The left factor is always a bare constant.
  Product {
    coefficient: i64,
    inner: Box<PolyExp>,
  },
  /// At least two terms.
  Sum(Vec<PolyExp>),
}

/// Polynomial variables must be purely alphabetic.
pub fn is_symbol(s: &str) -> Result<bool, SymdiffError> {
  matches_token(Rule::Symbol, s)
}

fn semantic(sexp: &SExp, message: impl Into<String>) -> SymdiffError {
  SymdiffError::SemanticError {
    expr: sexp.to_string(),
    message: message.into(),
  }
}

/// Attach the enclosing expression to a failure from one of its operands.
/// Internal invariant failures and token-level parse failures pass through
/// untouched.
fn wrap(sexp: &SExp, context: &str, err: SymdiffError) -> SymdiffError {
  match err {
    SymdiffError::InvariantViolation(_) | SymdiffError::ParseError(_) => err,
    other => semantic(sexp, format!("{context}: {other}")),
  }
}

fn parse_integer(sexp: &SExp, what: &str) -> Result<i64, SymdiffError> {
  let token = sexp
    .as_atom()
    .ok_or_else(|| semantic(sexp, format!("{what} must be an atom")))?;
  if !matches_token(Rule::Integer, token)? {
    return Err(semantic(sexp, format!("{what} is not an integer")));
  }
  token
    .parse::<i64>()
    .map_err(|e| semantic(sexp, format!("{what} out of range: {e}")))
}

fn head_is(head: &SExp, keyword: &str, sugar: &str) -> bool {
  matches!(head.as_atom(), Some(a) if a == keyword || a == sugar)
}

impl PolyExp {
  pub fn constant(value: i64) -> Self {
    PolyExp::Constant(value)
  }

  pub fn zero() -> Self {
    PolyExp::Constant(0)
  }

  pub fn monomial(symbol: impl Into<String>, exponent: i64) -> Self {
    PolyExp::Monomial {
      symbol: symbol.into(),
      exponent,
    }
  }

  pub fn product(coefficient: i64, inner: PolyExp) -> Self {
    PolyExp::Product {
      coefficient,
      inner: Box::new(inner),
    }
  }

  /// Build a sum, rejecting fewer than two terms.
  pub fn sum(terms: Vec<PolyExp>) -> Result<Self, SymdiffError> {
    let sum = PolyExp::Sum(terms);
    sum.check()?;
    Ok(sum)
  }

  pub fn is_product(&self) -> bool {
    matches!(self, PolyExp::Product { .. })
  }

  /// Verify the structural invariants the type system cannot express:
  /// sums carry at least two terms and monomial symbols are alphabetic.
  pub fn check(&self) -> Result<(), SymdiffError> {
    self.check_node()?;
    match self {
      PolyExp::Product { inner, .. } => inner.check(),
      PolyExp::Sum(terms) => terms.iter().try_for_each(PolyExp::check),
      _ => Ok(()),
    }
  }

  /// [`PolyExp::check`] for this node alone, children assumed checked.
  fn check_node(&self) -> Result<(), SymdiffError> {
    match self {
      PolyExp::Constant(_) | PolyExp::Product { .. } => Ok(()),
      PolyExp::Monomial { symbol, .. } => {
        if is_symbol(symbol)? {
          Ok(())
        } else {
          Err(SymdiffError::InvariantViolation(format!(
            "monomial bound to non-symbol {symbol:?}"
          )))
        }
      }
      PolyExp::Sum(terms) if terms.len() < 2 => {
        Err(SymdiffError::InvariantViolation(format!(
          "sum with {} term(s)",
          terms.len()
        )))
      }
      PolyExp::Sum(_) => Ok(()),
    }
  }

  /// Build a polynomial from a parsed S-expression.
  pub fn from_sexp(sexp: &SExp) -> Result<Self, SymdiffError> {
    let poly = match sexp {
      SExp::Atom(_) => PolyExp::Constant(parse_integer(sexp, "constant")?),
      SExp::List(items) => {
        let head = items.first().ok_or_else(|| {
          semantic(sexp, "empty list is not a polynomial")
        })?;
        if head_is(head, SUM_KEYWORD, SUM_SUGAR) {
          parse_sum(sexp, items)?
        } else if head_is(head, MONOMIAL_KEYWORD, MONOMIAL_SUGAR) {
          parse_monomial(sexp, items)?
        } else if head_is(head, PRODUCT_KEYWORD, PRODUCT_SUGAR) {
          parse_product(sexp, items)?
        } else {
          return Err(semantic(
            sexp,
            format!("unknown polynomial form with head {head}"),
          ));
        }
      }
    };
    poly.check_node()?;
    Ok(poly)
  }

  pub fn to_sexp(&self) -> SExp {
    match self {
      PolyExp::Constant(c) => SExp::atom(c.to_string()),
      PolyExp::Monomial { symbol, exponent } => SExp::List(vec![
        SExp::atom(MONOMIAL_SUGAR),
        SExp::atom(symbol.clone()),
        SExp::atom(exponent.to_string()),
      ]),
      PolyExp::Product { coefficient, inner } => SExp::List(vec![
        SExp::atom(PRODUCT_SUGAR),
        SExp::atom(coefficient.to_string()),
        inner.to_sexp(),
      ]),
      PolyExp::Sum(terms) => {
        let mut items = Vec::with_capacity(terms.len() + 1);
        items.push(SExp::atom(SUM_SUGAR));
        items.extend(terms.iter().map(PolyExp::to_sexp));
        SExp::List(items)
      }
    }
  }
}

fn parse_sum(sexp: &SExp, items: &[SExp]) -> Result<PolyExp, SymdiffError> {
  if items.len() < 3 {
    return Err(semantic(sexp, "a sum needs at least two terms"));
  }
  let terms = items[1..]
    .iter()
    .map(|item| {
      PolyExp::from_sexp(item)
        .map_err(|e| wrap(sexp, &format!("failed to parse term {item}"), e))
    })
    .collect::<Result<Vec<_>, _>>()?;
  Ok(PolyExp::Sum(terms))
}

fn not_a_symbol(sexp: &SExp, symbol: &SExp) -> SymdiffError {
  semantic(sexp, format!("{symbol} is not a valid symbol for a monomial"))
}

fn parse_monomial(
  sexp: &SExp,
  items: &[SExp],
) -> Result<PolyExp, SymdiffError> {
  let [_, symbol, exponent] = items else {
    return Err(semantic(sexp, "a monomial takes a symbol and an exponent"));
  };
  let name = match symbol.as_atom() {
    Some(s) => s,
    None => return Err(not_a_symbol(sexp, symbol)),
  };
  if !is_symbol(name)? {
    return Err(not_a_symbol(sexp, symbol));
  }
  let symbol = name.to_string();
  let exponent = parse_integer(exponent, "exponent")
    .map_err(|e| wrap(sexp, "failed to parse exponent", e))?;
  Ok(PolyExp::Monomial { symbol, exponent })
}

fn parse_product(
  sexp: &SExp,
  items: &[SExp],
) -> Result<PolyExp, SymdiffError> {
  let [_, left, right] = items else {
    return Err(semantic(
      sexp,
      "a product takes a constant and a polynomial",
    ));
  };
  let coefficient = match PolyExp::from_sexp(left) {
    Ok(PolyExp::Constant(c)) => c,
    Ok(_) => {
      return Err(semantic(
        sexp,
        format!("left multiplicand {left} must be a constant"),
      ))
    }
    Err(e) => return Err(wrap(sexp, "failed to parse left multiplicand", e)),
  };
  let inner = PolyExp::from_sexp(right)
    .map_err(|e| wrap(sexp, &format!("failed to parse {right}"), e))?;
  Ok(PolyExp::product(coefficient, inner))
}

impl fmt::Display for PolyExp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_sexp())
  }
}
