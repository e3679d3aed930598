//! Normalization of polynomial expressions into a flat sum of folded
//! monomials followed by a single constant.
//!
//! [`simplify`] runs five stages in a fixed order:
//!
//! 1. [`apply_products`] pushes scalar multipliers down onto monomials and
//!    constants.
//! 2. [`flatten`] splices nested sums into one term list.
//! 3. [`fold`] adds up like terms per `(symbol, exponent)`.
//! 4. [`drop_zero`] removes zero constants unless nothing else is left.
//! 5. [`join`] wraps the remaining terms back into a sum.
//!
//! Each stage is public so callers can stop part way.

use std::collections::BTreeMap;

use log::debug;

use crate::{PolyExp, SymdiffError};

pub fn simplify(poly: &PolyExp) -> Result<PolyExp, SymdiffError> {
  let distributed = apply_products(1, poly)?;
  debug!("distributed: {distributed}");

  let terms = flatten(&distributed);
  debug!("flattened into {} term(s)", terms.len());

  let terms = fold(terms)?;
  let terms = drop_zero(terms);
  let joined = join(terms)?;
  debug!("simplified {poly} to {joined}");
  Ok(joined)
}

fn overflow(op: &str, a: i64, b: i64) -> SymdiffError {
  SymdiffError::Overflow(format!("{a} {op} {b}"))
}

fn checked_mul(a: i64, b: i64) -> Result<i64, SymdiffError> {
  a.checked_mul(b).ok_or_else(|| overflow("*", a, b))
}

fn checked_add(a: i64, b: i64) -> Result<i64, SymdiffError> {
  a.checked_add(b).ok_or_else(|| overflow("+", a, b))
}

/// Multiply `poly` by `mult`, distributing the factor through sums and
/// collapsing chains of products until it rests on a constant (which
/// absorbs it) or a monomial (which gets wrapped in a product).
/// A zero multiplier erases the whole subtree.
pub fn apply_products(
  mult: i64,
  poly: &PolyExp,
) -> Result<PolyExp, SymdiffError> {
  if mult == 0 {
    return Ok(PolyExp::zero());
  }
  match poly {
    PolyExp::Constant(c) => Ok(PolyExp::Constant(checked_mul(*c, mult)?)),
    PolyExp::Monomial { .. } => Ok(PolyExp::product(mult, poly.clone())),
    PolyExp::Sum(terms) => terms
      .iter()
      .map(|term| apply_products(mult, term))
      .collect::<Result<Vec<_>, _>>()
      .map(PolyExp::Sum),
    PolyExp::Product { coefficient, inner } => {
      apply_products(checked_mul(*coefficient, mult)?, inner)
    }
  }
}

/// Splice nested sums into one ordered term list. Products are leaves
/// here, even when they wrap a sum.
pub fn flatten(poly: &PolyExp) -> Vec<PolyExp> {
  match poly {
    PolyExp::Sum(terms) => terms.iter().flat_map(flatten).collect(),
    leaf => vec![leaf.clone()],
  }
}

/// Combine like terms of a flat term list.
///
/// Terms that are not a constant, a monomial, or a product of a constant
/// with one of those are passed through first, in their original order.
/// Folded monomials follow, sorted by symbol then exponent, and the
/// accumulated constant always comes last, even when it is zero.
pub fn fold(terms: Vec<PolyExp>) -> Result<Vec<PolyExp>, SymdiffError> {
  let mut coefficients: BTreeMap<String, BTreeMap<i64, i64>> = BTreeMap::new();
  let mut constant = 0i64;
  let mut folded = Vec::new();

  for term in terms {
    match term {
      PolyExp::Constant(c) => constant = checked_add(constant, c)?,
      PolyExp::Monomial { symbol, exponent } => {
        let entry = coefficients
          .entry(symbol)
          .or_default()
          .entry(exponent)
          .or_insert(0);
        *entry = checked_add(*entry, 1)?;
      }
      PolyExp::Product { coefficient, inner } => match *inner {
        PolyExp::Monomial { symbol, exponent } => {
          let entry = coefficients
            .entry(symbol)
            .or_default()
            .entry(exponent)
            .or_insert(0);
          *entry = checked_add(*entry, coefficient)?;
        }
        PolyExp::Constant(c) => {
          constant = checked_add(constant, checked_mul(coefficient, c)?)?;
        }
        other => folded.push(PolyExp::product(coefficient, other)),
      },
      sum @ PolyExp::Sum(_) => folded.push(sum),
    }
  }

  for (symbol, powers) in coefficients {
    for (exponent, coefficient) in powers {
      // x^0 is a scalar
      if exponent == 0 {
        constant = checked_add(constant, coefficient)?;
        continue;
      }
      let monomial = PolyExp::monomial(symbol.clone(), exponent);
      if coefficient == 1 {
        folded.push(monomial);
      } else {
        folded.push(PolyExp::product(coefficient, monomial));
      }
    }
  }
  folded.push(PolyExp::Constant(constant));

  Ok(folded)
}

/// Remove zero constants, unless a lone zero is all there is.
pub fn drop_zero(terms: Vec<PolyExp>) -> Vec<PolyExp> {
  if terms.len() < 2 {
    return terms;
  }
  terms
    .into_iter()
    .filter(|term| !matches!(term, PolyExp::Constant(0)))
    .collect()
}

/// A single term stands on its own; more become one flat sum.
pub fn join(mut terms: Vec<PolyExp>) -> Result<PolyExp, SymdiffError> {
  if terms.len() == 1 {
    return Ok(terms.remove(0));
  }
  PolyExp::sum(terms)
}
