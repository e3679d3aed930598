use crate::{PolyExp, SymdiffError};

/// Differentiate `poly` with respect to `var`.
///
/// The result is not simplified: the power rule leaves a
/// `( * n ( ^ x n-1 ) )` product at every monomial and scalar multiples
/// keep their coefficient wrapped around the derivative of their operand.
/// Products only ever scale by a constant, so no two-factor product rule
/// is needed.
pub fn differentiate(
  var: &str,
  poly: &PolyExp,
) -> Result<PolyExp, SymdiffError> {
  match poly {
    PolyExp::Constant(_) => Ok(PolyExp::zero()),
    PolyExp::Monomial { symbol, exponent } => {
      differentiate_monomial(var, symbol, *exponent)
    }
    PolyExp::Product { coefficient, inner } => {
      Ok(PolyExp::product(*coefficient, differentiate(var, inner)?))
    }
    PolyExp::Sum(terms) => terms
      .iter()
      .map(|term| differentiate(var, term))
      .collect::<Result<Vec<_>, _>>()
      .map(PolyExp::Sum),
  }
}

fn differentiate_monomial(
  var: &str,
  symbol: &str,
  exponent: i64,
) -> Result<PolyExp, SymdiffError> {
  if symbol != var {
    return Err(SymdiffError::VariableMismatch {
      bound: var.to_string(),
      found: symbol.to_string(),
    });
  }
  // Keep the monomial shape for the zero polynomial.
  if exponent == 0 {
    return Ok(PolyExp::product(0, PolyExp::monomial(symbol, 0)));
  }
  let lowered = exponent.checked_sub(1).ok_or_else(|| {
    SymdiffError::Overflow(format!("exponent {exponent} - 1"))
  })?;
  Ok(PolyExp::product(exponent, PolyExp::monomial(symbol, lowered)))
}
