//! Terminal colouring of printed expressions.

use crate::SymdiffError;

/// 256-colour palette indices, cycled by nesting depth.
pub const RAINBOW: [u8; 6] = [19, 124, 202, 11, 34, 51];

fn paint(out: &mut String, paren: char, color: u8) {
  out.push_str(&format!("\x1b[38;5;{color}m{paren}\x1b[0m"));
}

/// Wrap every parenthesis pair of `text` in a colour escape picked by its
/// nesting depth, so matching parens share a colour.
pub fn rainbow_parens(
  text: &str,
  palette: &[u8],
) -> Result<String, SymdiffError> {
  if palette.is_empty() {
    return Err(SymdiffError::InvariantViolation(
      "need at least one colour to paint parentheses".into(),
    ));
  }

  let mut out = String::with_capacity(text.len() * 4);
  let mut open = 0usize;
  for c in text.chars() {
    match c {
      '(' => {
        open += 1;
        paint(&mut out, c, palette[open % palette.len()]);
      }
      ')' => {
        if open == 0 {
          return Err(SymdiffError::ParseError(format!(
            "mismatched parentheses in \"{text}\""
          )));
        }
        paint(&mut out, c, palette[open % palette.len()]);
        open -= 1;
      }
      _ => out.push(c),
    }
  }
  if open > 0 {
    return Err(SymdiffError::ParseError(format!(
      "mismatched parentheses in \"{text}\""
    )));
  }
  Ok(out)
}
