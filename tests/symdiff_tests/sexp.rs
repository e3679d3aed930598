use super::*;

fn parse(raw: &str) -> SExp {
  raw.parse().unwrap()
}

mod parsing {
  use super::*;

  #[test]
  fn nested_lists_and_empty_list() {
    let expected = SExp::List(vec![
      SExp::atom("A"),
      SExp::List(vec![SExp::atom("B"), SExp::atom("0")]),
      SExp::List(vec![]),
    ]);
    assert_eq!(parse("( A ( B 0) ())"), expected);
  }

  #[test]
  fn bare_atom() {
    assert_eq!(parse("  x-1 "), SExp::atom("x-1"));
    assert_eq!(parse("+"), SExp::atom("+"));
  }

  #[test]
  fn whitespace_is_insignificant() {
    let packed = parse("(+(m 3 x 6)(' 5 x 0))");
    let spaced = parse("  (+   \t\t\t\n( m             3 x 6   )     (' 5 x 0\r)\n\n)");
    assert_eq!(packed, spaced);
  }

  #[test]
  fn unicode_spaces_do_not_separate() {
    for raw in ["(+\u{a0}1 2)", "\u{2003}x", "( x\u{85})"] {
      assert!(
        matches!(raw.parse::<SExp>(), Err(SymdiffError::ParseError(_))),
        "{raw:?} should not parse"
      );
    }
  }

  #[test]
  fn empty_list_forms() {
    assert!(parse("()").is_empty_list());
    assert!(parse("(   )").is_empty_list());
  }

  #[test]
  fn unbalanced_parens_fail() {
    for raw in ["(", ")", "( a", "a )", "( a ( b )", "( a ) )", "(a)(b)"] {
      assert!(
        matches!(raw.parse::<SExp>(), Err(SymdiffError::ParseError(_))),
        "{raw} should not parse"
      );
    }
  }

  #[test]
  fn invalid_atom_characters_fail() {
    for raw in ["", "a.b", "( a $ )", "( x_1 )", "( a+b )", "( a\u{a0}b )"] {
      assert!(
        matches!(raw.parse::<SExp>(), Err(SymdiffError::ParseError(_))),
        "{raw} should not parse"
      );
    }
  }
}

mod printing {
  use super::*;

  #[test]
  fn empty_list_prints_with_space() {
    assert_eq!(SExp::List(vec![]).to_string(), "( )");
  }

  #[test]
  fn nested_list() {
    insta::assert_snapshot!(
      parse("(+(^ x 1)(* 2 (^ x 2)) ())").to_string(),
      @"( + ( ^ x 1 ) ( * 2 ( ^ x 2 ) ) ( ) )"
    );
  }

  #[test]
  fn printed_text_reparses_to_equal_tree() {
    for raw in [
      "x",
      "()",
      "( A ( B 0) ())",
      "(+(^ x 1)(* 2 (^ x 2)))",
      "((()) (a (b (c -1))))",
    ] {
      let sexp = parse(raw);
      assert_eq!(parse(&sexp.to_string()), sexp, "{raw}");
    }
  }
}

mod equality {
  use super::*;

  #[test]
  fn structural() {
    assert_eq!(parse("(a (b))"), parse("( a ( b ) )"));
    assert_ne!(parse("(a (b))"), parse("(a b)"));
    assert_ne!(parse("(a b)"), parse("(a b c)"));
    assert_ne!(parse("()"), parse("(())"));
    assert_ne!(parse("a"), parse("(a)"));
  }
}
