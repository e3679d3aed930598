use super::*;

mod grammar {
  use super::*;

  #[test]
  fn constant() {
    assert_eq!(parse_poly("70").unwrap(), PolyExp::constant(70));
    assert_eq!(parse_poly("-3").unwrap(), PolyExp::constant(-3));
  }

  #[test]
  fn monomial() {
    assert_eq!(parse_poly("( ^ x 2 )").unwrap(), PolyExp::monomial("x", 2));
    assert_eq!(
      parse_poly("(mon alpha -7)").unwrap(),
      PolyExp::monomial("alpha", -7)
    );
  }

  #[test]
  fn product() {
    assert_eq!(
      parse_poly("(* 7 (^ x 2))").unwrap(),
      PolyExp::product(7, PolyExp::monomial("x", 2))
    );
    assert_eq!(
      parse_poly("(prod -1 (prod 2 5))").unwrap(),
      PolyExp::product(-1, PolyExp::product(2, PolyExp::constant(5)))
    );
  }

  #[test]
  fn sum() {
    assert_eq!(
      parse_poly("(+ 1 (^ x 1) (* 3 (^ x 2)))").unwrap(),
      PolyExp::Sum(vec![
        PolyExp::constant(1),
        PolyExp::monomial("x", 1),
        PolyExp::product(3, PolyExp::monomial("x", 2)),
      ])
    );
  }

  #[test]
  fn symbols_are_case_sensitive() {
    assert_ne!(parse_poly("(^ X 1)").unwrap(), parse_poly("(^ x 1)").unwrap());
  }
}

mod semantic_errors {
  use super::*;

  fn assert_semantic(raw: &str) {
    match parse_poly(raw) {
      Err(SymdiffError::SemanticError { .. }) => {}
      other => panic!("{raw}: expected a semantic error, got {other:?}"),
    }
  }

  #[test]
  fn non_integer_constant() {
    assert_semantic("x");
    assert_semantic("-");
    assert_semantic("1-2");
    assert_semantic("99999999999999999999");
  }

  #[test]
  fn sum_needs_two_terms() {
    assert_semantic("(+)");
    assert_semantic("(+ 1)");
    assert_semantic("(sum (^ x 1))");
  }

  #[test]
  fn monomial_arity_and_symbol() {
    assert_semantic("(^ x)");
    assert_semantic("(^ x 1 2)");
    assert_semantic("(^ x1 2)");
    assert_semantic("(^ x-y 2)");
    assert_semantic("(^ 2 2)");
    assert_semantic("(^ x y)");
    assert_semantic("(^ (x) 2)");
  }

  #[test]
  fn product_needs_constant_left() {
    assert_semantic("(* (^ x 1) (^ x 2))");
    assert_semantic("(* (+ 1 2) 3)");
    assert_semantic("(* 2)");
    assert_semantic("(* 2 3 4)");
  }

  #[test]
  fn unknown_head() {
    assert_semantic("()");
    assert_semantic("(f 1 2)");
    assert_semantic("((+ 1 2) 3)");
    assert_semantic("(' 1 x 2)");
  }

  #[test]
  fn error_names_offending_expression() {
    let err = parse_poly("(+ (^ x 1) (f 2))").unwrap_err();
    assert!(err.to_string().contains("( f 2 )"), "{err}");
  }
}

mod serialization {
  use super::*;

  #[test]
  fn shapes() {
    let poly = PolyExp::Sum(vec![
      PolyExp::product(-2, PolyExp::monomial("x", 3)),
      PolyExp::monomial("y", 0),
      PolyExp::constant(5),
    ]);
    insta::assert_snapshot!(
      poly.to_sexp().to_string(),
      @"( + ( * -2 ( ^ x 3 ) ) ( ^ y 0 ) 5 )"
    );
  }

  #[test]
  fn keywords_normalize_to_sugar() {
    assert_eq!(
      parse_poly("(sum (mon x 1) (prod 2 3))").unwrap().to_string(),
      "( + ( ^ x 1 ) ( * 2 3 ) )"
    );
  }

  #[test]
  fn round_trip() {
    let polys = [
      PolyExp::constant(0),
      PolyExp::monomial("x", -4),
      PolyExp::product(3, PolyExp::product(-1, PolyExp::monomial("z", 9))),
      PolyExp::Sum(vec![
        PolyExp::Sum(vec![PolyExp::constant(1), PolyExp::monomial("x", 1)]),
        PolyExp::product(2, PolyExp::constant(3)),
      ]),
    ];
    for poly in polys {
      let text = poly.to_sexp().to_string();
      let sexp: SExp = text.parse().unwrap();
      assert_eq!(sexp, poly.to_sexp());
      assert_eq!(PolyExp::from_sexp(&sexp).unwrap(), poly, "{text}");
    }
  }
}

mod construction {
  use super::*;

  #[test]
  fn sum_constructor_checks_arity() {
    assert!(matches!(
      PolyExp::sum(vec![PolyExp::constant(1)]),
      Err(SymdiffError::InvariantViolation(_))
    ));
    assert!(matches!(
      PolyExp::sum(vec![]),
      Err(SymdiffError::InvariantViolation(_))
    ));
    assert!(
      PolyExp::sum(vec![PolyExp::constant(1), PolyExp::constant(2)]).is_ok()
    );
  }
}
