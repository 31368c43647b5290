//! End-to-end resolution through the public API, using a table
//! loaded from JSON.

use precedence_resolver::parsing::{resolve, Expr, OperatorTable, Resolver, Token};

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use std::thread;

const TABLE: &str = r#"{
  "juxtaposition": 10,
  "operators": [
    { "name": "+", "precedence": 3, "associativity": "left" },
    { "name": "-", "precedence": 3, "associativity": "left" },
    { "name": "*", "precedence": 7, "associativity": "left" },
    { "name": "^", "precedence": 8, "associativity": "right" }
  ]
}"#;

fn table() -> OperatorTable {
  OperatorTable::from_json_str(TABLE).unwrap()
}

/// Splits a string on single spaces. Words made of operator
/// characters become operators, everything else becomes an atom.
fn segment(source: &str) -> Vec<Token<String>> {
  source.split(' ').map(|word| {
    if word.chars().all(|c| "+-*^".contains(c)) {
      Token::operator(word, 1)
    } else {
      Token::atom(word.to_owned(), 1)
    }
  }).collect()
}

fn leaf(name: &str) -> Expr<String> {
  Expr::atom(name.to_owned())
}

#[test]
fn test_scenarios() {
  let table = table();
  let resolver = Resolver::new(&table);
  let cases = vec![
    ("a + b * c", Expr::infix(leaf("a"), "+", Expr::infix(leaf("b"), "*", leaf("c")))),
    ("a - b - c", Expr::infix(Expr::infix(leaf("a"), "-", leaf("b")), "-", leaf("c"))),
    ("a ^ b ^ c", Expr::infix(leaf("a"), "^", Expr::infix(leaf("b"), "^", leaf("c")))),
    ("f a b", Expr::apply(Expr::apply(leaf("f"), leaf("a")), leaf("b"))),
    ("+", Expr::section_sides("+")),
    ("a +", Expr::section_left(leaf("a"), "+")),
    ("+ a", Expr::section_right("+", leaf("a"))),
  ];
  for (source, expected) in cases {
    let result = resolver.resolve(segment(source)).unwrap();
    assert_eq!(strip_offsets(&result), expected, "while resolving {:?}", source);
  }
}

#[test]
fn test_reassociating_table_changes_grouping() {
  let json = TABLE.replace(r#""right""#, r#""left""#);
  let table = OperatorTable::from_json_str(&json).unwrap();
  let result = resolve(&table, segment("a ^ b ^ c")).unwrap();
  assert_eq!(
    strip_offsets(&result),
    Expr::infix(Expr::infix(leaf("a"), "^", leaf("b")), "^", leaf("c")),
  );
}

#[test]
fn test_source_is_reconstructed() {
  let table = table();
  for source in ["a + b * c", "f a b", "+ a", "a +", "* + - a", "f a ^ g b - c"] {
    let result = resolve(&table, segment(source)).unwrap();
    assert_eq!(result.to_string(), source);
  }
}

#[test]
fn test_concurrent_resolution_shares_table() {
  let table = OperatorTable::common();
  let source = "f x + g y * z ^ w ^ v - h";
  let expected = resolve(table, segment(source)).unwrap();
  let results: Vec<Expr<String>> = thread::scope(|scope| {
    let handles: Vec<_> = (0..8)
      .map(|_| scope.spawn(|| resolve(table, segment(source)).unwrap()))
      .collect();
    handles.into_iter().map(|handle| handle.join().unwrap()).collect()
  });
  for result in results {
    assert_eq!(result, expected);
  }
}

/// Rebuilds the tree with all offsets zeroed, for comparison against
/// trees built with the unspaced constructors.
fn strip_offsets(expr: &Expr<String>) -> Expr<String> {
  match expr {
    Expr::Atom(value) => Expr::atom(value.clone()),
    Expr::Infix(infix) => Expr::infix(strip_offsets(&infix.left), infix.operator.clone(), strip_offsets(&infix.right)),
    Expr::SectionLeft(section) => Expr::section_left(strip_offsets(&section.left), section.operator.clone()),
    Expr::SectionRight(section) => Expr::section_right(section.operator.clone(), strip_offsets(&section.right)),
    Expr::SectionSides(operator) => Expr::SectionSides(operator.clone()),
    Expr::Apply(apply) => Expr::apply(strip_offsets(&apply.function), strip_offsets(&apply.argument)),
  }
}

fn token_strategy() -> impl Strategy<Value = Token<String>> {
  prop_oneof![
    ("[a-z]{1,3}", 0..4usize).prop_map(|(name, offset)| Token::atom(name, offset)),
    (prop::sample::select(vec!["+", "-", "*", "^"]), 0..4usize)
      .prop_map(|(name, offset)| Token::operator(name, offset)),
  ]
}

fn segment_strategy() -> impl Strategy<Value = Vec<Token<String>>> {
  prop::collection::vec(token_strategy(), 1..40)
}

proptest! {
  #[test]
  fn prop_every_segment_resolves(tokens in segment_strategy()) {
    prop_assert!(resolve(&table(), tokens).is_ok());
  }

  #[test]
  fn prop_resolution_is_deterministic(tokens in segment_strategy()) {
    let table = table();
    let first = resolve(&table, tokens.clone()).unwrap();
    let second = resolve(&table, tokens).unwrap();
    prop_assert_eq!(first, second);
  }

  #[test]
  fn prop_offsets_survive_resolution(tokens in segment_strategy()) {
    let leading = tokens[0].offset().0;
    let text: String = tokens.iter().map(|token| token.to_string()).collect();
    let result = resolve(&table(), tokens).unwrap();
    prop_assert_eq!(result.to_string(), &text[leading..]);
  }
}
