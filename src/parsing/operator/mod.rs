//! Operators and the table describing how they bind.

mod associativity;
mod precedence;
mod table;
pub mod config;
pub mod error;

pub use associativity::Associativity;
pub use precedence::Precedence;
pub use table::OperatorTable;
pub use error::{OperatorTableError, UnknownOperatorError};

use std::fmt::{self, Display, Formatter};

/// The identity of an operator, as produced by the tokenizer.
///
/// Besides textual operators, there is one synthetic identity,
/// [`OperatorId::Juxtaposition`], which stands for function
/// application between two adjacent operands. It has no textual
/// representation, so it displays as the empty string and a resolved
/// tree prints back as its source. Diagnostics that need a visible
/// name use `juxtaposition` instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperatorId {
  Symbol(String),
  Juxtaposition,
}

/// An operator has a precedence and an associativity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
  id: OperatorId,
  assoc: Associativity,
  prec: Precedence,
}

impl OperatorId {
  pub fn symbol(name: impl Into<String>) -> Self {
    OperatorId::Symbol(name.into())
  }

  pub fn is_juxtaposition(&self) -> bool {
    matches!(self, OperatorId::Juxtaposition)
  }

  /// The text of the operator as written in the source. Empty for
  /// juxtaposition.
  pub fn as_str(&self) -> &str {
    match self {
      OperatorId::Symbol(name) => name,
      OperatorId::Juxtaposition => "",
    }
  }
}

impl Operator {
  /// Constructs a new textual operator with the given properties.
  pub fn new(name: impl Into<String>, assoc: Associativity, prec: Precedence) -> Operator {
    Operator {
      id: OperatorId::symbol(name),
      assoc,
      prec,
    }
  }

  /// The juxtaposition operator. Application always associates to
  /// the left, so `f a b` is `(f a) b`.
  pub fn juxtaposition(prec: Precedence) -> Operator {
    Operator {
      id: OperatorId::Juxtaposition,
      assoc: Associativity::Left,
      prec,
    }
  }

  pub fn id(&self) -> &OperatorId {
    &self.id
  }

  pub fn associativity(&self) -> Associativity {
    self.assoc
  }

  pub fn precedence(&self) -> Precedence {
    self.prec
  }
}

impl From<&str> for OperatorId {
  fn from(name: &str) -> Self {
    OperatorId::symbol(name)
  }
}

impl Display for OperatorId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_juxtaposition_is_left_assoc() {
    let op = Operator::juxtaposition(Precedence::new(10));
    assert_eq!(op.associativity(), Associativity::Left);
    assert_eq!(op.precedence(), Precedence::new(10));
    assert!(op.id().is_juxtaposition());
  }

  #[test]
  fn test_operator_id_text() {
    assert_eq!(OperatorId::from("+").to_string(), "+");
    assert_eq!(OperatorId::Juxtaposition.to_string(), "");
    assert_eq!(OperatorId::Juxtaposition.as_str(), "");
    let op = Operator::new("^", Associativity::Right, Precedence::new(8));
    assert_eq!(op.id().to_string(), "^");
  }
}
