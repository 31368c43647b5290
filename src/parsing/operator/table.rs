use super::{Operator, OperatorId};
use super::precedence::Precedence;
use super::associativity::Associativity;
use super::error::{OperatorTableError, UnknownOperatorError};

use once_cell::sync::Lazy;

use std::collections::{hash_map, HashMap};
use std::iter;

static COMMON_OPERATORS: Lazy<OperatorTable> = Lazy::new(|| {
  let mut table = OperatorTable::new(Precedence::new(100));
  for op in [
    Operator::new("=", Associativity::Right, Precedence::new(1)),
    Operator::new("->", Associativity::Right, Precedence::new(2)),
    Operator::new(",", Associativity::Right, Precedence::new(3)),
    Operator::new("||", Associativity::Right, Precedence::new(4)),
    Operator::new("&&", Associativity::Right, Precedence::new(5)),
    Operator::new("==", Associativity::Left, Precedence::new(6)),
    Operator::new("!=", Associativity::Left, Precedence::new(6)),
    Operator::new("<", Associativity::Left, Precedence::new(6)),
    Operator::new(">", Associativity::Left, Precedence::new(6)),
    Operator::new("<=", Associativity::Left, Precedence::new(6)),
    Operator::new(">=", Associativity::Left, Precedence::new(6)),
    Operator::new("+", Associativity::Left, Precedence::new(7)),
    Operator::new("-", Associativity::Left, Precedence::new(7)),
    Operator::new("*", Associativity::Left, Precedence::new(8)),
    Operator::new("/", Associativity::Left, Precedence::new(8)),
    Operator::new("%", Associativity::Left, Precedence::new(8)),
    Operator::new("^", Associativity::Right, Precedence::new(9)),
  ] {
    table.insert(op);
  }
  table
});

/// A table of operators, indexed by their name, together with the
/// properties of the juxtaposition operator.
///
/// The table is read-only while resolving, so a single table can be
/// shared between any number of concurrent resolutions.
#[derive(Debug, Clone)]
pub struct OperatorTable {
  by_name: HashMap<String, Operator>,
  juxtaposition: Operator,
}

impl OperatorTable {
  /// An empty table whose juxtaposition operator has the given
  /// precedence.
  pub fn new(juxtaposition_prec: Precedence) -> OperatorTable {
    OperatorTable::with_capacity(juxtaposition_prec, 0)
  }

  pub fn with_capacity(juxtaposition_prec: Precedence, capacity: usize) -> OperatorTable {
    OperatorTable {
      by_name: HashMap::with_capacity(capacity),
      juxtaposition: Operator::juxtaposition(juxtaposition_prec),
    }
  }

  /// The default operator table. Juxtaposition binds tightest, then
  /// the usual arithmetic, comparison, and logical operators.
  pub fn common() -> &'static OperatorTable {
    &COMMON_OPERATORS
  }

  pub fn get(&self, name: &str) -> Option<&Operator> {
    self.by_name.get(name)
  }

  pub fn juxtaposition(&self) -> &Operator {
    &self.juxtaposition
  }

  /// Looks up the properties of the operator with the given identity.
  /// Juxtaposition is always present.
  pub fn lookup(&self, id: &OperatorId) -> Result<&Operator, UnknownOperatorError> {
    match id {
      OperatorId::Juxtaposition => Ok(&self.juxtaposition),
      OperatorId::Symbol(name) => self.get(name).ok_or_else(|| UnknownOperatorError { id: id.clone() }),
    }
  }

  /// Adds an operator to the table, returning the operator it
  /// replaced, if any. Inserting a juxtaposition operator replaces
  /// the table's juxtaposition entry.
  pub fn insert(&mut self, op: Operator) -> Option<Operator> {
    match op.id() {
      OperatorId::Juxtaposition => Some(std::mem::replace(&mut self.juxtaposition, op)),
      OperatorId::Symbol(name) => {
        let name = name.to_owned();
        self.by_name.insert(name, op)
      }
    }
  }

  /// Checks that juxtaposition binds strictly tighter than every
  /// textual operator.
  pub fn validate(&self) -> Result<(), OperatorTableError> {
    let juxtaposition = self.juxtaposition.precedence();
    // Sort for a deterministic error when several operators offend.
    let mut offenders: Vec<&Operator> = self.by_name.values()
      .filter(|op| op.precedence() >= juxtaposition)
      .collect();
    offenders.sort_by_key(|op| op.id().as_str().to_owned());
    match offenders.first() {
      None => Ok(()),
      Some(op) => Err(OperatorTableError::JuxtapositionNotTightest {
        name: op.id().as_str().to_owned(),
        precedence: op.precedence(),
        juxtaposition,
      }),
    }
  }

  /// All textual operators in the table, in no particular order. The
  /// juxtaposition operator is not included.
  pub fn iter(&self) -> impl Iterator<Item = &Operator> {
    self.by_name.values()
  }

  pub fn len(&self) -> usize {
    self.by_name.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_name.is_empty()
  }
}

impl IntoIterator for OperatorTable {
  type Item = Operator;
  type IntoIter = iter::Chain<hash_map::IntoValues<String, Operator>, iter::Once<Operator>>;

  /// Yields every textual operator, followed by the juxtaposition
  /// operator.
  fn into_iter(self) -> Self::IntoIter {
    self.by_name.into_values().chain(iter::once(self.juxtaposition))
  }
}

impl FromIterator<Operator> for OperatorTable {
  /// Collects operators into a table. Without a juxtaposition
  /// operator in the input, juxtaposition gets [`Precedence::MAX`].
  fn from_iter<I>(iter: I) -> Self
  where I : IntoIterator<Item = Operator> {
    let iter = iter.into_iter();
    let (len_bound, _) = iter.size_hint();
    let mut table = OperatorTable::with_capacity(Precedence::MAX, len_bound);
    for op in iter {
      table.insert(op);
    }
    table
  }
}
