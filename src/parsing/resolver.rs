//! Shift/reduce resolution of operator segments.
//!
//! A segment is a flat run of operands and operators, such as `a + b *
//! c` or `f a b` or `+ a`. The resolver groups it into a single
//! [`Expr`] according to the precedence and associativity in an
//! [`OperatorTable`]. Adjacent operands are joined by the
//! juxtaposition operator, and operators with a missing operand become
//! sections.

use super::expr::{Expr, Infix, SectionLeft, SectionRight, Apply};
use super::operator::{OperatorId, OperatorTable, UnknownOperatorError};
use super::source::Offset;

use itertools::Itertools;
use thiserror::Error;

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// The operator an operand stands for when it is compared against
/// its neighbors.
static JUXTAPOSITION: OperatorId = OperatorId::Juxtaposition;

/// A token, for the purposes of resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T> {
  data: TokenData<T>,
  offset: Offset,
}

/// The contents of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenData<T> {
  /// An already-resolved expression.
  Operand(Expr<T>),
  /// An operator, whose properties live in the operator table.
  Operator(OperatorId),
}

/// Errors from [`resolve`]. All of them indicate a malformed segment,
/// which is a bug in whatever produced the segment rather than in the
/// user's program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
  #[error("Cannot resolve an empty segment")]
  EmptySegment,
  #[error("{0}")]
  UnknownOperator(#[from] UnknownOperatorError),
  #[error("No reduction applies to stack [{shape}]")]
  MalformedStack { shape: String },
}

/// Resolves segments against a fixed operator table. Holds no state
/// between calls, so it can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
  table: &'a OperatorTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
  Shift,
  Reduce,
}

/// The ways the top of the stack can be collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reduction {
  /// `op` alone, or `op` directly above another operator.
  SectionSides,
  /// `operand op`
  SectionLeft,
  /// `op operand`, with nothing or an operator below.
  SectionRight,
  /// `operand op operand`
  Infix,
  /// `operand operand`
  Apply,
}

impl<T> Token<T> {
  pub fn operand(expr: Expr<T>, offset: impl Into<Offset>) -> Self {
    Self { data: TokenData::Operand(expr), offset: offset.into() }
  }

  /// An operand consisting of a single leaf.
  pub fn atom(value: T, offset: impl Into<Offset>) -> Self {
    Self::operand(Expr::Atom(value), offset)
  }

  pub fn operator(id: impl Into<OperatorId>, offset: impl Into<Offset>) -> Self {
    Self { data: TokenData::Operator(id.into()), offset: offset.into() }
  }

  /// An explicit juxtaposition operator token. It is resolved like any
  /// other operator, using the table's juxtaposition properties.
  pub fn juxtaposition(offset: impl Into<Offset>) -> Self {
    Self::operator(OperatorId::Juxtaposition, offset)
  }

  pub fn data(&self) -> &TokenData<T> {
    &self.data
  }

  pub fn into_data(self) -> TokenData<T> {
    self.data
  }

  pub fn offset(&self) -> Offset {
    self.offset
  }

  pub fn is_operator(&self) -> bool {
    matches!(self.data, TokenData::Operator(_))
  }
}

impl<T> TokenData<T> {
  /// The operator this token contributes when deciding between shift
  /// and reduce. Operands contribute juxtaposition.
  fn binding_operator(&self) -> &OperatorId {
    match self {
      TokenData::Operator(id) => id,
      TokenData::Operand(_) => &JUXTAPOSITION,
    }
  }

  fn describe(&self) -> String {
    match self {
      TokenData::Operand(_) => String::from("operand"),
      TokenData::Operator(OperatorId::Juxtaposition) => String::from("juxtaposition"),
      TokenData::Operator(id) => format!("'{}'", id),
    }
  }
}

impl ResolveError {
  fn malformed<T>(stack: &[Token<T>]) -> Self {
    ResolveError::MalformedStack {
      shape: stack.iter().map(|token| token.data.describe()).join(" "),
    }
  }
}

impl<'a> Resolver<'a> {
  pub fn new(table: &'a OperatorTable) -> Self {
    Self { table }
  }

  pub fn table(&self) -> &'a OperatorTable {
    self.table
  }

  pub fn resolve<T, I>(&self, segment: I) -> Result<Expr<T>, ResolveError>
  where I: IntoIterator<Item = Token<T>> {
    resolve(self.table, segment)
  }
}

impl<T: Display> Display for TokenData<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TokenData::Operand(expr) => expr.fmt(f),
      TokenData::Operator(id) => id.fmt(f),
    }
  }
}

/// Writes the token as it appeared in the source, preceded by its
/// whitespace.
impl<T: Display> Display for Token<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.offset, self.data)
  }
}

/// Resolves a segment into a single expression.
///
/// The leading offset of the first token is not part of the result;
/// every other offset is preserved in the tree.
pub fn resolve<T, I>(table: &OperatorTable, segment: I) -> Result<Expr<T>, ResolveError>
where I: IntoIterator<Item = Token<T>> {
  run(table, segment).map_err(|err| {
    log::error!("Failed to resolve segment: {}", err);
    err
  })
}

fn run<T, I>(table: &OperatorTable, segment: I) -> Result<Expr<T>, ResolveError>
where I: IntoIterator<Item = Token<T>> {
  let mut input = segment.into_iter().peekable();
  let first = input.next().ok_or(ResolveError::EmptySegment)?;
  check_known(table, &first)?;
  let mut stack = vec![first];
  let mut shifted = 1;

  while let Some(next) = input.peek() {
    match step(table, &stack, next)? {
      Action::Shift => {
        if let Some(token) = input.next() {
          check_known(table, &token)?;
          log::trace!("shift {} onto stack of depth {}", token.data.describe(), stack.len());
          stack.push(token);
          shifted += 1;
        }
      }
      Action::Reduce => reduce(&mut stack)?,
    }
  }

  // Input is exhausted; collapse whatever remains.
  while !matches!(stack.as_slice(), [Token { data: TokenData::Operand(_), .. }]) {
    reduce(&mut stack)?;
  }

  match stack.pop().map(Token::into_data) {
    Some(TokenData::Operand(expr)) => {
      log::debug!("Resolved segment of {} tokens", shifted);
      Ok(expr)
    }
    _ => Err(ResolveError::malformed(&stack)),
  }
}

/// Fails if the token is an operator missing from the table. Every
/// operator is checked as it enters the stack, even ones that never
/// take part in a comparison.
fn check_known<T>(table: &OperatorTable, token: &Token<T>) -> Result<(), UnknownOperatorError> {
  if let TokenData::Operator(id) = &token.data {
    table.lookup(id)?;
  }
  Ok(())
}

fn step<T>(table: &OperatorTable, stack: &[Token<T>], next: &Token<T>) -> Result<Action, ResolveError> {
  let (top, below) = stack.split_last().ok_or_else(|| ResolveError::malformed(stack))?;
  let pending = match (&top.data, &next.data) {
    (TokenData::Operator(_), TokenData::Operand(_)) => return Ok(Action::Shift),
    (TokenData::Operator(top), TokenData::Operator(_)) => top,
    (TokenData::Operand(_), _) => match below.last() {
      None => return Ok(Action::Shift),
      Some(second) => second.data.binding_operator(),
    },
  };
  Ok(compare(table, pending, next.data.binding_operator())?)
}

/// Decides what to do when `next` arrives while `pending` is still
/// waiting for its right-hand side.
fn compare(table: &OperatorTable, pending: &OperatorId, next: &OperatorId) -> Result<Action, UnknownOperatorError> {
  let pending = table.lookup(pending)?;
  let next = table.lookup(next)?;
  let action = match next.precedence().cmp(&pending.precedence()) {
    Ordering::Greater => Action::Shift,
    Ordering::Less => Action::Reduce,
    Ordering::Equal => {
      if pending.associativity().is_left_assoc() && next.associativity().is_left_assoc() {
        Action::Reduce
      } else {
        Action::Shift
      }
    }
  };
  Ok(action)
}

fn reduction_for<T>(stack: &[Token<T>]) -> Option<Reduction> {
  use TokenData::{Operand, Operator};
  match stack {
    [] | [Token { data: Operand(_), .. }] => None,
    [.., Token { data: Operand(_), .. }, Token { data: Operator(_), .. }] => Some(Reduction::SectionLeft),
    [.., Token { data: Operator(_), .. }] => Some(Reduction::SectionSides),
    [.., Token { data: Operand(_), .. }, Token { data: Operator(_), .. }, Token { data: Operand(_), .. }] => Some(Reduction::Infix),
    [.., Token { data: Operator(_), .. }, Token { data: Operand(_), .. }] => Some(Reduction::SectionRight),
    [.., Token { data: Operand(_), .. }, Token { data: Operand(_), .. }] => Some(Reduction::Apply),
  }
}

/// Collapses the top of the stack into a single operand.
fn reduce<T>(stack: &mut Vec<Token<T>>) -> Result<(), ResolveError> {
  let Some(reduction) = reduction_for(stack) else {
    return Err(ResolveError::malformed(stack));
  };
  let reduced = match reduction {
    Reduction::SectionSides => {
      let (operator, offset) = pop_operator(stack)?;
      Token::operand(Expr::SectionSides(operator), offset)
    }
    Reduction::SectionLeft => {
      let (operator, operator_offset) = pop_operator(stack)?;
      let (left, offset) = pop_operand(stack)?;
      Token::operand(Expr::SectionLeft(Box::new(SectionLeft { left, operator_offset, operator })), offset)
    }
    Reduction::SectionRight => {
      let (right, right_offset) = pop_operand(stack)?;
      let (operator, offset) = pop_operator(stack)?;
      Token::operand(Expr::SectionRight(Box::new(SectionRight { operator, right_offset, right })), offset)
    }
    Reduction::Infix => {
      let (right, right_offset) = pop_operand(stack)?;
      let (operator, operator_offset) = pop_operator(stack)?;
      let (left, offset) = pop_operand(stack)?;
      let infix = Infix { left, operator_offset, operator, right_offset, right };
      Token::operand(Expr::Infix(Box::new(infix)), offset)
    }
    Reduction::Apply => {
      let (argument, argument_offset) = pop_operand(stack)?;
      let (function, offset) = pop_operand(stack)?;
      Token::operand(Expr::Apply(Box::new(Apply { function, argument_offset, argument })), offset)
    }
  };
  log::trace!("reduce {:?}, stack depth now {}", reduction, stack.len() + 1);
  stack.push(reduced);
  Ok(())
}

fn pop_operand<T>(stack: &mut Vec<Token<T>>) -> Result<(Expr<T>, Offset), ResolveError> {
  match stack.pop() {
    Some(Token { data: TokenData::Operand(expr), offset }) => Ok((expr, offset)),
    Some(token) => {
      stack.push(token);
      Err(ResolveError::malformed(stack))
    }
    None => Err(ResolveError::malformed(stack)),
  }
}

fn pop_operator<T>(stack: &mut Vec<Token<T>>) -> Result<(OperatorId, Offset), ResolveError> {
  match stack.pop() {
    Some(Token { data: TokenData::Operator(id), offset }) => Ok((id, offset)),
    Some(token) => {
      stack.push(token);
      Err(ResolveError::malformed(stack))
    }
    None => Err(ResolveError::malformed(stack)),
  }
}
