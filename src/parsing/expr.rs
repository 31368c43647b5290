//! The expression tree produced by the resolver.

use super::operator::OperatorId;
use super::source::Offset;

use std::fmt::{self, Display, Formatter};
use std::mem;

/// A resolved expression over leaves of type `T`.
///
/// Every child other than the leftmost one in a node remembers the
/// whitespace that preceded it in the source. The leftmost child's
/// offset belongs to whoever holds the node.
///
/// Dropping and comparing walk the tree with an explicit worklist, so
/// both are safe on arbitrarily deep trees. `Clone`, `Debug`, and
/// `Display` still recurse once per level.
#[derive(Debug, Clone)]
pub enum Expr<T> {
  /// A leaf, such as an identifier or literal.
  Atom(T),
  /// A binary operator with both operands present.
  Infix(Box<Infix<T>>),
  /// An operator missing its right operand, such as `(a +)`.
  SectionLeft(Box<SectionLeft<T>>),
  /// An operator missing its left operand, such as `(+ a)`.
  SectionRight(Box<SectionRight<T>>),
  /// An operator missing both operands, used as a value.
  SectionSides(OperatorId),
  /// Function application by juxtaposition, such as `f a`.
  Apply(Box<Apply<T>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Infix<T> {
  pub left: Expr<T>,
  pub operator_offset: Offset,
  pub operator: OperatorId,
  pub right_offset: Offset,
  pub right: Expr<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLeft<T> {
  pub left: Expr<T>,
  pub operator_offset: Offset,
  pub operator: OperatorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRight<T> {
  pub operator: OperatorId,
  pub right_offset: Offset,
  pub right: Expr<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apply<T> {
  pub function: Expr<T>,
  pub argument_offset: Offset,
  pub argument: Expr<T>,
}

impl<T> Expr<T> {
  // The unspaced constructors below are mainly a convenience for
  // building expected trees. The resolver fills in real offsets.

  pub fn atom(value: T) -> Self {
    Expr::Atom(value)
  }

  pub fn infix(left: Expr<T>, operator: impl Into<OperatorId>, right: Expr<T>) -> Self {
    Expr::Infix(Box::new(Infix {
      left,
      operator_offset: Offset::ZERO,
      operator: operator.into(),
      right_offset: Offset::ZERO,
      right,
    }))
  }

  pub fn section_left(left: Expr<T>, operator: impl Into<OperatorId>) -> Self {
    Expr::SectionLeft(Box::new(SectionLeft {
      left,
      operator_offset: Offset::ZERO,
      operator: operator.into(),
    }))
  }

  pub fn section_right(operator: impl Into<OperatorId>, right: Expr<T>) -> Self {
    Expr::SectionRight(Box::new(SectionRight {
      operator: operator.into(),
      right_offset: Offset::ZERO,
      right,
    }))
  }

  pub fn section_sides(operator: impl Into<OperatorId>) -> Self {
    Expr::SectionSides(operator.into())
  }

  pub fn apply(function: Expr<T>, argument: Expr<T>) -> Self {
    Expr::Apply(Box::new(Apply {
      function,
      argument_offset: Offset::ZERO,
      argument,
    }))
  }

  /// The number of nodes in the tree, including leaves. Walks the
  /// tree with an explicit stack, so it is safe on arbitrarily deep
  /// expressions.
  pub fn node_count(&self) -> usize {
    let mut count = 0;
    let mut pending = vec![self];
    while let Some(expr) = pending.pop() {
      count += 1;
      match expr {
        Expr::Atom(_) | Expr::SectionSides(_) => {}
        Expr::Infix(infix) => {
          pending.push(&infix.left);
          pending.push(&infix.right);
        }
        Expr::SectionLeft(section) => pending.push(&section.left),
        Expr::SectionRight(section) => pending.push(&section.right),
        Expr::Apply(apply) => {
          pending.push(&apply.function);
          pending.push(&apply.argument);
        }
      }
    }
    count
  }

  fn has_children(&self) -> bool {
    !matches!(self, Expr::Atom(_) | Expr::SectionSides(_))
  }

  /// Moves every child that has children of its own onto `into`,
  /// leaving a childless placeholder behind.
  fn detach_children(&mut self, into: &mut Vec<Expr<T>>) {
    let mut detach = |child: &mut Expr<T>| {
      if child.has_children() {
        into.push(mem::replace(child, Expr::SectionSides(OperatorId::Juxtaposition)));
      }
    };
    match self {
      Expr::Atom(_) | Expr::SectionSides(_) => {}
      Expr::Infix(infix) => {
        detach(&mut infix.left);
        detach(&mut infix.right);
      }
      Expr::SectionLeft(section) => detach(&mut section.left),
      Expr::SectionRight(section) => detach(&mut section.right),
      Expr::Apply(apply) => {
        detach(&mut apply.function);
        detach(&mut apply.argument);
      }
    }
  }
}

impl<T> Drop for Expr<T> {
  fn drop(&mut self) {
    if !self.has_children() {
      return;
    }
    let mut pending = Vec::new();
    self.detach_children(&mut pending);
    while let Some(mut expr) = pending.pop() {
      // `expr` is dropped at the end of the iteration with only
      // childless nodes below it.
      expr.detach_children(&mut pending);
    }
  }
}

impl<T: PartialEq> PartialEq for Expr<T> {
  fn eq(&self, other: &Self) -> bool {
    let mut pending = vec![(self, other)];
    while let Some(pair) = pending.pop() {
      match pair {
        (Expr::Atom(a), Expr::Atom(b)) => {
          if a != b {
            return false;
          }
        }
        (Expr::SectionSides(a), Expr::SectionSides(b)) => {
          if a != b {
            return false;
          }
        }
        (Expr::Infix(a), Expr::Infix(b)) => {
          if a.operator != b.operator || a.operator_offset != b.operator_offset || a.right_offset != b.right_offset {
            return false;
          }
          pending.push((&a.left, &b.left));
          pending.push((&a.right, &b.right));
        }
        (Expr::SectionLeft(a), Expr::SectionLeft(b)) => {
          if a.operator != b.operator || a.operator_offset != b.operator_offset {
            return false;
          }
          pending.push((&a.left, &b.left));
        }
        (Expr::SectionRight(a), Expr::SectionRight(b)) => {
          if a.operator != b.operator || a.right_offset != b.right_offset {
            return false;
          }
          pending.push((&a.right, &b.right));
        }
        (Expr::Apply(a), Expr::Apply(b)) => {
          if a.argument_offset != b.argument_offset {
            return false;
          }
          pending.push((&a.function, &b.function));
          pending.push((&a.argument, &b.argument));
        }
        _ => return false,
      }
    }
    true
  }
}

impl<T: Eq> Eq for Expr<T> {}

/// Prints the expression as it appeared in the source, including the
/// whitespace between its parts.
impl<T: Display> Display for Expr<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Atom(value) => write!(f, "{}", value),
      Expr::Infix(infix) => write!(
        f,
        "{}{}{}{}{}",
        infix.left, infix.operator_offset, infix.operator, infix.right_offset, infix.right,
      ),
      Expr::SectionLeft(section) => write!(f, "{}{}{}", section.left, section.operator_offset, section.operator),
      Expr::SectionRight(section) => write!(f, "{}{}{}", section.operator, section.right_offset, section.right),
      Expr::SectionSides(operator) => write!(f, "{}", operator),
      Expr::Apply(apply) => write!(f, "{}{}{}", apply.function, apply.argument_offset, apply.argument),
    }
  }
}
