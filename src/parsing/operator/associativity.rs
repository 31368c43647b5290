use serde::{Serialize, Deserialize};

/// The associativity of an operator. Decides how a chain of operators
/// with equal precedence is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Associativity {
  /// `a - b - c` groups as `(a - b) - c`.
  Left,
  /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
  Right,
}

impl Associativity {
  pub const fn is_left_assoc(self) -> bool {
    matches!(self, Associativity::Left)
  }

  pub const fn is_right_assoc(self) -> bool {
    matches!(self, Associativity::Right)
  }
}
