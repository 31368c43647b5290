use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// The precedence of an operator. Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Precedence(u64);

impl Precedence {
  pub const MAX: Precedence = Precedence(u64::MAX);

  pub const fn new(n: u64) -> Precedence {
    Precedence(n)
  }
}

impl Display for Precedence {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
